use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, Request, Response},
};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::{net::SocketAddr, time::Duration};

use grocery_storefront::{
    cart::CartEvent, config::AppConfig, routes::create_app_router, state::AppState,
};

/// Default JSON body cap; routes that need more raise it themselves.
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
/// Hard cap for any request body.
const MAX_BODY_LIMIT: usize = 8 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,grocery_storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config).await?;
    tracing::info!(
        featured_categories = ?config.featured_category_ids,
        backend = %config.supabase.url,
        "state ready"
    );

    tokio::spawn(log_cart_events(state.carts.subscribe()));

    let concurrency_limit_layer = ConcurrencyLimitLayer::new(100);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let app = create_app_router()
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_LIMIT))
        .layer(concurrency_limit_layer)
        .with_state(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

/// Listens for cart changes for the lifetime of the process.
async fn log_cart_events(mut events: Receiver<CartEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::debug!(
                key = %event.key,
                change = ?event.change,
                items = event.item_count,
                total = event.total,
                "cart updated"
            ),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "cart event listener fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
