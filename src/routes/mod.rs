use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware::from_fn,
    routing::get,
};

use crate::{
    middleware::{guest::assign_guest_id, vendor_gate::require_session_cookie},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod admin;
pub mod cart;
pub mod categories;
pub mod doc;
pub mod health;
pub mod location;
pub mod params;
pub mod products;
pub mod profile;
pub mod stores;
pub mod vendor;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/stores", stores::router())
        .nest("/cart", cart::router())
        .nest("/location", location::router())
        .nest("/profile", profile::router())
        .nest("/admin", admin::router())
        .nest("/add-vendor", admin::add_vendor_router())
        .layer(from_fn(assign_guest_id))
}

/// Every route the service serves, with the vendor cookie gate in front.
pub fn create_app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .nest("/vendor", vendor::router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(from_fn(require_session_cookie))
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
