mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{FakeBackend, offline_state};
use grocery_storefront::routes::create_app_router;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let base = FakeBackend::default().spawn().await;
    create_app_router().with_state(offline_state(&base))
}

struct Reply {
    status: StatusCode,
    guest_cookie: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    // Keep only the `guest_id=<uuid>` pair, as a browser would send it back.
    let guest_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("guest_id="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Reply {
        status,
        guest_cookie,
        body,
    }
}

#[tokio::test]
async fn anonymous_clients_do_not_share_location() {
    let app = app().await;

    let saved = send(
        &app,
        "PUT",
        "/api/location",
        None,
        Some(json!({ "location": "Shopper A, 12 Private Lane" })),
    )
    .await;
    assert_eq!(saved.status, StatusCode::OK);
    let cookie_a = saved.guest_cookie.expect("guest cookie issued");

    // A second browser without cookies sees nothing of the first one's data.
    let other = send(&app, "GET", "/api/location", None, None).await;
    assert_eq!(other.status, StatusCode::OK);
    assert!(other.body["data"]["location"].is_null());
    let cookie_b = other.guest_cookie.expect("guest cookie issued");
    assert_ne!(cookie_a, cookie_b);

    let again = send(&app, "GET", "/api/location", Some(&cookie_a), None).await;
    assert_eq!(again.body["data"]["location"], "Shopper A, 12 Private Lane");
    assert!(again.guest_cookie.is_none(), "known guest keeps its cookie");

    let still_empty = send(&app, "GET", "/api/location", Some(&cookie_b), None).await;
    assert!(still_empty.body["data"]["location"].is_null());
}

#[tokio::test]
async fn anonymous_clients_do_not_share_cart() {
    let app = app().await;

    let first = send(&app, "GET", "/api/cart", None, None).await;
    let cookie_a = first.guest_cookie.expect("guest cookie issued");
    let second = send(&app, "GET", "/api/cart", None, None).await;
    let cookie_b = second.guest_cookie.expect("guest cookie issued");
    assert_ne!(cookie_a, cookie_b);

    // Clearing one guest's cart is scoped to that guest.
    let cleared = send(&app, "DELETE", "/api/cart", Some(&cookie_a), None).await;
    assert_eq!(cleared.status, StatusCode::OK);

    let view = send(&app, "GET", "/api/cart", Some(&cookie_b), None).await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.body["data"]["count"], 0);
}

#[tokio::test]
async fn garbage_guest_cookie_is_replaced() {
    let app = app().await;

    let reply = send(&app, "GET", "/api/cart", Some("guest_id=not-a-uuid"), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.guest_cookie.is_some());
}
