use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::auth::cookie_value;

/// Cookie that keeps an anonymous shopper's cart and location apart from everyone else's.
pub const GUEST_COOKIE: &str = "guest_id";

const GUEST_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Guest id of the current request, placed in request extensions by [`assign_guest_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestId(pub Uuid);

pub fn guest_id_from_cookie(headers: &HeaderMap) -> Option<Uuid> {
    cookie_value(headers, GUEST_COOKIE).and_then(|value| Uuid::parse_str(value).ok())
}

/// Reuses the caller's `guest_id` cookie or mints a new one and sets it on the response.
pub async fn assign_guest_id(mut request: Request, next: Next) -> Response {
    let existing = guest_id_from_cookie(request.headers());
    let guest_id = existing.unwrap_or_else(Uuid::new_v4);
    request.extensions_mut().insert(GuestId(guest_id));

    let mut response = next.run(request).await;
    if existing.is_none() {
        let cookie = format!(
            "{GUEST_COOKIE}={guest_id}; Path=/; Max-Age={GUEST_COOKIE_MAX_AGE_SECS}; HttpOnly; SameSite=Lax"
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "could not build guest cookie"),
        }
    }
    response
}
