use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::auth::{ACCESS_TOKEN_COOKIE, cookie_value};

/// Back office paths that need a session cookie before anything else runs.
pub const PROTECTED_VENDOR_ROUTES: [&str; 4] = [
    "/vendor/dashboard",
    "/vendor/add-inventory",
    "/vendor/edit-inventory",
    "/vendor/create-store",
];

pub const VENDOR_LOGIN_REDIRECT: &str = "/vendor?redirected=1";

pub fn is_protected(path: &str) -> bool {
    PROTECTED_VENDOR_ROUTES
        .iter()
        .any(|route| path.starts_with(route))
}

/// Redirects to the vendor login when a protected path is hit without a
/// session cookie. The token itself is not validated here.
pub async fn require_session_cookie(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_protected(path)
        && cookie_value(request.headers(), ACCESS_TOKEN_COOKIE).is_none_or(str::is_empty)
    {
        tracing::debug!(path = %path, "no session cookie, redirecting to vendor login");
        return Redirect::temporary(VENDOR_LOGIN_REDIRECT).into_response();
    }
    next.run(request).await
}
