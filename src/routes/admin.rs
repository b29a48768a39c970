use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::vendors::{AddVendorRequest, AddVendorResponse, VendorList},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::Profile,
    response::ApiResponse,
    services::{profile_service, vendor_service},
    state::AppState,
};

/// Base64 avatars make vendor creation bodies larger than anything else.
const ADD_VENDOR_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(list_vendors))
        .route("/vendors/{id}/disable", patch(disable_vendor))
}

pub fn add_vendor_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_vendor))
        .layer(DefaultBodyLimit::max(ADD_VENDOR_BODY_LIMIT))
}

#[utoipa::path(
    post,
    path = "/api/add-vendor",
    request_body = AddVendorRequest,
    responses(
        (status = 200, description = "Vendor created; the password is only shown here", body = ApiResponse<AddVendorResponse>),
        (status = 400, description = "Missing name/email or rejected by the auth service"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddVendorRequest>,
) -> AppResult<Json<ApiResponse<AddVendorResponse>>> {
    ensure_admin(&state, &user).await?;
    let resp = vendor_service::add_vendor(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/vendors",
    responses(
        (status = 200, description = "Active vendors", body = ApiResponse<VendorList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<VendorList>>> {
    ensure_admin(&state, &user).await?;
    let resp = profile_service::list_vendors(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/vendors/{id}/disable",
    params(
        ("id" = Uuid, Path, description = "Vendor profile ID")
    ),
    responses(
        (status = 200, description = "Vendor disabled", body = ApiResponse<Profile>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn disable_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    ensure_admin(&state, &user).await?;
    let resp = profile_service::disable_vendor(&state, id).await?;
    Ok(Json(resp))
}
