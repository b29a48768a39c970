use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{InventoryList, InventoryQuery},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_role},
    models::Role,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

/// Vendor back office. Mounted under `/vendor`, behind the session cookie gate.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/vendor/dashboard",
    params(
        ("sort_order" = Option<String>, Query, description = "Sort by date added: asc, desc (default)")
    ),
    responses(
        (status = 200, description = "Inventory list", body = ApiResponse<InventoryList>),
        (status = 307, description = "No session cookie, redirected to vendor login"),
        (status = 403, description = "Not a vendor"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<ApiResponse<InventoryList>>> {
    ensure_role(&state, &user, &[Role::Vendor, Role::Admin]).await?;
    let resp = catalog_service::vendor_inventory(&state, query.sort_order.unwrap_or_default()).await?;
    Ok(Json(resp))
}
