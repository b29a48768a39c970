use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::catalog::StoreList,
    error::AppResult,
    models::Store,
    response::ApiResponse,
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores))
        .route("/{id}", get(get_store))
}

#[utoipa::path(
    get,
    path = "/api/stores",
    responses(
        (status = 200, description = "List stores", body = ApiResponse<StoreList>),
        (status = 500, description = "Failed to fetch stores"),
    ),
    tag = "Stores"
)]
pub async fn list_stores(State(state): State<AppState>) -> AppResult<Json<ApiResponse<StoreList>>> {
    let resp = store_service::list_stores(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stores/{id}",
    params(
        ("id" = i64, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Get store", body = ApiResponse<Store>),
        (status = 404, description = "Store not found"),
    ),
    tag = "Stores"
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let resp = store_service::get_store(&state, id).await?;
    Ok(Json(resp))
}
