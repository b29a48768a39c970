use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::catalog::{CategoryProducts, CategoryTree},
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{id}/products", get(category_products))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Root categories with nested children", body = ApiResponse<CategoryTree>),
        (status = 500, description = "Failed to fetch categories"),
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryTree>>> {
    let resp = catalog_service::list_category_tree(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/products",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Products in a category", body = ApiResponse<CategoryProducts>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Catalog"
)]
pub async fn category_products(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<CategoryProducts>>> {
    let resp = catalog_service::category_products(&state, id).await?;
    Ok(Json(resp))
}
