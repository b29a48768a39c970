use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::catalog::{ProductDetail, ProductList},
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/latest", get(latest_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products in the featured categories", body = ApiResponse<ProductList>),
        (status = 500, description = "Failed to fetch products"),
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::featured_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/latest",
    responses(
        (status = 200, description = "All products, newest first", body = ApiResponse<ProductList>)
    ),
    tag = "Catalog"
)]
pub async fn latest_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::latest_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with related products", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = catalog_service::product_detail(&state, id).await?;
    Ok(Json(resp))
}
