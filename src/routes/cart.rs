use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView, QuantityDeltaRequest, SetQuantityRequest},
    error::AppResult,
    middleware::auth::MaybeUser,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route("/items", post(add_item))
        .route(
            "/items/{product_id}",
            put(set_quantity).patch(apply_delta).delete(remove_item),
        )
        .route("/items/{product_id}/increment", post(increment))
        .route("/items/{product_id}/decrement", post(decrement))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart of the caller, or the guest cart", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    user: MaybeUser,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::view_cart(&state, &user.identity()))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add units of a product", body = ApiResponse<CartView>),
        (status = 400, description = "Product not found"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: MaybeUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let quantity = payload.quantity.unwrap_or(1);
    let resp =
        cart_service::add_to_cart(&state, &user.identity(), payload.product_id, quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Set quantity; zero or less removes the line", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(product_id): Path<i64>,
    Json(payload): Json<SetQuantityRequest>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::set_quantity(
        &state,
        &user.identity(),
        product_id,
        payload.quantity,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    request_body = QuantityDeltaRequest,
    responses(
        (status = 200, description = "Shift quantity; reaching zero removes the line", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn apply_delta(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(product_id): Path<i64>,
    Json(payload): Json<QuantityDeltaRequest>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::apply_delta(
        &state,
        &user.identity(),
        product_id,
        payload.delta,
    ))
}

#[utoipa::path(
    post,
    path = "/api/cart/items/{product_id}/increment",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Add one unit", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn increment(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(product_id): Path<i64>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::increment(&state, &user.identity(), product_id))
}

#[utoipa::path(
    post,
    path = "/api/cart/items/{product_id}/decrement",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Remove one unit, never below one", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn decrement(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(product_id): Path<i64>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::decrement(&state, &user.identity(), product_id))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Remove the line if present", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(product_id): Path<i64>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::remove_from_cart(
        &state,
        &user.identity(),
        product_id,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Empty the cart", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: MaybeUser,
) -> Json<ApiResponse<serde_json::Value>> {
    Json(cart_service::clear_cart(&state, &user.identity()))
}
