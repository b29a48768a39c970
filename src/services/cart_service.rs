use crate::{
    cart::CartProduct,
    dto::cart::{CartView, LocationView},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::catalog_service,
    state::AppState,
    storage::Identity,
};

pub fn view_cart(state: &AppState, owner: &Identity) -> ApiResponse<CartView> {
    let cart = state.carts.load(owner);
    ApiResponse::success("Cart", CartView::from(cart), None)
}

/// Adds units of a catalog product. Name, price and image are taken from the
/// catalog, not from the caller.
pub async fn add_to_cart(
    state: &AppState,
    owner: &Identity,
    product_id: i64,
    quantity: i64,
) -> AppResult<ApiResponse<CartView>> {
    let product = catalog_service::find_product(state, product_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;

    let cart = state
        .carts
        .add(owner, CartProduct::from(&product), quantity);
    Ok(ApiResponse::success("Added to cart", CartView::from(cart), None))
}

pub fn set_quantity(
    state: &AppState,
    owner: &Identity,
    product_id: i64,
    quantity: i64,
) -> ApiResponse<CartView> {
    let cart = state.carts.set_quantity(owner, product_id, quantity);
    ApiResponse::success("OK", CartView::from(cart), None)
}

pub fn apply_delta(
    state: &AppState,
    owner: &Identity,
    product_id: i64,
    delta: i64,
) -> ApiResponse<CartView> {
    let cart = state.carts.apply_delta(owner, product_id, delta);
    ApiResponse::success("OK", CartView::from(cart), None)
}

pub fn increment(state: &AppState, owner: &Identity, product_id: i64) -> ApiResponse<CartView> {
    let cart = state.carts.increment(owner, product_id);
    ApiResponse::success("OK", CartView::from(cart), None)
}

pub fn decrement(state: &AppState, owner: &Identity, product_id: i64) -> ApiResponse<CartView> {
    let cart = state.carts.decrement(owner, product_id);
    ApiResponse::success("OK", CartView::from(cart), None)
}

pub fn remove_from_cart(
    state: &AppState,
    owner: &Identity,
    product_id: i64,
) -> ApiResponse<CartView> {
    let cart = state.carts.remove(owner, product_id);
    ApiResponse::success("Removed from cart", CartView::from(cart), None)
}

pub fn clear_cart(state: &AppState, owner: &Identity) -> ApiResponse<serde_json::Value> {
    state.carts.clear(owner);
    ApiResponse::success("Cart cleared", serde_json::json!({}), Some(Meta::empty()))
}

pub fn get_location(state: &AppState, owner: &Identity) -> ApiResponse<LocationView> {
    let location = state.locations.get(owner);
    ApiResponse::success("Location", LocationView { location }, None)
}

pub fn save_location(
    state: &AppState,
    owner: &Identity,
    location: &str,
) -> AppResult<ApiResponse<LocationView>> {
    if location.trim().is_empty() {
        return Err(AppError::BadRequest("location must not be empty".to_string()));
    }
    state.locations.set(owner, location);
    Ok(ApiResponse::success(
        "Location saved",
        LocationView {
            location: state.locations.get(owner),
        },
        None,
    ))
}
