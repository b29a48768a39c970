use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::{Cart, CartItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i64,
    /// Units to add, 1 when omitted.
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuantityDeltaRequest {
    pub delta: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
    pub count: u64,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let total = cart.total();
        let count = cart.count();
        Self {
            items: cart.into_items(),
            total,
            count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveLocationRequest {
    pub location: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationView {
    pub location: Option<String>,
}
