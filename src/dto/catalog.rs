use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    hierarchy::CategoryNode,
    models::{Product, Store},
    routes::params::SortOrder,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryTree {
    #[schema(value_type = Vec<CategoryNode>)]
    pub items: Vec<CategoryNode>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    /// Other products from the same category.
    pub related: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryProducts {
    pub category_id: i64,
    pub category_name: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StoreList {
    #[schema(value_type = Vec<Store>)]
    pub items: Vec<Store>,
}

/// A row of the vendor inventory table.
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: i32,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct InventoryList {
    #[schema(value_type = Vec<InventoryItem>)]
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InventoryQuery {
    pub sort_order: Option<SortOrder>,
}
