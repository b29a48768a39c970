use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartItem,
    dto::{
        cart::{
            AddToCartRequest, CartView, LocationView, QuantityDeltaRequest, SaveLocationRequest,
            SetQuantityRequest,
        },
        catalog::{
            CategoryProducts, CategoryTree, InventoryItem, InventoryList, ProductDetail,
            ProductList, StoreList,
        },
        vendors::{AddVendorRequest, AddVendorResponse, VendorList},
    },
    hierarchy::CategoryNode,
    models::{Category, Product, Profile, Role, Store},
    response::{ApiResponse, Meta},
    routes::{
        admin, cart, categories, health, location, params, products, profile, stores, vendor,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        categories::list_categories,
        categories::category_products,
        products::list_products,
        products::latest_products,
        products::get_product,
        stores::list_stores,
        stores::get_store,
        cart::view_cart,
        cart::add_item,
        cart::set_quantity,
        cart::apply_delta,
        cart::increment,
        cart::decrement,
        cart::remove_item,
        cart::clear_cart,
        location::get_location,
        location::save_location,
        profile::my_profile,
        admin::add_vendor,
        admin::list_vendors,
        admin::disable_vendor,
        vendor::dashboard
    ),
    components(
        schemas(
            Product,
            Category,
            CategoryNode,
            Store,
            Profile,
            Role,
            CartItem,
            CartView,
            AddToCartRequest,
            SetQuantityRequest,
            QuantityDeltaRequest,
            SaveLocationRequest,
            LocationView,
            CategoryTree,
            CategoryProducts,
            ProductList,
            ProductDetail,
            StoreList,
            InventoryItem,
            InventoryList,
            AddVendorRequest,
            AddVendorResponse,
            VendorList,
            params::SortOrder,
            Meta,
            ApiResponse<CategoryTree>,
            ApiResponse<ProductList>,
            ApiResponse<ProductDetail>,
            ApiResponse<StoreList>,
            ApiResponse<CartView>,
            ApiResponse<AddVendorResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Category and product endpoints"),
        (name = "Stores", description = "Store endpoints"),
        (name = "Cart", description = "Cart and delivery location endpoints"),
        (name = "Profile", description = "Profile endpoints"),
        (name = "Admin", description = "Vendor management endpoints"),
        (name = "Vendor", description = "Vendor back office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
