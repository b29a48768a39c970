use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::catalog::{
        CategoryProducts, CategoryTree, InventoryItem, InventoryList, ProductDetail, ProductList,
    },
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        products::{Column as ProductCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    hierarchy::build_hierarchy,
    images::normalize_optional,
    models::{Category, Product},
    response::{ApiResponse, Meta},
    routes::params::SortOrder,
    state::AppState,
};

pub async fn list_category_tree(state: &AppState) -> AppResult<ApiResponse<CategoryTree>> {
    let categories: Vec<Category> = Categories::find()
        .order_by_asc(CategoryCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let items = build_hierarchy(categories);
    let meta = Meta::counted(items.len());
    Ok(ApiResponse::success("Categories", CategoryTree { items }, Some(meta)))
}

pub async fn category_products(
    state: &AppState,
    category_id: i64,
) -> AppResult<ApiResponse<CategoryProducts>> {
    let category = Categories::find_by_id(category_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let products = products_in_categories(state, &[category_id]).await?;
    let meta = Meta::counted(products.len());
    let data = CategoryProducts {
        category_id: category.id,
        category_name: category.name,
        products,
    };
    Ok(ApiResponse::success("Category products", data, Some(meta)))
}

/// Products of the categories featured on the home page.
pub async fn featured_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = products_in_categories(state, &state.featured_category_ids).await?;
    let meta = Meta::counted(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn latest_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .order_by_desc(ProductCol::DateAdded)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::counted(items.len());
    Ok(ApiResponse::success("Latest products", ProductList { items }, Some(meta)))
}

pub async fn find_product(state: &AppState, id: i64) -> AppResult<Option<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity);
    Ok(product)
}

pub async fn product_detail(state: &AppState, id: i64) -> AppResult<ApiResponse<ProductDetail>> {
    let product = find_product(state, id).await?.ok_or(AppError::NotFound)?;

    let related = match product.categoryid {
        Some(category_id) => Products::find()
            .filter(ProductCol::Categoryid.eq(category_id))
            .filter(ProductCol::Id.ne(product.id))
            .order_by_asc(ProductCol::Id)
            .all(&state.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect(),
        None => Vec::new(),
    };

    Ok(ApiResponse::success(
        "Product",
        ProductDetail { product, related },
        None,
    ))
}

pub async fn vendor_inventory(
    state: &AppState,
    sort_order: SortOrder,
) -> AppResult<ApiResponse<InventoryList>> {
    let finder = Products::find();
    let finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(ProductCol::DateAdded),
        SortOrder::Desc => finder.order_by_desc(ProductCol::DateAdded),
    };

    let items: Vec<InventoryItem> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| InventoryItem {
            id: model.id,
            name: model.name,
            price: model.price,
            image: normalize_optional(model.image),
            quantity: model.quantity,
            date_added: model.date_added.with_timezone(&Utc),
        })
        .collect();

    let meta = Meta::counted(items.len());
    Ok(ApiResponse::success("Inventory", InventoryList { items }, Some(meta)))
}

async fn products_in_categories(state: &AppState, category_ids: &[i64]) -> AppResult<Vec<Product>> {
    if category_ids.is_empty() {
        return Ok(Vec::new());
    }

    let products = Products::find()
        .filter(ProductCol::Categoryid.is_in(category_ids.iter().copied()))
        .order_by_asc(ProductCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(products)
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        image: normalize_optional(model.image),
        description: model.description,
        quantity: model.quantity,
        categoryid: model.categoryid,
        supermarketid: model.supermarketid,
        date_added: model.date_added.with_timezone(&Utc),
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
        image: model.image,
        parent_id: model.parent_id,
    }
}
