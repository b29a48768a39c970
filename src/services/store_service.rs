use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    dto::catalog::StoreList,
    entity::supermarkets::{Column, Entity as Supermarkets},
    error::{AppError, AppResult},
    images::normalize_optional,
    models::Store,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
struct StoreRow {
    id: i64,
    name: String,
    address: Option<String>,
    price: Option<String>,
    delivery_time: Option<String>,
    delivery_fee: Option<f64>,
    main_image: Option<String>,
    gallery_images: Vec<String>,
}

/// Only the listing columns are selected; the owning vendor stays private.
fn store_columns() -> Select<Supermarkets> {
    Supermarkets::find().select_only().columns([
        Column::Id,
        Column::Name,
        Column::Address,
        Column::Price,
        Column::DeliveryTime,
        Column::DeliveryFee,
        Column::MainImage,
        Column::GalleryImages,
    ])
}

pub async fn list_stores(state: &AppState) -> AppResult<ApiResponse<StoreList>> {
    let items: Vec<Store> = store_columns()
        .order_by_asc(Column::Id)
        .into_model::<StoreRow>()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(store_from_row)
        .collect();

    let meta = Meta::counted(items.len());
    Ok(ApiResponse::success("Stores", StoreList { items }, Some(meta)))
}

pub async fn get_store(state: &AppState, id: i64) -> AppResult<ApiResponse<Store>> {
    let store = store_columns()
        .filter(Column::Id.eq(id))
        .into_model::<StoreRow>()
        .one(&state.orm)
        .await?
        .map(store_from_row)
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success("Store", store, None))
}

fn store_from_row(row: StoreRow) -> Store {
    Store {
        id: row.id,
        name: row.name,
        address: row.address,
        price: row.price,
        delivery_time: row.delivery_time,
        delivery_fee: row.delivery_fee,
        main_image: normalize_optional(row.main_image),
        gallery_images: row.gallery_images,
    }
}
