use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::vendors::VendorList,
    entity::profiles::{ActiveModel as ProfileActive, Column, Entity as Profiles, Model as ProfileModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Profile, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn find_profile(state: &AppState, id: Uuid) -> AppResult<Option<Profile>> {
    let profile = Profiles::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(profile_from_entity);
    Ok(profile)
}

pub async fn my_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Profile>> {
    let profile = find_profile(state, user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", profile, None))
}

pub async fn list_vendors(state: &AppState) -> AppResult<ApiResponse<VendorList>> {
    let items: Vec<Profile> = Profiles::find()
        .filter(Column::Role.eq(Role::Vendor.as_str()))
        .order_by_asc(Column::FullName)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(profile_from_entity)
        .collect();

    let meta = Meta::counted(items.len());
    Ok(ApiResponse::success("Vendors", VendorList { items }, Some(meta)))
}

pub async fn disable_vendor(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Profile>> {
    let existing = Profiles::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ProfileActive = existing.into();
    active.role = Set(Role::DisabledVendor.as_str().to_string());
    active.updated_at = Set(Utc::now().fixed_offset());
    let updated = active.update(&state.orm).await?;

    tracing::info!(vendor_id = %id, "vendor disabled");
    Ok(ApiResponse::success(
        "Vendor disabled",
        profile_from_entity(updated),
        Some(Meta::empty()),
    ))
}

/// Inserts or overwrites the profile row for a freshly provisioned vendor.
pub async fn upsert_vendor_profile(
    state: &AppState,
    id: Uuid,
    full_name: &str,
    email: &str,
    avatar_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO profiles (id, full_name, avatar_url, role, updated_at, email)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE
        SET full_name = EXCLUDED.full_name,
            avatar_url = EXCLUDED.avatar_url,
            role = EXCLUDED.role,
            updated_at = EXCLUDED.updated_at,
            email = EXCLUDED.email
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(avatar_url)
    .bind(Role::Vendor.as_str())
    .bind(Utc::now())
    .bind(email)
    .execute(&state.pool)
    .await?;

    Ok(())
}

fn profile_from_entity(model: ProfileModel) -> Profile {
    let role = model.role.parse().unwrap_or_else(|err| {
        tracing::warn!(profile_id = %model.id, error = %err, "treating profile as shopper");
        Role::Shopper
    });
    Profile {
        id: model.id,
        full_name: model.full_name,
        avatar_url: model.avatar_url,
        role,
        email: model.email,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
