use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use rand::seq::IndexedRandom;

use crate::{
    baas::{BaasError, NewAuthUser, UserMetadata},
    dto::vendors::{AddVendorRequest, AddVendorResponse},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::profile_service,
    state::AppState,
};

pub const AVATAR_BUCKET: &str = "avatars";

const PASSWORD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const PASSWORD_RANDOM_LEN: usize = 12;
/// Guarantees the upper case, digit and symbol classes password rules ask for.
const PASSWORD_SUFFIX: &str = "A1!aB2@";

/// Provisions a vendor: auth identity, optional avatar, and a `vendor` profile row.
///
/// The generated password is only ever returned in the response.
pub async fn add_vendor(
    state: &AppState,
    payload: AddVendorRequest,
) -> AppResult<ApiResponse<AddVendorResponse>> {
    let name = payload.name.trim();
    let email = payload.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest("Name and email are required.".into()));
    }

    let avatar_url = match payload.avatar_base64.as_deref().map(str::trim) {
        Some(encoded) if !encoded.is_empty() => upload_avatar(state, email, encoded).await,
        _ => None,
    };

    let password = generate_password();
    let new_user = NewAuthUser {
        email: email.to_string(),
        password: password.clone(),
        email_confirm: true,
        user_metadata: UserMetadata {
            full_name: name.to_string(),
            avatar_url: avatar_url.clone(),
        },
    };

    let created = state.baas.create_user(&new_user).await.map_err(|err| match err {
        BaasError::Api { message, .. } => AppError::BadRequest(message),
        other => AppError::Backend(other),
    })?;

    // The auth user exists by now, so the error has to name it.
    profile_service::upsert_vendor_profile(state, created.id, name, email, avatar_url.as_deref())
        .await
        .map_err(|err| {
            tracing::error!(
                vendor_id = %created.id,
                email = %email,
                error = %err,
                "auth user created but vendor profile was not saved"
            );
            AppError::BadRequest(format!(
                "Vendor user {} was created but the profile could not be saved: {err}",
                created.id
            ))
        })?;

    tracing::info!(vendor_id = %created.id, email = %email, "vendor provisioned");

    let data = AddVendorResponse {
        success: true,
        user_id: created.id,
        email: email.to_string(),
        avatar_url,
        password,
    };
    Ok(ApiResponse::success("Vendor created", data, Some(Meta::empty())))
}

/// Avatar problems never block vendor creation; the vendor just has no avatar.
async fn upload_avatar(state: &AppState, email: &str, encoded: &str) -> Option<String> {
    let bytes = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "avatar is not valid base64, skipping");
            return None;
        }
    };

    let path = avatar_object_path(email, Utc::now().timestamp_millis());
    match state
        .baas
        .upload_object(AVATAR_BUCKET, &path, bytes, "image/png")
        .await
    {
        Ok(()) => Some(state.baas.public_url(AVATAR_BUCKET, &path)),
        Err(err) => {
            tracing::warn!(error = %err, path = %path, "avatar upload failed, skipping");
            None
        }
    }
}

/// `avatars/<email without punctuation>_<millis>.png`
pub fn avatar_object_path(email: &str, timestamp_millis: i64) -> String {
    let stem: String = email.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("avatars/{stem}_{timestamp_millis}.png")
}

pub fn generate_password() -> String {
    let mut rng = rand::rng();
    let mut password: String = (0..PASSWORD_RANDOM_LEN)
        .filter_map(|_| PASSWORD_ALPHABET.choose(&mut rng).copied().map(char::from))
        .collect();
    password.push_str(PASSWORD_SUFFIX);
    password
}
