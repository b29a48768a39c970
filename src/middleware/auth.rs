use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::guest::{GuestId, guest_id_from_cookie};
use crate::{
    error::{AppError, AppResult},
    models::{Profile, Role},
    services::profile_service,
    state::AppState,
    storage::Identity,
};

/// Cookie the hosted auth client stores the access token in.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Audience the hosted backend puts on tokens of signed-in users.
const TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: Option<String>,
    pub aud: String,
    pub exp: usize,
}

/// Verifies access tokens issued by the hosted auth service.
#[derive(Clone)]
pub struct AuthSettings {
    key: DecodingKey,
    validation: Validation,
}

impl AuthSettings {
    pub fn new(jwt_secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        Self {
            key: DecodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected access token");
                AppError::Unauthorized
            })
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::User(self.user_id)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = access_token(&parts.headers)?.ok_or(AppError::Unauthorized)?;
        let claims = AuthSettings::from_ref(state).verify(&token)?;
        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// The signed-in user if the request carries a valid token, otherwise the
/// caller's guest id.
///
/// An expired or malformed token falls back to the guest identity instead of
/// rejecting the request.
#[derive(Debug, Clone)]
pub struct MaybeUser {
    pub user: Option<AuthUser>,
    pub guest_id: Uuid,
}

impl MaybeUser {
    pub fn identity(&self) -> Identity {
        match &self.user {
            Some(user) => user.identity(),
            None => Identity::Guest(self.guest_id),
        }
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    AuthSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Some(user),
            Err(AppError::Unauthorized) | Err(AppError::BadRequest(_)) => None,
            Err(other) => return Err(other),
        };

        // Without the guest middleware in front, an anonymous caller gets a
        // one-off id and therefore an empty, unshared cart.
        let guest_id = parts
            .extensions
            .get::<GuestId>()
            .map(|guest| guest.0)
            .or_else(|| guest_id_from_cookie(&parts.headers))
            .unwrap_or_else(Uuid::new_v4);

        Ok(MaybeUser { user, guest_id })
    }
}

/// Bearer header first, then the session cookie.
fn access_token(headers: &HeaderMap) -> AppResult<Option<String>> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?;
        return Ok(Some(token.trim().to_string()));
    }

    Ok(cookie_value(headers, ACCESS_TOKEN_COOKIE)
        .filter(|value| !value.is_empty())
        .map(str::to_string))
}

/// Looks up a cookie by name across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

pub async fn ensure_role(state: &AppState, user: &AuthUser, allowed: &[Role]) -> AppResult<Profile> {
    let profile = profile_service::find_profile(state, user.user_id)
        .await?
        .ok_or(AppError::Forbidden)?;
    if !allowed.contains(&profile.role) {
        tracing::debug!(user_id = %user.user_id, role = %profile.role, "role not allowed");
        return Err(AppError::Forbidden);
    }
    Ok(profile)
}

pub async fn ensure_admin(state: &AppState, user: &AuthUser) -> AppResult<Profile> {
    ensure_role(state, user, &[Role::Admin]).await
}
