use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use super::{BaasError, SupabaseClient};

#[derive(Debug, Clone, Serialize)]
pub struct NewAuthUser {
    pub email: String,
    pub password: String,
    pub email_confirm: bool,
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserMetadata {
    pub full_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthUserRecord {
    pub id: Uuid,
    pub email: Option<String>,
}

impl SupabaseClient {
    /// Provisions an auth identity through the admin users API.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: &NewAuthUser) -> Result<AuthUserRecord, BaasError> {
        let request = self
            .request(Method::POST, "/auth/v1/admin/users")
            .json(user);
        let created = self.send(request).await?.json::<AuthUserRecord>().await?;
        tracing::info!(user_id = %created.id, "auth user created");
        Ok(created)
    }
}
