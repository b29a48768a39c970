use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Profile;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddVendorRequest {
    pub name: String,
    pub email: String,
    /// PNG avatar, base64 encoded.
    pub avatar_base64: Option<String>,
}

/// Returned once; the admin relays the password to the vendor out of band.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddVendorResponse {
    pub success: bool,
    pub user_id: Uuid,
    pub email: String,
    pub avatar_url: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct VendorList {
    #[schema(value_type = Vec<Profile>)]
    pub items: Vec<Profile>,
}
