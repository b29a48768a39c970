use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, middleware::auth::AuthUser, models::Profile, response::ApiResponse,
    services::profile_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(my_profile))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile of the caller", body = ApiResponse<Profile>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile row"),
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let resp = profile_service::my_profile(&state, &user).await?;
    Ok(Json(resp))
}
