use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::cart::{LocationView, SaveLocationRequest},
    error::AppResult,
    middleware::auth::MaybeUser,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_location).put(save_location))
}

#[utoipa::path(
    get,
    path = "/api/location",
    responses(
        (status = 200, description = "Saved delivery location", body = ApiResponse<LocationView>)
    ),
    tag = "Cart"
)]
pub async fn get_location(
    State(state): State<AppState>,
    user: MaybeUser,
) -> Json<ApiResponse<LocationView>> {
    Json(cart_service::get_location(&state, &user.identity()))
}

#[utoipa::path(
    put,
    path = "/api/location",
    request_body = SaveLocationRequest,
    responses(
        (status = 200, description = "Save delivery location", body = ApiResponse<LocationView>),
        (status = 400, description = "Empty location"),
    ),
    tag = "Cart"
)]
pub async fn save_location(
    State(state): State<AppState>,
    user: MaybeUser,
    Json(payload): Json<SaveLocationRequest>,
) -> AppResult<Json<ApiResponse<LocationView>>> {
    let resp = cart_service::save_location(&state, &user.identity(), &payload.location)?;
    Ok(Json(resp))
}
