use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use medgate_core::user::{User, UserId};
use tracing::info;

use super::MessageResponse;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;
use crate::services::directory::ProfileUpdate;

#[utoipa::path(
    get,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the profile")),
    responses(
        (status = 200, description = "The profile", body = User),
        (status = 403, description = "Neither the owner nor an admin"),
        (status = 404, description = "No such user"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn get_profile_handler(
    State(state): State<SharedAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .directory
        .find_user_by_id(&UserId::new(user_id.as_str()))
        .await?
        .ok_or(AppError::UserNotFound(user_id))?;

    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the profile")),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "The updated profile", body = User),
        (status = 403, description = "Neither the owner nor an admin"),
        (status = 404, description = "No such user"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn update_profile_handler(
    State(state): State<SharedAppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .directory
        .update_profile(&UserId::new(user_id.as_str()), &update)
        .await?
        .ok_or(AppError::UserNotFound(user_id))?;

    info!("Profile of {} updated by {}", profile.id, actor.id);
    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the account")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 403, description = "Neither the owner nor an admin"),
        (status = 404, description = "No such user"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn delete_profile_handler(
    State(state): State<SharedAppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state
        .directory
        .remove_user(&UserId::new(user_id.as_str()))
        .await?
    {
        return Err(AppError::UserNotFound(user_id));
    }

    info!("Account {} deleted by {}", user_id, actor.id);
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}
