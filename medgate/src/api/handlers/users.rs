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

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Id of the user to delete")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Role lacks canDeleteUsers"),
        (status = 404, description = "No such user"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn delete_user_handler(
    State(state): State<SharedAppState>,
    Extension(actor): Extension<User>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.directory.remove_user(&UserId::new(id.as_str())).await? {
        return Err(AppError::UserNotFound(id));
    }

    info!("User {} deleted by {}", id, actor.id);
    Ok(Json(MessageResponse::new("User deleted")))
}
