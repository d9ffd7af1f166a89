use axum::{response::IntoResponse, Extension, Json};
use medgate_core::user::User;
use tracing::info;

use super::MessageResponse;

#[utoipa::path(
    post,
    path = "/api/content/moderate",
    responses(
        (status = 200, description = "Content moderated", body = MessageResponse),
        (status = 403, description = "Role lacks canModerateContent"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn moderate_content_handler(Extension(user): Extension<User>) -> impl IntoResponse {
    info!("Content moderated by {} ({})", user.id, user.role);
    Json(MessageResponse::new("Content moderated"))
}
