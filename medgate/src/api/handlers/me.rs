use axum::{extract::State, response::IntoResponse, Extension, Json};
use medgate_core::authorization::{Denial, Permission};
use medgate_core::user::User;
use serde::Serialize;
use tracing::debug;

use crate::api::basic_auth::AuthenticatedUser;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user: User,
    pub permissions: Vec<Permission>,
    pub full_access: bool,
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "The authenticated user and what their role grants", body = CurrentUserResponse),
        (status = 401, description = "Access token is missing or invalid"),
        (status = 404, description = "The token maps to no known user"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn current_user_handler(
    State(state): State<SharedAppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .gatekeeper
        .resolver()
        .resolve(&auth.id)
        .await
        .map_err(Denial::from)?;
    debug!("Resolved current user {} as {}", user.id, user.role);

    let permissions = state
        .registry
        .permissions_for(user.role)
        .map(|permissions| permissions.granted())
        .unwrap_or_default();

    Ok(Json(CurrentUserResponse {
        full_access: state.registry.is_full_access(user.role),
        permissions,
        user,
    }))
}
