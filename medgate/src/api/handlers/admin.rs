use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use medgate_core::authorization::Role;
use medgate_core::user::{User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::api::error::AppError;
use crate::app_state::SharedAppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_users: usize,
    pub verified_users: usize,
    pub users_by_role: BTreeMap<Role, usize>,
}

/// `newRole` stays untyped. Anything but an exact role name is an invalid role
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub new_role: Option<serde_json::Value>,
}

impl UpdateRoleRequest {
    fn role(&self) -> Result<Role, AppError> {
        match &self.new_role {
            Some(serde_json::Value::String(name)) => name
                .parse()
                .map_err(|_| AppError::InvalidRole(name.clone())),
            Some(other) => Err(AppError::InvalidRole(other.to_string())),
            None => Err(AppError::InvalidRole(String::new())),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RoleUpdatedResponse {
    pub message: String,
    pub user: User,
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "User statistics", body = DashboardResponse),
        (status = 403, description = "Only admins may see the dashboard"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn dashboard_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.directory.list_users().await?;

    let mut users_by_role: BTreeMap<Role, usize> =
        Role::ALL.iter().map(|role| (*role, 0)).collect();
    for user in &users {
        *users_by_role.entry(user.role).or_default() += 1;
    }

    Ok(Json(DashboardResponse {
        total_users: users.len(),
        verified_users: users.iter().filter(|user| user.is_verified).count(),
        users_by_role,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(("id" = String, Path, description = "User whose role changes")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleUpdatedResponse),
        (status = 400, description = "Unknown role name", body = crate::api::error::InvalidRoleResponse),
        (status = 403, description = "Only admins may change roles"),
        (status = 404, description = "No such user"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn update_role_handler(
    State(state): State<SharedAppState>,
    Extension(admin): Extension<User>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = payload.role()?;

    let user = state
        .directory
        .update_role(&UserId::new(id.as_str()), role)
        .await?
        .ok_or(AppError::UserNotFound(id))?;

    info!("Role of {} changed to {} by {}", user.id, role, admin.id);
    Ok(Json(RoleUpdatedResponse {
        message: format!("User role updated to {role}"),
        user,
    }))
}
