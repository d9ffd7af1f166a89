use axum::{extract::State, response::IntoResponse, Json};
use medgate_core::authorization::RegistrySnapshot;
use serde::Serialize;

use crate::app_state::SharedAppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PermissionMatrixResponse {
    pub message: String,
    #[serde(flatten)]
    pub matrix: RegistrySnapshot,
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/api/rbac/permissions",
    responses(
        (status = 200, description = "Every role and its permission set", body = PermissionMatrixResponse),
        (status = 401, description = "Access token is missing or invalid"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn permission_matrix_handler(State(state): State<SharedAppState>) -> impl IntoResponse {
    Json(PermissionMatrixResponse {
        message: "Complete RBAC Permission Matrix".to_string(),
        matrix: state.registry.snapshot(),
        description: "Use this to understand what each role can do".to_string(),
    })
}
