use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use medgate_core::authorization::{Denial, Role};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::directory::DirectoryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    Denied(#[from] Denial),

    #[error("Invalid role")]
    InvalidRole(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User directory unavailable")]
    Directory(#[from] DirectoryError),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// Body of every non authorization error
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

/// Body returned for an unknown role name
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRoleResponse {
    pub message: String,
    pub valid_roles: Vec<Role>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Denied(denial) => StatusCode::from_u16(denial.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::InvalidRole(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Directory(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::InternalServerError(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Denied(denial) => (status, Json(denial.body())).into_response(),
            AppError::InvalidRole(requested) => {
                tracing::debug!("Rejected unknown role '{}'", requested);
                let body = InvalidRoleResponse {
                    message: self.to_string(),
                    valid_roles: Role::ALL.to_vec(),
                };
                (status, Json(body)).into_response()
            }
            _ => {
                if let AppError::Directory(e) = &self {
                    error!("User directory request failed: {}", e);
                }
                let body = ErrorResponse {
                    error: true,
                    message: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use medgate_core::authorization::Requirement;
    use serde_json::{json, Value};

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_denial_keeps_structured_body() {
        let (status, body) = render(AppError::from(Denial::Forbidden {
            requirement: Requirement::Roles(vec![Role::Admin]),
            actual_role: Role::Doctor,
        }))
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({
                "message": "Require one of these roles: admin",
                "requiredRoles": ["admin"],
                "userRole": "doctor",
            })
        );
    }

    #[test]
    fn test_denied_status_follows_the_denial() {
        let cases = [
            (Denial::NotFound, StatusCode::NOT_FOUND),
            (
                Denial::UnrecognizedRole {
                    actual_role: Role::Doctor,
                },
                StatusCode::FORBIDDEN,
            ),
            (
                Denial::LookupFailed("timeout".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (denial, expected) in cases {
            assert_eq!(AppError::Denied(denial).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_renders_generic_error() {
        let (status, body) = render(Denial::LookupFailed("db timeout".to_string()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Identity lookup failed"}));
    }

    #[tokio::test]
    async fn test_invalid_role_lists_valid_roles() {
        let (status, body) = render(AppError::InvalidRole("superuser".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "message": "Invalid role",
                "validRoles": ["patient", "premium_patient", "doctor", "moderator", "admin"],
            })
        );
    }

    #[tokio::test]
    async fn test_unauthorized_uses_error_flag_format() {
        let (status, body) = render(AppError::Unauthorized).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({"error": true, "message": "Authentication required"})
        );
    }

    #[tokio::test]
    async fn test_directory_error_hides_detail() {
        let (status, body) = render(AppError::Directory(DirectoryError::Unavailable(
            "10.0.0.3 refused".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "User directory unavailable");
    }
}
