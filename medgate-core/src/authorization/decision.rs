use serde::Serialize;
use thiserror::Error;

use super::role::Role;
use crate::user::User;

/// What a denied request would have needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Roles(Vec<Role>),
    Permission(String),
    Ownership,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Denial {
    #[error("User not found")]
    NotFound,

    #[error("{}", forbidden_message(.requirement))]
    Forbidden {
        requirement: Requirement,
        actual_role: Role,
    },

    #[error("User role not recognized")]
    UnrecognizedRole { actual_role: Role },

    /// The identity store failed. The detail is for logs only.
    #[error("Identity lookup failed")]
    LookupFailed(String),
}

fn forbidden_message(requirement: &Requirement) -> String {
    match requirement {
        Requirement::Roles(roles) => {
            let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
            format!("Require one of these roles: {}", names.join(", "))
        }
        Requirement::Permission(name) => format!("User does not have permission: {name}"),
        Requirement::Ownership => {
            "Access denied. You can only modify your own resources".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthzDecision {
    Allow(User),
    Deny(Denial),
}

impl AuthzDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthzDecision::Allow(_))
    }

    pub fn into_result(self) -> Result<User, Denial> {
        match self {
            AuthzDecision::Allow(user) => Ok(user),
            AuthzDecision::Deny(denial) => Err(denial),
        }
    }
}

impl From<Result<User, Denial>> for AuthzDecision {
    fn from(result: Result<User, Denial>) -> Self {
        match result {
            Ok(user) => AuthzDecision::Allow(user),
            Err(denial) => AuthzDecision::Deny(denial),
        }
    }
}

/// JSON payload sent to clients for a denial
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DenialBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Denial {
    /// HTTP status code that goes with this denial
    pub fn status_code(&self) -> u16 {
        match self {
            Denial::NotFound => 404,
            Denial::Forbidden { .. } | Denial::UnrecognizedRole { .. } => 403,
            Denial::LookupFailed(_) => 500,
        }
    }

    pub fn body(&self) -> DenialBody {
        let mut body = DenialBody {
            message: Some(self.to_string()),
            required_roles: None,
            required_permission: None,
            user_role: None,
            error: None,
        };

        match self {
            Denial::NotFound | Denial::UnrecognizedRole { .. } => {}
            Denial::Forbidden {
                requirement,
                actual_role,
            } => {
                body.user_role = Some(*actual_role);
                match requirement {
                    Requirement::Roles(roles) => body.required_roles = Some(roles.clone()),
                    Requirement::Permission(name) => body.required_permission = Some(name.clone()),
                    Requirement::Ownership => {}
                }
            }
            Denial::LookupFailed(_) => {
                body.error = body.message.take();
            }
        }

        body
    }
}
