pub mod admin;
pub mod appointments;
pub mod content;
pub mod health;
pub mod info;
pub mod me;
pub mod profile;
pub mod rbac;
pub mod records;
pub mod users;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
