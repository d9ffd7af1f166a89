use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::secret::MaskedSecret;

pub const DEFAULT_DEV_USER_ID: &str = "dev-admin";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum AuthMode {
    #[serde(rename = "dev")]
    Development,
    #[serde(rename = "bearer")]
    #[default]
    Bearer,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Development => "dev",
            AuthMode::Bearer => "bearer",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct ApiServer {
    pub bind_address: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
    /// User every request acts as in development mode
    pub dev_user_id: Option<String>,
    /// Maps a user id to the bearer token that authenticates it
    #[serde(default)]
    pub bearer_tokens: HashMap<String, MaskedSecret>,
}

impl Default for ApiServer {
    fn default() -> Self {
        ApiServer {
            bind_address: "0.0.0.0:3000".to_string(),
            auth_mode: AuthMode::default(),
            dev_user_id: Some(DEFAULT_DEV_USER_ID.to_string()),
            bearer_tokens: HashMap::new(),
        }
    }
}

impl ApiServer {
    pub fn dev_user_id(&self) -> &str {
        self.dev_user_id.as_deref().unwrap_or(DEFAULT_DEV_USER_ID)
    }
}
