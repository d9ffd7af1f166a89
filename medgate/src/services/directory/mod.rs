//! Identity storage backends.
//!
//! The authorization core only ever reads users through [`UserDirectory`];
//! the management calls exist for the admin routes.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use medgate_core::authorization::Role;
use medgate_core::settings::directory::{DirectoryBackend, DirectorySettings};
use medgate_core::user::{User, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use self::http::HttpUserDirectory;
pub use memory::InMemoryUserDirectory;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("User service unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected response from user service: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read users file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse users file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_norway::Error,
    },

    #[error("Invalid user directory configuration: {0}")]
    Configuration(String),
}

/// Profile fields a user may change; absent fields stay untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
    }
}

#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug {
    /// `Ok(None)` means the lookup worked and there is no such user
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;

    async fn list_users(&self) -> Result<Vec<User>, DirectoryError>;

    /// Returns the updated user, `None` if it does not exist
    async fn update_role(&self, id: &UserId, role: Role) -> Result<Option<User>, DirectoryError>;

    /// Returns the updated user, `None` if it does not exist
    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DirectoryError>;

    /// Returns whether a user was removed
    async fn remove_user(&self, id: &UserId) -> Result<bool, DirectoryError>;
}

pub type SharedUserDirectory = Arc<dyn UserDirectory>;

/// Create the directory backend selected in the settings
pub async fn create_user_directory(
    settings: &DirectorySettings,
) -> Result<SharedUserDirectory, DirectoryError> {
    match settings.backend {
        DirectoryBackend::File => {
            let directory = InMemoryUserDirectory::load_from_file(&settings.users_file).await?;
            info!(
                "Loaded {} users from {}",
                directory.len().await,
                settings.users_file
            );
            Ok(Arc::new(directory))
        }
        DirectoryBackend::Http => {
            let base_url = settings.base_url.as_deref().ok_or_else(|| {
                DirectoryError::Configuration(
                    "directory.base_url is required for the http backend".to_string(),
                )
            })?;
            let directory = HttpUserDirectory::new(
                base_url,
                std::time::Duration::from_secs(settings.timeout_seconds),
            )?;
            info!("Using remote user service at {}", base_url);
            Ok(Arc::new(directory))
        }
    }
}
