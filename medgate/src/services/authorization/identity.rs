use medgate_core::authorization::Denial;
use medgate_core::user::{User, UserId};
use thiserror::Error;
use tracing::error;

use crate::services::directory::SharedUserDirectory;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("User not found")]
    NotFound,

    #[error("Identity lookup failed: {0}")]
    LookupFailed(String),
}

impl From<ResolveError> for Denial {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound => Denial::NotFound,
            ResolveError::LookupFailed(detail) => Denial::LookupFailed(detail),
        }
    }
}

/// Loads the acting user for an authenticated identifier
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    directory: SharedUserDirectory,
}

impl IdentityResolver {
    pub fn new(directory: SharedUserDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &SharedUserDirectory {
        &self.directory
    }

    /// Single lookup, no retry and no caching
    pub async fn resolve(&self, id: &UserId) -> Result<User, ResolveError> {
        match self.directory.find_user_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(ResolveError::NotFound),
            Err(e) => {
                error!("Identity lookup for '{}' failed: {}", id, e);
                Err(ResolveError::LookupFailed(e.to_string()))
            }
        }
    }
}
