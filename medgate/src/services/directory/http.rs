use async_trait::async_trait;
use medgate_core::authorization::Role;
use medgate_core::user::{User, UserId};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{DirectoryError, ProfileUpdate, UserDirectory};

/// Reads users from a remote user service.
///
/// Expected endpoints, relative to the base url:
/// `GET users`, `GET users/{id}`, `PATCH users/{id}` with `{"role": ...}` or
/// profile fields, and `DELETE users/{id}`. A 404 means the user does not exist.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DirectoryError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| DirectoryError::Configuration(format!("invalid base url: {e}")))?;
        // Url::join drops the last path segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    fn users_url(&self, id: Option<&UserId>) -> Result<Url, DirectoryError> {
        let mut url = self
            .base_url
            .join("users")
            .map_err(|e| DirectoryError::Configuration(e.to_string()))?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| DirectoryError::Configuration("base url cannot be a base".into()))?
                .push(id.as_str());
        }
        Ok(url)
    }

    async fn patch_user<B: serde::Serialize + Sync>(
        &self,
        id: &UserId,
        body: &B,
    ) -> Result<Option<User>, DirectoryError> {
        let response = self
            .client
            .patch(self.users_url(Some(id))?)
            .json(body)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<User>().await?)),
            status => Err(Self::unexpected(status)),
        }
    }

    fn unexpected(status: StatusCode) -> DirectoryError {
        if status.is_server_error() {
            DirectoryError::Unavailable(format!("status {status}"))
        } else {
            DirectoryError::InvalidResponse(format!("status {status}"))
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let url = self.users_url(Some(id))?;
        debug!("Fetching user from {}", url);

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<User>().await?)),
            status => Err(Self::unexpected(status)),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        let response = self.client.get(self.users_url(None)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::unexpected(status));
        }
        Ok(response.json::<Vec<User>>().await?)
    }

    async fn update_role(&self, id: &UserId, role: Role) -> Result<Option<User>, DirectoryError> {
        self.patch_user(id, &serde_json::json!({ "role": role })).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DirectoryError> {
        self.patch_user(id, update).await
    }

    async fn remove_user(&self, id: &UserId) -> Result<bool, DirectoryError> {
        let response = self.client.delete(self.users_url(Some(id))?).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(Self::unexpected(status)),
        }
    }
}
