use async_trait::async_trait;
use medgate_core::authorization::Role;
use medgate_core::user::{User, UserId};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{DirectoryError, ProfileUpdate, UserDirectory};

#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<User>,
}

/// User directory kept in memory, keyed by canonical user id
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries with the same canonical id replace earlier ones
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut map = HashMap::new();
        for user in users {
            let key = user.id.canonical().into_owned();
            if let Some(previous) = map.insert(key, user) {
                warn!("Duplicate user id '{}' in directory, keeping the last entry", previous.id);
            }
        }
        Self {
            users: RwLock::new(map),
        }
    }

    /// Load users from a YAML file with a top level `users` list
    pub async fn load_from_file(path: &str) -> Result<Self, DirectoryError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DirectoryError::Io {
                path: path.to_string(),
                source,
            })?;

        Self::from_yaml(&content).map_err(|source| DirectoryError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_norway::Error> {
        let file: UsersFile = serde_norway::from_str(content)?;
        Ok(Self::from_users(file.users))
    }

    pub async fn insert(&self, user: User) {
        let key = user.id.canonical().into_owned();
        self.users.write().await.insert(key, user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let users = self.users.read().await;
        let user = users.get(id.canonical().as_ref()).cloned();
        debug!("Directory lookup for '{}': found={}", id, user.is_some());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users.values().cloned().collect();
        list.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(list)
    }

    async fn update_role(&self, id: &UserId, role: Role) -> Result<Option<User>, DirectoryError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(id.canonical().as_ref()).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, DirectoryError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(id.canonical().as_ref()).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }

    async fn remove_user(&self, id: &UserId) -> Result<bool, DirectoryError> {
        let mut users = self.users.write().await;
        Ok(users.remove(id.canonical().as_ref()).is_some())
    }
}
