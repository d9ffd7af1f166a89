use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

use crate::authorization::Role;

const OBJECT_ID_LEN: usize = 24;

/// Normalize an identifier so that different representations of the same id compare equal.
///
/// UUIDs in any accepted notation become lowercase hyphenated, 24 digit hex
/// object ids become lowercase. Anything else is only trimmed and stays case
/// sensitive.
pub fn canonical_id(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();

    if let Ok(uuid) = Uuid::parse_str(trimmed) {
        return Cow::Owned(uuid.hyphenated().to_string());
    }

    if trimmed.len() == OBJECT_ID_LEN && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Cow::Owned(trimmed.to_ascii_lowercase());
    }

    Cow::Borrowed(trimmed)
}

/// Opaque user identifier as handed out by the identity store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn canonical(&self) -> Cow<'_, str> {
        canonical_id(&self.0)
    }

    /// Compare against an id in any representation
    pub fn matches(&self, other: &str) -> bool {
        self.canonical() == canonical_id(other)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<UserId>, username: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: String::new(),
            full_name: String::new(),
            role,
            is_verified: false,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_are_trimmed_but_case_sensitive() {
        assert_eq!(canonical_id(" u123 "), "u123");
        assert_ne!(canonical_id("U123"), canonical_id("u123"));
    }

    #[test]
    fn test_object_ids_ignore_case() {
        assert_eq!(
            canonical_id("65A1F0C2B3D4E5F6A7B8C9D0"),
            canonical_id("65a1f0c2b3d4e5f6a7b8c9d0")
        );
        // 23 characters is not an object id
        assert_eq!(canonical_id("65A1F0C2B3D4E5F6A7B8C9D"), "65A1F0C2B3D4E5F6A7B8C9D");
    }

    #[test]
    fn test_uuid_notations_are_equal() {
        let uuid = Uuid::new_v4();
        let hyphenated = uuid.hyphenated().to_string();
        let simple = uuid.simple().to_string();
        let braced = uuid.braced().to_string().to_uppercase();
        let urn = uuid.urn().to_string();

        let id = UserId::from(uuid);
        assert!(id.matches(&hyphenated));
        assert!(id.matches(&simple));
        assert!(id.matches(&braced));
        assert!(id.matches(&urn));
        assert!(!id.matches(&Uuid::new_v4().to_string()));
    }

    #[test]
    fn test_user_deserializes_with_defaults() {
        let user: User =
            serde_json::from_str(r#"{"id": "u1", "username": "jane", "role": "doctor"}"#).unwrap();

        assert_eq!(user.id, UserId::new("u1"));
        assert_eq!(user.role, Role::Doctor);
        assert!(!user.is_verified);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_user_rejects_unknown_role() {
        let result: Result<User, _> =
            serde_json::from_str(r#"{"id": "u1", "username": "jane", "role": "superuser"}"#);
        assert!(result.is_err());
    }
}
