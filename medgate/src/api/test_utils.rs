//! Shared helpers for API tests
//!
//! Exposed publicly so the integration tests under `tests/` can build the
//! same state as the unit tests.

#![allow(dead_code)]

use axum::http::HeaderValue;
use config::{Config, FileFormat};
use medgate_core::authorization::Role;
use medgate_core::user::User;
use std::sync::Arc;

use crate::app_state::{AppState, SharedAppState};
use crate::services::directory::InMemoryUserDirectory;
use crate::settings::config::Settings;

pub const BEARER_CONFIG: &str = r#"
api:
  bind_address: "127.0.0.1:0"
  auth_mode: bearer
  bearer_tokens:
    u123: "patient-token"
    u456: "other-patient-token"
    p789: "premium-token"
    d100: "doctor-token"
    m200: "moderator-token"
    a456: "admin-token"
    ghost: "ghost-token"
"#;

pub const DEV_CONFIG: &str = r#"
api:
  bind_address: "127.0.0.1:0"
  auth_mode: dev
  dev_user_id: "a456"
"#;

/// Users matching the tokens in [`BEARER_CONFIG`]; `ghost` is deliberately missing
pub fn test_users() -> Vec<User> {
    vec![
        User::new("u123", "john", Role::Patient),
        User::new("u456", "jane", Role::Patient),
        User::new("p789", "pat", Role::PremiumPatient),
        User::new("d100", "house", Role::Doctor),
        User::new("m200", "mod", Role::Moderator),
        User::new("a456", "admin", Role::Admin),
    ]
}

pub fn settings_from_yaml(yaml: &str) -> Settings {
    let config = Config::builder()
        .add_source(config::File::from_str(yaml, FileFormat::Yaml))
        .build()
        .unwrap();
    Settings::from_config(config).unwrap()
}

pub async fn create_test_app_state() -> SharedAppState {
    create_test_app_state_with_config(BEARER_CONFIG).await
}

pub async fn create_test_app_state_with_config(yaml: &str) -> SharedAppState {
    let directory = Arc::new(InMemoryUserDirectory::from_users(test_users()));
    AppState::with_directory(settings_from_yaml(yaml), directory)
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}
