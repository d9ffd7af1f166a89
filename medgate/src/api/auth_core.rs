use medgate_core::settings::api_server::AuthMode;
use medgate_core::user::UserId;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::app_state::SharedAppState;

/// Identity established by the auth middleware, before any directory lookup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
}

/// Authenticate a request from its `Authorization` header value.
///
/// The `Bearer ` prefix is optional. In development mode the header is
/// ignored and every request acts as the configured dev user.
pub fn authenticate_user_from_header(
    state: &SharedAppState,
    header: Option<&str>,
) -> Option<AuthenticatedUser> {
    match state.settings.api.auth_mode {
        AuthMode::Development => Some(authenticate_dev_user(state)),
        AuthMode::Bearer => {
            let Some(header) = header else {
                warn!("Missing Authorization header in bearer mode");
                return None;
            };
            let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
            authorize_bearer_user(state, token)
        }
    }
}

pub fn authenticate_dev_user(state: &SharedAppState) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(state.settings.api.dev_user_id()),
    }
}

pub fn authorize_bearer_user(state: &SharedAppState, token: &str) -> Option<AuthenticatedUser> {
    match find_token_identifier(state, token) {
        Some(user_id) => {
            debug!("Bearer token belongs to user '{}'", user_id);
            Some(AuthenticatedUser {
                id: UserId::new(user_id),
            })
        }
        None => {
            warn!(
                "Bearer token authentication failed, token not configured (starts with: {}...)",
                token.chars().take(4).collect::<String>()
            );
            None
        }
    }
}

/// Reverse lookup of the user id owning `token`.
///
/// Every configured token is compared in constant time, without early exit.
fn find_token_identifier(state: &SharedAppState, token: &str) -> Option<String> {
    let mut found = None;
    for (user_id, configured_token) in &state.settings.api.bearer_tokens {
        if bool::from(token.as_bytes().ct_eq(configured_token.expose_secret().as_bytes())) {
            found = Some(user_id.clone());
        }
    }
    found
}
