pub mod auth_core;
pub mod basic_auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod test_utils;
