//! medgate library
//!
//! The binary only wires these modules together; the router and test
//! utilities are public for the integration tests.

pub mod api;
pub mod app_state;
pub mod http;
pub mod init_telemetry;
pub mod services;
pub mod settings;
pub mod stop_flag;

pub use app_state::{AppState, SharedAppState};
