//! Authorization service for medgate
//!
//! Resolves the acting user through the configured directory and evaluates
//! the role, permission and ownership gates from `medgate_core`.

pub mod gatekeeper;
pub mod identity;

#[cfg(test)]
mod tests;

pub use gatekeeper::Gatekeeper;
pub use identity::{IdentityResolver, ResolveError};
