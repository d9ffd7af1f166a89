//! Role based access control for the appointment service.
//!
//! The pieces compose in a fixed order: the [`Registry`] maps every [`Role`]
//! to its [`PermissionSet`], an identity lookup produces a [`User`](crate::user::User),
//! and the pure gate functions in [`gates`] turn both into an [`AuthzDecision`].

pub mod decision;
pub mod gates;
pub mod permission;
pub mod registry;
pub mod role;

pub use decision::{AuthzDecision, Denial, DenialBody, Requirement};
pub use gates::{evaluate_ownership, evaluate_permission, evaluate_role};
pub use permission::{Permission, PermissionSet};
pub use registry::{Registry, RegistryError, RegistrySnapshot};
pub use role::{Role, UnknownRole};
