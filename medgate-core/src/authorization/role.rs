use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed category assigned to every user.
///
/// Roles are flat and disjoint: no role implies another one. What a role may
/// do is listed explicitly in its [`PermissionSet`](super::PermissionSet).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    PremiumPatient,
    Doctor,
    Moderator,
    Admin,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Patient,
        Role::PremiumPatient,
        Role::Doctor,
        Role::Moderator,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::PremiumPatient => "premium_patient",
            Role::Doctor => "doctor",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Upper case key used in the exported role table, e.g. `PREMIUM_PATIENT`
    pub fn constant_name(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::PremiumPatient => "PREMIUM_PATIENT",
            Role::Doctor => "DOCTOR",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
