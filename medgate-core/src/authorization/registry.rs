use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use super::permission::{Permission, PermissionSet};
use super::role::Role;

static STANDARD: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::standard()));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Roles without permission set: {0:?}")]
    MissingRoles(Vec<Role>),
}

/// Read-only table from role to permission set.
///
/// Built once at start-up and shared through an `Arc`; there is no way to
/// mutate it afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    permissions: BTreeMap<Role, PermissionSet>,
    admin_role: Role,
}

/// Serializable export of the registry for diagnostics
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct RegistrySnapshot {
    pub roles: BTreeMap<String, Role>,
    pub permissions: BTreeMap<Role, PermissionSet>,
}

impl Registry {
    /// The process-wide standard registry
    pub fn shared() -> Arc<Registry> {
        STANDARD.clone()
    }

    /// The permission matrix of the appointment service
    pub fn standard() -> Self {
        Self::from_entries(
            Role::ALL.map(|role| (role, standard_permissions(role))),
            Role::Admin,
        )
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (Role, PermissionSet)>,
        admin_role: Role,
    ) -> Self {
        Self {
            permissions: entries.into_iter().collect(),
            admin_role,
        }
    }

    pub fn permissions_for(&self, role: Role) -> Option<&PermissionSet> {
        self.permissions.get(&role)
    }

    pub fn all_roles(&self) -> &'static [Role] {
        &Role::ALL
    }

    /// Single place deciding whether a role bypasses individual permission flags
    pub fn is_full_access(&self, role: Role) -> bool {
        self.permissions_for(role)
            .is_some_and(|permissions| permissions.full_access)
    }

    pub fn admin_role(&self) -> Role {
        self.admin_role
    }

    pub fn is_admin(&self, role: Role) -> bool {
        role == self.admin_role
    }

    /// Check that every role has a permission set
    pub fn validate(&self) -> Result<(), RegistryError> {
        let missing: Vec<Role> = self
            .all_roles()
            .iter()
            .filter(|role| !self.permissions.contains_key(role))
            .copied()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::MissingRoles(missing))
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            roles: self
                .all_roles()
                .iter()
                .map(|role| (role.constant_name().to_string(), *role))
                .collect(),
            permissions: self.permissions.clone(),
        }
    }
}

fn standard_permissions(role: Role) -> PermissionSet {
    use Permission::*;

    match role {
        Role::Patient => PermissionSet::granting(&[
            CanViewOwnProfile,
            CanUpdateOwnProfile,
            CanBookAppointment,
            CanViewOwnAppointments,
            CanCancelOwnAppointments,
        ]),
        Role::PremiumPatient => PermissionSet::granting(&[
            CanViewOwnProfile,
            CanUpdateOwnProfile,
            CanBookAppointment,
            CanViewOwnAppointments,
            CanCancelOwnAppointments,
            CanViewMedicalRecords,
            PremiumFeatures,
        ]),
        Role::Doctor => PermissionSet::granting(&[
            CanViewOwnProfile,
            CanUpdateOwnProfile,
            CanViewAppointments,
            CanManageAppointments,
            CanViewPatientRecords,
            CanCreateRecords,
        ]),
        Role::Moderator => PermissionSet::granting(&[
            CanViewOwnProfile,
            CanUpdateOwnProfile,
            CanViewAllUsers,
            CanModerateContent,
            CanBanUsers,
            CanAccessReports,
        ]),
        // No explicit medical records flag, admins get it through full access.
        Role::Admin => PermissionSet::granting(&[
            CanViewOwnProfile,
            CanUpdateOwnProfile,
            CanDeleteAppointment,
            CanDeleteUsers,
            CanManageUsers,
            CanAccessReports,
            CanBanUsers,
            CanModerateContent,
            CanViewAllUsers,
        ])
        .with_full_access(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_every_role() {
        let registry = Registry::standard();
        assert_eq!(registry.validate(), Ok(()));
        for role in Role::ALL {
            assert!(registry.permissions_for(role).is_some(), "{role} missing");
        }
    }

    #[test]
    fn test_only_admin_has_full_access() {
        let registry = Registry::standard();
        for role in Role::ALL {
            assert_eq!(registry.is_full_access(role), role == Role::Admin);
        }
        assert!(registry.is_admin(Role::Admin));
        assert!(!registry.is_admin(Role::Moderator));
    }

    #[test]
    fn test_standard_matrix_highlights() {
        let registry = Registry::standard();
        let perms = |role| registry.permissions_for(role).unwrap();

        assert!(!perms(Role::Patient).can_view_medical_records);
        assert!(perms(Role::PremiumPatient).can_view_medical_records);
        assert!(perms(Role::PremiumPatient).premium_features);
        assert!(!perms(Role::Admin).can_view_medical_records);
        assert!(perms(Role::Doctor).can_create_records);
        assert!(!perms(Role::Doctor).can_book_appointment);
        assert!(perms(Role::Moderator).can_ban_users);
        assert!(!perms(Role::Moderator).can_delete_users);
        assert!(perms(Role::Admin).can_delete_users);
    }

    #[test]
    fn test_missing_role_is_reported_not_panicking() {
        let registry = Registry::from_entries(
            [(Role::Admin, PermissionSet::default().with_full_access())],
            Role::Admin,
        );

        assert!(registry.permissions_for(Role::Doctor).is_none());
        assert!(!registry.is_full_access(Role::Doctor));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::MissingRoles(vec![
                Role::Patient,
                Role::PremiumPatient,
                Role::Doctor,
                Role::Moderator,
            ]))
        );
    }

    #[test]
    fn test_shared_registry_is_a_single_instance() {
        let a = Registry::shared();
        let b = Registry::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_snapshot_export_shape() {
        let snapshot = Registry::standard().snapshot();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["roles"]["PREMIUM_PATIENT"], "premium_patient");
        assert_eq!(value["roles"].as_object().unwrap().len(), 5);
        assert_eq!(value["permissions"]["admin"]["fullAccess"], true);
        assert_eq!(value["permissions"]["patient"]["canBookAppointment"], true);
        assert_eq!(value["permissions"]["patient"]["canViewMedicalRecords"], false);
    }

    #[test]
    fn test_snapshot_renders_as_yaml() {
        let yaml = serde_norway::to_string(&Registry::standard().snapshot()).unwrap();

        assert!(yaml.contains("PREMIUM_PATIENT: premium_patient"));
        assert!(yaml.contains("fullAccess: true"));
    }
}
