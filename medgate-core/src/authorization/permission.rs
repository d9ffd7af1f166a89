use serde::{Deserialize, Serialize};
use std::fmt;

/// Named capability that can be granted to a role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    CanViewOwnProfile,
    CanUpdateOwnProfile,
    CanBookAppointment,
    CanViewOwnAppointments,
    CanCancelOwnAppointments,
    CanViewMedicalRecords,
    CanDeleteAppointment,
    CanDeleteUsers,
    CanManageUsers,
    CanAccessReports,
    CanBanUsers,
    CanModerateContent,
    PremiumFeatures,
    CanViewAppointments,
    CanManageAppointments,
    CanViewPatientRecords,
    CanCreateRecords,
    CanViewAllUsers,
}

impl Permission {
    /// Get all available permissions in display order
    pub fn all() -> Vec<Permission> {
        vec![
            Permission::CanViewOwnProfile,
            Permission::CanUpdateOwnProfile,
            Permission::CanBookAppointment,
            Permission::CanViewOwnAppointments,
            Permission::CanCancelOwnAppointments,
            Permission::CanViewMedicalRecords,
            Permission::CanDeleteAppointment,
            Permission::CanDeleteUsers,
            Permission::CanManageUsers,
            Permission::CanAccessReports,
            Permission::CanBanUsers,
            Permission::CanModerateContent,
            Permission::PremiumFeatures,
            Permission::CanViewAppointments,
            Permission::CanManageAppointments,
            Permission::CanViewPatientRecords,
            Permission::CanCreateRecords,
            Permission::CanViewAllUsers,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CanViewOwnProfile => "canViewOwnProfile",
            Permission::CanUpdateOwnProfile => "canUpdateOwnProfile",
            Permission::CanBookAppointment => "canBookAppointment",
            Permission::CanViewOwnAppointments => "canViewOwnAppointments",
            Permission::CanCancelOwnAppointments => "canCancelOwnAppointments",
            Permission::CanViewMedicalRecords => "canViewMedicalRecords",
            Permission::CanDeleteAppointment => "canDeleteAppointment",
            Permission::CanDeleteUsers => "canDeleteUsers",
            Permission::CanManageUsers => "canManageUsers",
            Permission::CanAccessReports => "canAccessReports",
            Permission::CanBanUsers => "canBanUsers",
            Permission::CanModerateContent => "canModerateContent",
            Permission::PremiumFeatures => "premiumFeatures",
            Permission::CanViewAppointments => "canViewAppointments",
            Permission::CanManageAppointments => "canManageAppointments",
            Permission::CanViewPatientRecords => "canViewPatientRecords",
            Permission::CanCreateRecords => "canCreateRecords",
            Permission::CanViewAllUsers => "canViewAllUsers",
        }
    }

    /// Look up a permission by its wire name. Names are case sensitive.
    pub fn from_name(name: &str) -> Option<Permission> {
        Permission::all().into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities of a single role.
///
/// Every [`Permission`] has its own flag; `full_access` grants everything,
/// including names that have no flag at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionSet {
    pub can_view_own_profile: bool,
    pub can_update_own_profile: bool,
    pub can_book_appointment: bool,
    pub can_view_own_appointments: bool,
    pub can_cancel_own_appointments: bool,
    pub can_view_medical_records: bool,
    pub can_delete_appointment: bool,
    pub can_delete_users: bool,
    pub can_manage_users: bool,
    pub can_access_reports: bool,
    pub can_ban_users: bool,
    pub can_moderate_content: bool,
    pub premium_features: bool,
    pub can_view_appointments: bool,
    pub can_manage_appointments: bool,
    pub can_view_patient_records: bool,
    pub can_create_records: bool,
    pub can_view_all_users: bool,
    pub full_access: bool,
}

impl PermissionSet {
    /// Build a set that grants exactly the given permissions
    pub fn granting(permissions: &[Permission]) -> Self {
        let mut set = PermissionSet::default();
        for permission in permissions {
            *set.flag_mut(*permission) = true;
        }
        set
    }

    pub fn with_full_access(mut self) -> Self {
        self.full_access = true;
        self
    }

    /// Value of the individual flag, ignoring `full_access`
    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::CanViewOwnProfile => self.can_view_own_profile,
            Permission::CanUpdateOwnProfile => self.can_update_own_profile,
            Permission::CanBookAppointment => self.can_book_appointment,
            Permission::CanViewOwnAppointments => self.can_view_own_appointments,
            Permission::CanCancelOwnAppointments => self.can_cancel_own_appointments,
            Permission::CanViewMedicalRecords => self.can_view_medical_records,
            Permission::CanDeleteAppointment => self.can_delete_appointment,
            Permission::CanDeleteUsers => self.can_delete_users,
            Permission::CanManageUsers => self.can_manage_users,
            Permission::CanAccessReports => self.can_access_reports,
            Permission::CanBanUsers => self.can_ban_users,
            Permission::CanModerateContent => self.can_moderate_content,
            Permission::PremiumFeatures => self.premium_features,
            Permission::CanViewAppointments => self.can_view_appointments,
            Permission::CanManageAppointments => self.can_manage_appointments,
            Permission::CanViewPatientRecords => self.can_view_patient_records,
            Permission::CanCreateRecords => self.can_create_records,
            Permission::CanViewAllUsers => self.can_view_all_users,
        }
    }

    /// Whether the permission called `name` is granted.
    ///
    /// `full_access` is checked before the name is even looked up, so a
    /// full access set grants names that are not known permissions.
    pub fn grants(&self, name: &str) -> bool {
        if self.full_access {
            return true;
        }
        Permission::from_name(name).is_some_and(|permission| self.allows(permission))
    }

    /// Permissions whose individual flag is set
    pub fn granted(&self) -> Vec<Permission> {
        Permission::all()
            .into_iter()
            .filter(|p| self.allows(*p))
            .collect()
    }

    fn flag_mut(&mut self, permission: Permission) -> &mut bool {
        match permission {
            Permission::CanViewOwnProfile => &mut self.can_view_own_profile,
            Permission::CanUpdateOwnProfile => &mut self.can_update_own_profile,
            Permission::CanBookAppointment => &mut self.can_book_appointment,
            Permission::CanViewOwnAppointments => &mut self.can_view_own_appointments,
            Permission::CanCancelOwnAppointments => &mut self.can_cancel_own_appointments,
            Permission::CanViewMedicalRecords => &mut self.can_view_medical_records,
            Permission::CanDeleteAppointment => &mut self.can_delete_appointment,
            Permission::CanDeleteUsers => &mut self.can_delete_users,
            Permission::CanManageUsers => &mut self.can_manage_users,
            Permission::CanAccessReports => &mut self.can_access_reports,
            Permission::CanBanUsers => &mut self.can_ban_users,
            Permission::CanModerateContent => &mut self.can_moderate_content,
            Permission::PremiumFeatures => &mut self.premium_features,
            Permission::CanViewAppointments => &mut self.can_view_appointments,
            Permission::CanManageAppointments => &mut self.can_manage_appointments,
            Permission::CanViewPatientRecords => &mut self.can_view_patient_records,
            Permission::CanCreateRecords => &mut self.can_create_records,
            Permission::CanViewAllUsers => &mut self.can_view_all_users,
        }
    }
}
