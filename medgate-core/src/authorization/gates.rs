//! Gate predicates over an already resolved user.
//!
//! Each function is a single-shot decision without state. Identity lookup
//! happens before these are called; a missing user never reaches them.

use super::decision::{AuthzDecision, Denial, Requirement};
use super::registry::Registry;
use super::role::Role;
use crate::user::{canonical_id, User};

/// Allow if the user's role is one of `allowed`. Plain membership, no hierarchy.
pub fn evaluate_role(user: User, allowed: &[Role]) -> AuthzDecision {
    if allowed.contains(&user.role) {
        return AuthzDecision::Allow(user);
    }

    AuthzDecision::Deny(Denial::Forbidden {
        requirement: Requirement::Roles(allowed.to_vec()),
        actual_role: user.role,
    })
}

/// Allow if the user's role has full access or the named permission flag.
pub fn evaluate_permission(registry: &Registry, user: User, name: &str) -> AuthzDecision {
    let Some(permissions) = registry.permissions_for(user.role) else {
        return AuthzDecision::Deny(Denial::UnrecognizedRole {
            actual_role: user.role,
        });
    };

    if registry.is_full_access(user.role) || permissions.grants(name) {
        return AuthzDecision::Allow(user);
    }

    AuthzDecision::Deny(Denial::Forbidden {
        requirement: Requirement::Permission(name.to_string()),
        actual_role: user.role,
    })
}

/// Allow admins unconditionally, everybody else only for their own resources.
pub fn evaluate_ownership(registry: &Registry, user: User, owner_id: &str) -> AuthzDecision {
    if registry.is_admin(user.role) {
        return AuthzDecision::Allow(user);
    }

    if user.id.canonical() == canonical_id(owner_id) {
        return AuthzDecision::Allow(user);
    }

    AuthzDecision::Deny(Denial::Forbidden {
        requirement: Requirement::Ownership,
        actual_role: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::{Permission, PermissionSet};

    fn user(id: &str, role: Role) -> User {
        User::new(id, format!("{role}-user"), role)
    }

    /// Every subset of the role list, encoded as a bitmask
    fn role_subsets() -> Vec<Vec<Role>> {
        (0u32..(1 << Role::ALL.len()))
            .map(|mask| {
                Role::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| *role)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_role_gate_is_plain_membership() {
        for allowed in role_subsets() {
            for role in Role::ALL {
                let decision = evaluate_role(user("u1", role), &allowed);
                if allowed.contains(&role) {
                    assert!(decision.is_allowed(), "{role} should pass {allowed:?}");
                } else {
                    assert_eq!(
                        decision,
                        AuthzDecision::Deny(Denial::Forbidden {
                            requirement: Requirement::Roles(allowed.clone()),
                            actual_role: role,
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn test_role_gate_has_no_hierarchy() {
        // A doctor is not a patient, and an admin is not implicitly anything
        assert!(!evaluate_role(user("u1", Role::Doctor), &[Role::Patient]).is_allowed());
        assert!(!evaluate_role(user("u1", Role::Admin), &[Role::Doctor]).is_allowed());
        assert!(
            !evaluate_role(user("u1", Role::PremiumPatient), &[Role::Patient]).is_allowed()
        );
    }

    #[test]
    fn test_role_gate_order_is_irrelevant() {
        let forward = evaluate_role(user("u1", Role::Doctor), &[Role::Doctor, Role::Admin]);
        let backward = evaluate_role(user("u1", Role::Doctor), &[Role::Admin, Role::Doctor]);
        assert!(forward.is_allowed());
        assert!(backward.is_allowed());
    }

    #[test]
    fn test_permission_gate_matches_flags_or_full_access() {
        let registry = Registry::standard();
        for role in Role::ALL {
            let set = registry.permissions_for(role).unwrap();
            for permission in Permission::all() {
                let decision = evaluate_permission(&registry, user("u1", role), permission.as_str());
                let expected = set.allows(permission) || set.full_access;
                assert_eq!(
                    decision.is_allowed(),
                    expected,
                    "{role} / {permission}"
                );
                if !expected {
                    assert_eq!(
                        decision,
                        AuthzDecision::Deny(Denial::Forbidden {
                            requirement: Requirement::Permission(permission.as_str().to_string()),
                            actual_role: role,
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn test_medical_records_scenario() {
        let registry = Registry::standard();
        let check = |role| {
            evaluate_permission(&registry, user("u1", role), "canViewMedicalRecords").is_allowed()
        };

        assert!(!check(Role::Patient));
        assert!(check(Role::PremiumPatient));
        assert!(check(Role::Admin));
        assert!(!check(Role::Doctor));
        assert!(!check(Role::Moderator));
    }

    #[test]
    fn test_full_access_grants_names_without_flag() {
        let registry = Registry::standard();
        let decision = evaluate_permission(&registry, user("a1", Role::Admin), "canExportBilling");
        assert!(decision.is_allowed());

        let decision = evaluate_permission(&registry, user("d1", Role::Doctor), "canExportBilling");
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_role_without_permission_set_is_unrecognized() {
        let registry = Registry::from_entries(
            [(Role::Admin, PermissionSet::default().with_full_access())],
            Role::Admin,
        );

        let decision = evaluate_permission(&registry, user("m1", Role::Moderator), "canBanUsers");
        assert_eq!(
            decision,
            AuthzDecision::Deny(Denial::UnrecognizedRole {
                actual_role: Role::Moderator
            })
        );
    }

    #[test]
    fn test_admin_always_passes_ownership() {
        let registry = Registry::standard();
        for owner in ["u123", "someone-else", "", "65a1f0c2b3d4e5f6a7b8c9d0"] {
            assert!(evaluate_ownership(&registry, user("u456", Role::Admin), owner).is_allowed());
        }
    }

    #[test]
    fn test_ownership_scenario() {
        let registry = Registry::standard();

        assert!(evaluate_ownership(&registry, user("u123", Role::Patient), "u123").is_allowed());
        assert_eq!(
            evaluate_ownership(&registry, user("u456", Role::Patient), "u123"),
            AuthzDecision::Deny(Denial::Forbidden {
                requirement: Requirement::Ownership,
                actual_role: Role::Patient,
            })
        );
        assert!(evaluate_ownership(&registry, user("u456", Role::Admin), "u123").is_allowed());
    }

    #[test]
    fn test_ownership_compares_canonical_ids() {
        let registry = Registry::standard();
        let owner = user("65a1f0c2b3d4e5f6a7b8c9d0", Role::Doctor);

        assert!(evaluate_ownership(&registry, owner.clone(), "65A1F0C2B3D4E5F6A7B8C9D0").is_allowed());
        assert!(evaluate_ownership(&registry, owner.clone(), " 65a1f0c2b3d4e5f6a7b8c9d0").is_allowed());
        assert!(!evaluate_ownership(&registry, owner, "65a1f0c2b3d4e5f6a7b8c9d1").is_allowed());
    }

    #[test]
    fn test_ownership_admin_bypass_follows_registry_designation() {
        let registry = Registry::from_entries(Vec::new(), Role::Moderator);

        assert!(evaluate_ownership(&registry, user("m1", Role::Moderator), "u1").is_allowed());
        assert!(!evaluate_ownership(&registry, user("a1", Role::Admin), "u1").is_allowed());
    }
}
