use super::{Gatekeeper, ResolveError};
use crate::services::directory::{
    DirectoryError, InMemoryUserDirectory, ProfileUpdate, UserDirectory,
};
use async_trait::async_trait;
use medgate_core::authorization::{
    AuthzDecision, Denial, PermissionSet, Registry, Requirement, Role,
};
use medgate_core::user::{User, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Directory whose backing store is down
#[derive(Debug, Default)]
struct BrokenDirectory {
    calls: AtomicUsize,
}

#[async_trait]
impl UserDirectory for BrokenDirectory {
    async fn find_user_by_id(&self, _id: &UserId) -> Result<Option<User>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    async fn update_role(&self, _id: &UserId, _role: Role) -> Result<Option<User>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    async fn update_profile(
        &self,
        _id: &UserId,
        _update: &ProfileUpdate,
    ) -> Result<Option<User>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    async fn remove_user(&self, _id: &UserId) -> Result<bool, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }
}

fn create_test_directory() -> Arc<InMemoryUserDirectory> {
    Arc::new(InMemoryUserDirectory::from_users(
        Role::ALL
            .iter()
            .map(|role| User::new(format!("{role}-1"), role.as_str(), *role))
            .chain([
                User::new("u123", "john", Role::Patient),
                User::new("u456", "jane", Role::Patient),
                User::new("a456", "root", Role::Admin),
            ]),
    ))
}

fn create_test_gatekeeper() -> Gatekeeper {
    Gatekeeper::new(Registry::shared(), create_test_directory())
}

fn id(raw: &str) -> UserId {
    UserId::new(raw)
}

#[tokio::test]
async fn test_role_gate_allows_members_only() {
    let gatekeeper = create_test_gatekeeper();
    let allowed = [Role::Doctor, Role::Admin];

    for role in Role::ALL {
        let decision = gatekeeper
            .check_role(&id(&format!("{role}-1")), &allowed)
            .await;
        if allowed.contains(&role) {
            match decision {
                AuthzDecision::Allow(user) => assert_eq!(user.role, role),
                other => panic!("{role} should be allowed, got {other:?}"),
            }
        } else {
            assert_eq!(
                decision,
                AuthzDecision::Deny(Denial::Forbidden {
                    requirement: Requirement::Roles(allowed.to_vec()),
                    actual_role: role,
                })
            );
        }
    }
}

#[tokio::test]
async fn test_permission_gate_medical_records_scenario() {
    let gatekeeper = create_test_gatekeeper();

    let patient = gatekeeper
        .check_permission(&id("patient-1"), "canViewMedicalRecords")
        .await;
    assert_eq!(
        patient,
        AuthzDecision::Deny(Denial::Forbidden {
            requirement: Requirement::Permission("canViewMedicalRecords".to_string()),
            actual_role: Role::Patient,
        })
    );

    assert!(gatekeeper
        .check_permission(&id("premium_patient-1"), "canViewMedicalRecords")
        .await
        .is_allowed());
    assert!(gatekeeper
        .check_permission(&id("admin-1"), "canViewMedicalRecords")
        .await
        .is_allowed());
}

#[tokio::test]
async fn test_ownership_gate_scenario() {
    let gatekeeper = create_test_gatekeeper();

    assert!(gatekeeper
        .check_ownership_or_admin(&id("u123"), "u123")
        .await
        .is_allowed());
    assert_eq!(
        gatekeeper.check_ownership_or_admin(&id("u456"), "u123").await,
        AuthzDecision::Deny(Denial::Forbidden {
            requirement: Requirement::Ownership,
            actual_role: Role::Patient,
        })
    );
    assert!(gatekeeper
        .check_ownership_or_admin(&id("a456"), "u123")
        .await
        .is_allowed());
}

#[tokio::test]
async fn test_unknown_user_is_not_found_from_every_gate() {
    let gatekeeper = create_test_gatekeeper();
    let ghost = id("ghost");

    assert_eq!(
        gatekeeper.check_role(&ghost, &Role::ALL).await,
        AuthzDecision::Deny(Denial::NotFound)
    );
    assert_eq!(
        gatekeeper.check_permission(&ghost, "canViewOwnProfile").await,
        AuthzDecision::Deny(Denial::NotFound)
    );
    assert_eq!(
        gatekeeper.check_ownership_or_admin(&ghost, "ghost").await,
        AuthzDecision::Deny(Denial::NotFound)
    );
}

#[tokio::test]
async fn test_role_missing_from_registry_is_unrecognized() {
    let registry = Registry::from_entries(
        [
            (Role::Admin, PermissionSet::default().with_full_access()),
            (Role::Patient, PermissionSet::default()),
        ],
        Role::Admin,
    );
    let gatekeeper = Gatekeeper::new(Arc::new(registry), create_test_directory());

    assert_eq!(
        gatekeeper
            .check_permission(&id("doctor-1"), "canCreateRecords")
            .await,
        AuthzDecision::Deny(Denial::UnrecognizedRole {
            actual_role: Role::Doctor
        })
    );
    // The role gate does not consult the permission table
    assert!(gatekeeper
        .check_role(&id("doctor-1"), &[Role::Doctor])
        .await
        .is_allowed());
}

#[tokio::test]
async fn test_lookup_failure_is_reported_once_without_retry() {
    let directory = Arc::new(BrokenDirectory::default());
    let gatekeeper = Gatekeeper::new(Registry::shared(), directory.clone());

    let decision = gatekeeper.check_role(&id("u1"), &[Role::Patient]).await;
    match decision {
        AuthzDecision::Deny(Denial::LookupFailed(detail)) => {
            assert!(detail.contains("connection refused"));
        }
        other => panic!("expected lookup failure, got {other:?}"),
    }
    assert_eq!(directory.calls.load(Ordering::SeqCst), 1);

    assert!(matches!(
        gatekeeper.check_permission(&id("u1"), "canBanUsers").await,
        AuthzDecision::Deny(Denial::LookupFailed(_))
    ));
    assert!(matches!(
        gatekeeper.check_ownership_or_admin(&id("u1"), "u1").await,
        AuthzDecision::Deny(Denial::LookupFailed(_))
    ));
    assert_eq!(directory.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_resolver_distinguishes_not_found_and_failure() {
    let gatekeeper = create_test_gatekeeper();
    assert_eq!(
        gatekeeper.resolver().resolve(&id("ghost")).await,
        Err(ResolveError::NotFound)
    );

    let broken = Gatekeeper::new(Registry::shared(), Arc::new(BrokenDirectory::default()));
    assert!(matches!(
        broken.resolver().resolve(&id("ghost")).await,
        Err(ResolveError::LookupFailed(_))
    ));
}

#[tokio::test]
async fn test_decisions_reflect_role_changes_without_caching() {
    let directory = create_test_directory();
    let gatekeeper = Gatekeeper::new(Registry::shared(), directory.clone());

    assert!(!gatekeeper
        .check_permission(&id("u123"), "premiumFeatures")
        .await
        .is_allowed());

    directory
        .update_role(&id("u123"), Role::PremiumPatient)
        .await
        .unwrap();

    assert!(gatekeeper
        .check_permission(&id("u123"), "premiumFeatures")
        .await
        .is_allowed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_evaluations_share_the_registry() {
    let gatekeeper = create_test_gatekeeper();

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let gatekeeper = gatekeeper.clone();
            let role = Role::ALL[i % Role::ALL.len()];
            tokio::spawn(async move {
                let decision = gatekeeper
                    .check_permission(&UserId::new(format!("{role}-1")), "canModerateContent")
                    .await;
                (role, decision.is_allowed())
            })
        })
        .collect();

    for handle in handles {
        let (role, allowed) = handle.await.unwrap();
        assert_eq!(allowed, matches!(role, Role::Moderator | Role::Admin));
    }
}
