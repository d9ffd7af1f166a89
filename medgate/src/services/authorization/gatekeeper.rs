use medgate_core::authorization::{
    evaluate_ownership, evaluate_permission, evaluate_role, AuthzDecision, Denial, Registry, Role,
};
use medgate_core::user::UserId;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::identity::IdentityResolver;
use crate::services::directory::SharedUserDirectory;

/// Runs the role, permission and ownership gates for a request.
///
/// Every call resolves the user again; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    registry: Arc<Registry>,
    resolver: IdentityResolver,
}

impl Gatekeeper {
    pub fn new(registry: Arc<Registry>, directory: SharedUserDirectory) -> Self {
        Self {
            registry,
            resolver: IdentityResolver::new(directory),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    pub async fn check_role(&self, user_id: &UserId, allowed: &[Role]) -> AuthzDecision {
        let decision = match self.resolver.resolve(user_id).await {
            Ok(user) => evaluate_role(user, allowed),
            Err(e) => AuthzDecision::Deny(e.into()),
        };
        log_decision("role", user_id, &decision);
        decision
    }

    pub async fn check_permission(&self, user_id: &UserId, permission: &str) -> AuthzDecision {
        let decision = match self.resolver.resolve(user_id).await {
            Ok(user) => evaluate_permission(&self.registry, user, permission),
            Err(e) => AuthzDecision::Deny(e.into()),
        };
        log_decision("permission", user_id, &decision);
        decision
    }

    pub async fn check_ownership_or_admin(&self, user_id: &UserId, owner_id: &str) -> AuthzDecision {
        let decision = match self.resolver.resolve(user_id).await {
            Ok(user) => evaluate_ownership(&self.registry, user, owner_id),
            Err(e) => AuthzDecision::Deny(e.into()),
        };
        log_decision("ownership", user_id, &decision);
        decision
    }
}

fn log_decision(gate: &str, user_id: &UserId, decision: &AuthzDecision) {
    match decision {
        AuthzDecision::Allow(user) => {
            info!("Access granted by {} gate: {} ({})", gate, user_id, user.role)
        }
        AuthzDecision::Deny(Denial::NotFound) => {
            warn!("Access denied by {} gate: user {} not found", gate, user_id)
        }
        AuthzDecision::Deny(Denial::LookupFailed(detail)) => {
            error!("Access denied by {} gate for {}: {}", gate, user_id, detail)
        }
        AuthzDecision::Deny(denial) => {
            warn!("Access denied by {} gate for {}: {}", gate, user_id, denial)
        }
    }
    debug!("{} gate decision for {}: {:?}", gate, user_id, decision);
}
