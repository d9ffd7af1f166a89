use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use medgate_core::authorization::Role;
use medgate_core::user::{User, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::basic_auth::AuthenticatedUser;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;

type GateFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

fn authenticated_id(req: &Request) -> Result<UserId, AppError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.id.clone())
        .ok_or_else(|| {
            warn!(
                "Authorization gate reached without authenticated user: {}",
                req.uri().path()
            );
            AppError::Unauthorized
        })
}

async fn proceed(user: User, mut req: Request, next: Next) -> Response {
    debug!("Forwarding request of {} to {}", user.id, req.uri().path());
    req.extensions_mut().insert(user);
    next.run(req).await
}

/// Middleware factory admitting only users whose role is in `roles`
pub fn require_role(
    roles: Vec<Role>,
) -> impl Fn(State<SharedAppState>, Request, Next) -> GateFuture + Clone + Send + Sync + 'static {
    let roles: Arc<[Role]> = roles.into();
    move |State(state): State<SharedAppState>, req: Request, next: Next| -> GateFuture {
        let roles = roles.clone();
        Box::pin(async move {
            let user_id = authenticated_id(&req)?;
            let user = state
                .gatekeeper
                .check_role(&user_id, &roles)
                .await
                .into_result()?;
            Ok(proceed(user, req, next).await)
        })
    }
}

/// Middleware factory admitting users whose role grants `permission`.
///
/// The role's `PermissionSet` is added to the request extensions next to the user.
pub fn require_permission(
    permission: impl Into<String>,
) -> impl Fn(State<SharedAppState>, Request, Next) -> GateFuture + Clone + Send + Sync + 'static {
    let permission: Arc<str> = permission.into().into();
    move |State(state): State<SharedAppState>, mut req: Request, next: Next| -> GateFuture {
        let permission = permission.clone();
        Box::pin(async move {
            let user_id = authenticated_id(&req)?;
            let user = state
                .gatekeeper
                .check_permission(&user_id, &permission)
                .await
                .into_result()?;
            if let Some(permissions) = state.registry.permissions_for(user.role) {
                req.extensions_mut().insert(permissions.clone());
            }
            Ok(proceed(user, req, next).await)
        })
    }
}

/// Middleware factory admitting admins, or the user named by the path parameter `param`
pub fn require_ownership_or_admin(
    param: &'static str,
) -> impl Fn(State<SharedAppState>, Path<HashMap<String, String>>, Request, Next) -> GateFuture
       + Clone
       + Send
       + Sync
       + 'static {
    move |State(state): State<SharedAppState>,
          Path(params): Path<HashMap<String, String>>,
          req: Request,
          next: Next|
          -> GateFuture {
        Box::pin(async move {
            let owner_id = params.get(param).ok_or_else(|| {
                AppError::InternalServerError(format!("Route has no path parameter '{param}'"))
            })?;
            let user_id = authenticated_id(&req)?;
            let user = state
                .gatekeeper
                .check_ownership_or_admin(&user_id, owner_id)
                .await
                .into_result()?;
            Ok(proceed(user, req, next).await)
        })
    }
}
