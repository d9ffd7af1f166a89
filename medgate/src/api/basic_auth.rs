use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::auth_core::authenticate_user_from_header;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;

pub use crate::api::auth_core::AuthenticatedUser;

/// Attach the [`AuthenticatedUser`] to the request or reject it with 401
pub async fn auth(
    State(state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!(
        "Auth middleware triggered with mode: {}",
        state.settings.api.auth_mode.as_str()
    );

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let user = authenticate_user_from_header(&state, header).ok_or(AppError::Unauthorized)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
