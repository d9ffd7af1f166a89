use axum::{extract::State, response::IntoResponse, Json};
use medgate_core::authorization::Role;
use medgate_core::settings::directory::DirectoryBackend;
use serde::Serialize;

use crate::app_state::SharedAppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ServerInfo {
    pub version: String,
    pub auth_mode: String,
    pub directory: String,
    pub roles: Vec<Role>,
}

#[utoipa::path(
    get,
    path = "/api/info",
    responses(
    (status = 200, description = "Some global info of the running server.", body = ServerInfo)
    )
)]
pub async fn info_handler(State(state): State<SharedAppState>) -> impl IntoResponse {
    Json(ServerInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        auth_mode: state.settings.api.auth_mode.as_str().to_string(),
        directory: match state.settings.directory.backend {
            DirectoryBackend::File => "file",
            DirectoryBackend::Http => "http",
        }
        .to_string(),
        roles: state.registry.all_roles().to_vec(),
    })
}
