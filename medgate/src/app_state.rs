use std::sync::Arc;

use anyhow::Context;
use medgate_core::authorization::{Registry, RegistryError};
use tracing::{info, warn};

use crate::services::directory::{create_user_directory, SharedUserDirectory};
use crate::services::Gatekeeper;
use crate::settings::config::Settings;
use crate::stop_flag;

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub stop_flag: stop_flag::StopFlag,
    pub registry: Arc<Registry>,
    pub directory: SharedUserDirectory,
    pub gatekeeper: Gatekeeper,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<SharedAppState> {
        let stop_flag = stop_flag::StopFlag::new();
        stop_flag::register_signal_handler(&stop_flag);

        let directory = create_user_directory(&settings.directory)
            .await
            .context("Failed to initialize user directory")?;

        Ok(Self::assemble(settings, stop_flag, Registry::shared(), directory))
    }

    /// Build the state around an existing directory, without signal handlers
    pub fn with_directory(settings: Settings, directory: SharedUserDirectory) -> SharedAppState {
        Self::with_registry(settings, Registry::shared(), directory)
    }

    pub fn with_registry(
        settings: Settings,
        registry: Arc<Registry>,
        directory: SharedUserDirectory,
    ) -> SharedAppState {
        Self::assemble(settings, stop_flag::StopFlag::new(), registry, directory)
    }

    fn assemble(
        settings: Settings,
        stop_flag: stop_flag::StopFlag,
        registry: Arc<Registry>,
        directory: SharedUserDirectory,
    ) -> SharedAppState {
        match registry.validate() {
            Ok(()) => info!("Role registry covers all {} roles", registry.all_roles().len()),
            Err(RegistryError::MissingRoles(missing)) => {
                for role in missing {
                    warn!(
                        "Role '{}' has no permission set, permission checks will deny it",
                        role
                    );
                }
            }
        }

        let gatekeeper = Gatekeeper::new(registry.clone(), directory.clone());

        Arc::new(AppState {
            settings,
            stop_flag,
            registry,
            directory,
            gatekeeper,
        })
    }
}
