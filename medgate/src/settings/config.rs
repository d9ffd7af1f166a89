use config::{Config, ConfigError, Environment, File};
use medgate_core::settings::{api_server::ApiServer, directory::DirectorySettings};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[allow(unused)]
pub struct Settings {
    #[serde(default)]
    pub debug: bool,
    pub telemetry: Option<String>,
    #[serde(default)]
    pub api: ApiServer,
    #[serde(default)]
    pub directory: DirectorySettings,
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("MEDGATE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("MEDGATE_RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("api.bind_address", "0.0.0.0:3000")?
            .set_default("api.auth_mode", "bearer")?
            .set_default("directory.backend", "file")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment());

        Self::from_config(builder.build()?)
    }

    /// Deserialize and post-process an already layered configuration
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let mut settings: Settings = config.try_deserialize()?;

        // Special strings allow disabling telemetry from the environment,
        // even if the default config enables it.
        settings.telemetry = settings.check_if_optional(&settings.telemetry);
        Ok(settings)
    }

    pub fn traces_enabled(&self) -> bool {
        self.telemetry
            .as_ref()
            .map(|telemetry| telemetry.to_lowercase().split(',').any(|s| s.trim() == "traces"))
            .unwrap_or(false)
    }

    fn check_if_optional(&self, s: &Option<String>) -> Option<String> {
        match s {
            None => None,
            Some(s) => match s.to_lowercase().as_str() {
                "no" | "false" | "0" => None,
                _ => Some(s.to_string()),
            },
        }
    }
}
