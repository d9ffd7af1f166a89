use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    /// Users are loaded from a YAML file into memory
    #[default]
    File,
    /// Users are fetched from a remote user service
    Http,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct DirectorySettings {
    #[serde(default)]
    pub backend: DirectoryBackend,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_users_file() -> String {
    "config/users.yaml".to_string()
}

fn default_timeout_seconds() -> u64 {
    5
}

impl Default for DirectorySettings {
    fn default() -> Self {
        DirectorySettings {
            backend: DirectoryBackend::default(),
            users_file: default_users_file(),
            base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
