//! Secret strings for configuration values such as bearer tokens.
//!
//! Values are held in a `secrecy` box and only the last four characters show
//! up in `Debug`/`Display` output.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

const VISIBLE_SUFFIX: usize = 4;

#[derive(Clone)]
pub struct MaskedSecret(SecretString);

impl MaskedSecret {
    pub fn new(value: String) -> Self {
        Self(SecretString::new(value.into_boxed_str()))
    }

    /// Only call this where the raw value is actually needed, e.g. for comparison
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    fn masked(&self) -> String {
        let value = self.0.expose_secret();
        let len = value.chars().count();
        if len <= VISIBLE_SUFFIX * 2 {
            return "*".repeat(len);
        }
        let suffix: String = value.chars().skip(len - VISIBLE_SUFFIX).collect();
        format!("{}{}", "*".repeat(len - VISIBLE_SUFFIX), suffix)
    }
}

impl std::fmt::Debug for MaskedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.masked())
    }
}

impl std::fmt::Display for MaskedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

impl<'de> Deserialize<'de> for MaskedSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(MaskedSecret::new(value))
    }
}

impl From<&str> for MaskedSecret {
    fn from(value: &str) -> Self {
        MaskedSecret::new(value.to_string())
    }
}
