//! Shell configuration: TOML file, then environment overrides.
//!
//! ```toml
//! self_user_id = 1
//!
//! [bff]
//! base_url = "https://jsonplaceholder.typicode.com"
//! ```

use super::ShellError;
use platform_kit::BffConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides [`ShellConfig::self_user_id`].
pub const SELF_USER_ID_ENV: &str = "SHELL_SELF_USER_ID";

const DEFAULT_SELF_USER_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub bff: BffConfig,

    /// Id of the signed-in user whose profile and post count are shown.
    #[serde(default = "default_self_user_id")]
    pub self_user_id: i64,
}

fn default_self_user_id() -> i64 {
    DEFAULT_SELF_USER_ID
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            bff: BffConfig::default(),
            self_user_id: DEFAULT_SELF_USER_ID,
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ShellError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShellError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ShellError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ShellError> {
        Self::default().with_env_overrides()
    }

    /// Applies `BFF_BASE_URL` and `SHELL_SELF_USER_ID` on top of this configuration.
    pub fn with_env_overrides(self) -> Result<Self, ShellError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ShellError> {
        if let Some(base_url) = lookup(platform_kit::config::BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.bff.base_url = base_url.trim().to_string();
            }
        }
        if let Some(raw) = lookup(SELF_USER_ID_ENV) {
            self.self_user_id = raw.trim().parse().map_err(|_| ShellError::InvalidOverride {
                name: SELF_USER_ID_ENV,
                value: raw,
            })?;
        }
        Ok(self)
    }
}
