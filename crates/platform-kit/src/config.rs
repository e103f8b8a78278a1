//! BFF connection settings.

use serde::{Deserialize, Serialize};

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Environment variable that overrides [`BffConfig::base_url`].
pub const BASE_URL_ENV: &str = "BFF_BASE_URL";

/// Configuration of the backend-for-frontend the resource client talks to.
///
/// The base address is the only environment dependency of the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BffConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for BffConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl BffConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Applies `BFF_BASE_URL` on top of this configuration, if set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim().to_string();
            }
        }
        self
    }
}
