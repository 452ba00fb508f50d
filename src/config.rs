//! Service settings.
//!
//! Loaded from (later sources win):
//! 1. Default values
//! 2. `todo-api.toml` in the working directory
//! 3. Environment variables (`TODO_API_*`, except `app_version`)
//! 4. `MY_APP_VERSION`, taken verbatim as `app_version`

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// File consulted for settings, relative to the working directory.
pub const CONFIG_FILE: &str = "todo-api.toml";

/// Environment variable carrying the raw build version, e.g. `2.3.1:v1.0.0`.
pub const APP_VERSION_VAR: &str = "MY_APP_VERSION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Listen host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Raw version string; the `/version` endpoint extracts its `v...` suffix.
    #[serde(default)]
    pub app_version: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Largest accepted request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Allow cross-origin requests from any origin.
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_cors() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_version: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
            cors: default_cors(),
        }
    }
}

impl Settings {
    /// Loads settings from all sources, falling back to defaults on error.
    pub fn load() -> Self {
        match Self::figment(Path::new(CONFIG_FILE)).extract::<Settings>() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Configuration error, using defaults");
                Settings::default()
            }
        }
    }

    fn figment(config_path: &Path) -> Figment {
        let figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("TODO_API_").ignore(&["app_version"]));

        // `Env` parses values as typed data, so `1.0` would arrive as a float.
        match std::env::var(APP_VERSION_VAR) {
            Ok(raw) => figment.merge(Serialized::default("app_version", raw)),
            Err(_) => figment,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
