//! Process bootstrap settings.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, instrument};
use warden_error::{ConfigError, WardenError, WardenResult};

const DEFAULT_SETTINGS: &str = r#"
guard_config_path = "guard.toml"
health_addr = "0.0.0.0:8080"
health_enabled = true
json_logs = false
"#;

/// Settings needed before the guard configuration can be loaded.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Bundled defaults
/// 2. `warden.toml` in the current directory (optional)
/// 3. `WARDEN_*` environment variables (e.g. `WARDEN_JSON_LOGS=true`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct Settings {
    /// Path of the persisted guard configuration
    guard_config_path: PathBuf,
    /// Bind address for the keep-alive endpoint
    health_addr: String,
    /// Whether to serve the keep-alive endpoint
    health_enabled: bool,
    /// Emit JSON-formatted logs
    json_logs: bool,
}

impl Settings {
    /// Load settings with precedence: environment > `warden.toml` > defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed into settings.
    #[instrument]
    pub fn load() -> WardenResult<Self> {
        debug!("Loading settings with precedence: env > warden.toml > bundled defaults");
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
                .add_source(File::with_name("warden").required(false))
                .add_source(Environment::with_prefix("WARDEN")),
        )
    }

    /// Load settings from a specific file layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> WardenResult<Self> {
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> WardenResult<Self> {
        builder
            .build()
            .map_err(|e| {
                WardenError::from(ConfigError::new(format!(
                    "Failed to build settings: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                WardenError::from(ConfigError::new(format!(
                    "Failed to parse settings: {}",
                    e
                )))
            })
    }

    /// Bot token from `DISCORD_TOKEN`, falling back to `BOT_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn discord_token() -> WardenResult<String> {
        std::env::var("DISCORD_TOKEN")
            .or_else(|_| std::env::var("BOT_TOKEN"))
            .map_err(|_| {
                WardenError::from(ConfigError::new(
                    "DISCORD_TOKEN (or BOT_TOKEN) not found in environment",
                ))
            })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guard_config_path: PathBuf::from("guard.toml"),
            health_addr: "0.0.0.0:8080".to_string(),
            health_enabled: true,
            json_logs: false,
        }
    }
}
