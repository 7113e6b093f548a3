//! Shared configuration for the terra CLI and TUI.
//!
//! TOML config file plus `TERRA_*` environment overrides, translated
//! into `terra_core::ExplorerConfig`, and the on-disk [`FileStore`] that
//! keeps session and favorites state between runs. Both binaries depend
//! on this crate; the CLI layers its flag overrides on top.

mod file_store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use terra_core::{DEFAULT_AUTH_URL, DEFAULT_REGISTRY_URL, ExplorerConfig, TlsMode};

pub use file_store::FileStore;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "TERRA_CONFIG";
/// Overrides the state file location.
pub const STATE_ENV: &str = "TERRA_STATE_FILE";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("state file {path}: {reason}")]
    State { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Country registry base URL.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Auth backend base URL.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Default CLI output format.
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: auto, always, never.
    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates (self-signed auth backends).
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Where session and favorites state lives. Defaults to the platform
    /// data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            auth_url: default_auth_url(),
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            state_file: None,
        }
    }
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.into()
}
fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Translate into the core's runtime config.
    pub fn to_explorer_config(&self) -> Result<ExplorerConfig, ConfigError> {
        let mut explorer = ExplorerConfig::from_urls(&self.registry_url, &self.auth_url)
            .map_err(|e| ConfigError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            })?;

        explorer.tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };
        explorer.timeout = Duration::from_secs(self.timeout);
        Ok(explorer)
    }

    /// Resolved state file path: env override, then config, then the
    /// platform data directory.
    pub fn state_path(&self) -> PathBuf {
        if let Some(path) = std::env::var_os(STATE_ENV) {
            return PathBuf::from(path);
        }
        self.state_file.clone().unwrap_or_else(default_state_path)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "terra", "terra")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("terra");
    p
}

/// Resolve the config file path via `TERRA_CONFIG` or platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of `state.json`.
pub fn default_state_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("state.json"),
        |dirs| dirs.data_dir().join("state.json"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, then apply `TERRA_*` environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TERRA_").ignore(&["config"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default config");
            Config::default()
        }
    }
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
