//! CLI flag overrides on top of the shared `terra-config` layer.
//!
//! Flags win over environment, environment over the TOML file. The result
//! is a pre-built `ExplorerConfig` plus the opened state store; core never
//! sees `GlobalOpts`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use terra_config::{Config, FileStore};
use terra_core::{ExplorerConfig, KeyValueStore, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolved runtime settings for one CLI invocation.
pub struct Resolved {
    pub explorer: ExplorerConfig,
    pub state_path: PathBuf,
}

/// Merge the config file with `--registry-url`, `--auth-url`, `--timeout`,
/// `--insecure` and `--state-file`.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let mut cfg: Config = terra_config::load_config_or_default();

    if let Some(ref url) = global.registry_url {
        cfg.registry_url.clone_from(url);
    }
    if let Some(ref url) = global.auth_url {
        cfg.auth_url.clone_from(url);
    }

    let mut explorer = cfg.to_explorer_config().map_err(|e| CliError::Validation {
        field: "url".into(),
        reason: e.to_string(),
    })?;

    if global.insecure {
        explorer.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        explorer.timeout = Duration::from_secs(secs);
    }

    let state_path = global
        .state_file
        .clone()
        .unwrap_or_else(|| cfg.state_path());

    Ok(Resolved {
        explorer,
        state_path,
    })
}

/// Open the persisted session and favorites state.
pub fn open_store(path: PathBuf) -> Arc<dyn KeyValueStore> {
    tracing::debug!(path = %path.display(), "opening state file");
    Arc::new(FileStore::open(path))
}
