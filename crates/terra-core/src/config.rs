// ── Runtime service configuration ──
//
// Where the registry and auth backend live and how to reach them. Built
// by the CLI/TUI from `terra-config`; core never reads config files.

use std::time::Duration;

use terra_api::{AuthClient, RegistryClient, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// Endpoints and transport settings for one application instance.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Registry base URL (e.g. `https://restcountries.com/v3.1`).
    pub registry_url: Url,
    /// Auth backend base URL (e.g. `http://localhost:5000/api/auth`).
    pub auth_url: Url,
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ExplorerConfig {
    /// Config pointing at the public registry and a local auth backend.
    pub fn with_defaults() -> Result<Self, CoreError> {
        Self::from_urls(terra_api::DEFAULT_REGISTRY_URL, terra_api::DEFAULT_AUTH_URL)
    }

    /// Parse both base URLs, keeping default transport settings.
    pub fn from_urls(registry_url: &str, auth_url: &str) -> Result<Self, CoreError> {
        let parse = |name: &str, raw: &str| {
            Url::parse(raw).map_err(|e| CoreError::Config {
                message: format!("invalid {name} URL '{raw}': {e}"),
            })
        };
        Ok(Self {
            registry_url: parse("registry", registry_url)?,
            auth_url: parse("auth", auth_url)?,
            tls: TlsMode::System,
            timeout: TransportConfig::default().timeout,
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }

    pub fn registry_client(&self) -> Result<RegistryClient, CoreError> {
        Ok(RegistryClient::new(
            self.registry_url.clone(),
            &self.transport(),
        )?)
    }

    pub fn auth_client(&self) -> Result<AuthClient, CoreError> {
        Ok(AuthClient::new(self.auth_url.clone(), &self.transport())?)
    }
}
