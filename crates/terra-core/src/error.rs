// ── Core error types ──
//
// User-facing errors from terra-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<terra_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("{message}")]
    AuthenticationFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Country not found: {code}")]
    CountryNotFound { code: String },

    #[error("Registry error: {message}")]
    Registry {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Could not persist local state: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<terra_api::Error> for CoreError {
    fn from(err: terra_api::Error) -> Self {
        match err {
            terra_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            terra_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Registry {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            terra_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            terra_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Invalid base URL: {url}"),
            },
            terra_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            terra_api::Error::Registry { status, message } => CoreError::Registry {
                message,
                status: Some(status),
            },
            terra_api::Error::Deserialization { message, body: _ } => CoreError::Registry {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_auth_error_keeps_backend_message() {
        let err: CoreError = terra_api::Error::Authentication {
            message: "Invalid credentials".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn api_registry_error_keeps_status() {
        let err: CoreError = terra_api::Error::Registry {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(matches!(
            err,
            CoreError::Registry {
                status: Some(502),
                ..
            }
        ));
        assert_eq!(err.to_string(), "Registry error: bad gateway");
    }
}
