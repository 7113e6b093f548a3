use thiserror::Error;

/// Top-level error type for the `terra-api` crate.
///
/// Covers every failure mode of the two HTTP surfaces: the country
/// registry and the auth backend. `terra-core` maps these into
/// user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or registration rejected by the backend. The message is
    /// already normalized (backend `msg`/`error` field, or a fallback).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `data:` URLs).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Registry ────────────────────────────────────────────────────
    /// Non-success HTTP status from the registry (404 is handled as an
    /// empty result and never surfaces here).
    #[error("Registry error (HTTP {status}): {message}")]
    Registry { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_shows_status() {
        let err = Error::Registry {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "Registry error (HTTP 503): unavailable");
    }

    #[test]
    fn authentication_shows_backend_message() {
        let err = Error::Authentication {
            message: "Invalid credentials".into(),
        };
        assert_eq!(err.to_string(), "Authentication failed: Invalid credentials");
    }
}
