//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use terra_config::ConfigError;
use terra_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(terra::connection_failed),
        help(
            "Check your network connection and the configured URLs.\n\
             See: terra config show"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not load countries: {message}")]
    #[diagnostic(
        code(terra::fetch_failed),
        help("The registry may be unavailable. Try again in a moment.")
    )]
    FetchFailed { message: String },

    // ── Session ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(terra::auth_failed),
        help("Check your email and password, or create an account with: terra signup")
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(code(terra::not_logged_in), help("Sign in first with: terra login"))]
    NotLoggedIn,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(terra::not_found),
        help("Run: terra {list_command} to see available {resource_type} codes")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(terra::validation))]
    Validation { field: String, reason: String },

    // ── Configuration / state ────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(terra::config),
        help("Inspect the resolved settings with: terra config show")
    )]
    Config(#[from] ConfigError),

    #[error("Could not save local state: {message}")]
    #[diagnostic(
        code(terra::state),
        help("Check that the state file location is writable (see: terra config path).")
    )]
    State { message: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(terra::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── IO ────────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(terra::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::FetchFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::CountryNotFound { code } => CliError::NotFound {
                resource_type: "country".into(),
                identifier: code,
                list_command: "countries list".into(),
            },

            CoreError::Registry { message, status: _ } => CliError::FetchFailed { message },

            CoreError::Storage { message } => CliError::State { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
