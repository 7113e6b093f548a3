//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use secrecy::SecretString;

use terra_core::{Country, FetchOutcome, NavInput, Route, SortKey, UserProfile};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    /// Go to a route; the session guard may redirect.
    Navigate(Route),
    /// Sent to screens after the route actually changed.
    RouteChanged(Route),
    Logout,

    // ── Session ───────────────────────────────────────────────────
    SubmitLogin {
        email: String,
        password: SecretString,
    },
    SubmitSignup {
        username: String,
        email: String,
        password: SecretString,
    },
    LoginFinished(Result<Option<UserProfile>, String>),
    SignupFinished(Result<(), String>),

    // ── Country list ──────────────────────────────────────────────
    /// Search box edited: refresh local suggestions.
    QueryChanged(String),
    /// Search box submitted: remote name search.
    SubmitSearch(String),
    SuggestionNav(NavInput),
    /// Step through "all regions" and each region.
    CycleRegion { forward: bool },
    SortBy(SortKey),
    ResetFilters,
    Reload,
    ToggleFavorite(String),
    FetchDone(FetchOutcome),

    // ── Detail ────────────────────────────────────────────────────
    DetailLoaded {
        code: String,
        result: Result<Arc<Country>, String>,
    },
}
