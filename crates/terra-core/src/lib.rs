//! Shared logic between `terra-api` and the front ends (CLI / TUI).
//!
//! - **[`ListController`]**: the state behind the country list view
//!   (canonical collection, working set, search, suggestions, region
//!   filter, sort, load status). Remote operations are sequenced with a
//!   generation counter so an older response never overwrites a newer one.
//!
//! - **[`FavoritesStore`]** and **[`SessionStore`]**: persisted state over
//!   an injected [`KeyValueStore`].
//!
//! - **[`SessionGuard`]**: redirects protected [`Route`]s to the login
//!   view when no session token is stored.
//!
//! - **[`SuggestionState`]**: the search dropdown's navigation state
//!   machine.
//!
//! - **Domain model** ([`model`]): the validated [`Country`] record plus
//!   region and sort types.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod query;
pub mod route;
pub mod session;
pub mod source;
pub mod store;
pub mod suggest;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ExplorerConfig;
pub use controller::{FetchKind, FetchOutcome, ListController, LoadStatus, PendingFetch};
pub use error::CoreError;
pub use model::{Country, Currency, Flags, Region, SortKey, SortOrder, SortSpec};
pub use route::Route;
pub use session::{Authenticator, RouteDecision, SessionGuard, SessionStore};
pub use source::CountrySource;
pub use store::{FavoritesStore, KeyValueStore, MemoryStore};
pub use suggest::{NavInput, SuggestionState, Transition};

// Wire types callers need alongside the controller.
pub use terra_api::{
    AuthClient, DEFAULT_AUTH_URL, DEFAULT_REGISTRY_URL, RegistryClient, TlsMode, UserProfile,
};
