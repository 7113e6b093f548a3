//! Command dispatch: bridges CLI args -> core controller -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod countries;
pub mod favorites;
pub mod util;

use std::sync::Arc;

use terra_core::{
    ExplorerConfig, FavoritesStore, KeyValueStore, ListController, RegistryClient, Route,
    RouteDecision, SessionGuard, SessionStore,
};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Everything a state-bound command needs.
pub struct Context {
    pub explorer: ExplorerConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub session: SessionStore,
}

impl Context {
    pub fn new(explorer: ExplorerConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let session = SessionStore::new(Arc::clone(&store));
        Self {
            explorer,
            store,
            session,
        }
    }

    /// Run the session guard for `route`. A redirect means the user has
    /// to sign in first.
    pub fn require(&self, route: Route) -> Result<(), CliError> {
        match SessionGuard::check(route, &self.session) {
            RouteDecision::Render(_) => Ok(()),
            RouteDecision::Redirect(_) => Err(CliError::NotLoggedIn),
        }
    }

    /// Controller over the configured registry with persisted favorites.
    pub fn controller(&self) -> Result<ListController<RegistryClient>, CliError> {
        let client = self.explorer.registry_client()?;
        let favorites = FavoritesStore::load(Arc::clone(&self.store));
        Ok(ListController::new(Arc::new(client), favorites))
    }
}

/// Dispatch a state-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(ctx, args, global).await,
        Command::Signup(args) => auth::signup(ctx, args, global).await,
        Command::Logout => auth::logout(ctx, global),
        Command::Whoami => auth::whoami(ctx, global),
        Command::Countries(args) => countries::handle(ctx, args, global).await,
        Command::Favorites(args) => favorites::handle(ctx, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are not state-bound".into(),
        )),
    }
}
