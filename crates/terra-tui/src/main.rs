//! `terra-tui`: interactive terminal explorer for the public country
//! registry.
//!
//! Routed screens (sign in, sign up, country list, detail, favorites)
//! behind the same session guard the `terra` CLI uses. Registry calls run
//! as spawned tasks that report back through the action channel, so the
//! UI stays responsive while a spinner shows progress.
//!
//! Logs go to a file (default `/tmp/terra-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use terra_config::FileStore;
use terra_core::{FavoritesStore, KeyValueStore, ListController, Route, SessionStore};

use crate::app::App;

/// Browse, search and bookmark countries from the terminal.
#[derive(Parser, Debug)]
#[command(name = "terra-tui", version, about)]
struct Cli {
    /// Country registry base URL
    #[arg(long, env = "TERRA_REGISTRY_URL")]
    registry_url: Option<String>,

    /// Auth backend base URL
    #[arg(long, env = "TERRA_AUTH_URL")]
    auth_url: Option<String>,

    /// State file holding the session and favorites
    #[arg(long, env = "TERRA_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Initial route, e.g. /home, /favorites or /country/FRA
    #[arg(long, default_value = "/home")]
    route: String,

    /// Log file path (defaults to /tmp/terra-tui.log)
    #[arg(long, default_value = "/tmp/terra-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout/stderr belong to the terminal UI. Hold the
/// guard for the lifetime of the app so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "terra_tui={log_level},terra_core={log_level},terra_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("terra-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks before the terminal switches modes.
    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let initial_route =
        Route::parse(&cli.route).ok_or_else(|| eyre!("unknown route: {}", cli.route))?;

    // Flags > config file > defaults
    let mut cfg = terra_config::load_config_or_default();
    if let Some(url) = &cli.registry_url {
        cfg.registry_url.clone_from(url);
    }
    if let Some(url) = &cli.auth_url {
        cfg.auth_url.clone_from(url);
    }
    let explorer = cfg.to_explorer_config()?;
    let state_path = cli.state_file.clone().unwrap_or_else(|| cfg.state_path());

    info!(
        registry = %explorer.registry_url,
        state = %state_path.display(),
        "starting terra-tui"
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(state_path));
    let list = ListController::new(
        Arc::new(explorer.registry_client()?),
        FavoritesStore::load(Arc::clone(&store)),
    );
    let session = SessionStore::new(store);
    let auth = explorer.auth_client()?;

    let mut app = App::new(list, session, auth, initial_route);
    app.run().await?;

    Ok(())
}
