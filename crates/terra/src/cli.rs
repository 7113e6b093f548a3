//! Clap derive structures for the `terra` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// terra -- browse and bookmark countries from the command line
#[derive(Debug, Parser)]
#[command(
    name = "terra",
    version,
    about = "Explore country data from the command line",
    long_about = "Browse, search, filter, sort and bookmark country data from the\n\
        public restcountries.com registry. Signing in against the configured\n\
        auth backend is required for every country view.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Country registry base URL (overrides config)
    #[arg(long, env = "TERRA_REGISTRY_URL", global = true)]
    pub registry_url: Option<String>,

    /// Auth backend base URL (overrides config)
    #[arg(long, env = "TERRA_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// Session and favorites state file (overrides config)
    #[arg(long, env = "TERRA_STATE_FILE", global = true, hide_env = true)]
    pub state_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TERRA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TERRA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "TERRA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Column to order country lists by.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Name,
    Population,
    Area,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Create an account on the auth backend
    #[command(alias = "register")]
    Signup(SignupArgs),

    /// Forget the stored session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse, search and inspect countries
    #[command(alias = "c")]
    Countries(CountriesArgs),

    /// List and toggle bookmarked countries
    #[command(alias = "fav")]
    Favorites(FavoritesArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prompted when omitted; prefer the prompt)
    #[arg(long, env = "TERRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prompted when omitted; prefer the prompt)
    #[arg(long, env = "TERRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Countries ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CountriesArgs {
    #[command(subcommand)]
    pub command: CountriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CountriesCommand {
    /// List countries, optionally searched, filtered and sorted
    #[command(alias = "ls")]
    List(CountryListArgs),

    /// Show one country in detail
    Show {
        /// Three-letter country code (e.g. FRA)
        code: String,
    },

    /// Suggest up to six countries matching name, capital or code
    Suggest {
        /// Partial name, capital, or exact code
        query: String,
    },
}

#[derive(Debug, Args)]
pub struct CountryListArgs {
    /// Search by name on the registry
    #[arg(long, short = 's', conflicts_with = "region")]
    pub search: Option<String>,

    /// Only countries of this region (Africa, Americas, Asia, Europe, Oceania, Antarctic, all)
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Sort by this column (registry order when omitted)
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

// ── Favorites ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List bookmarked countries
    #[command(alias = "ls")]
    List,

    /// Add or remove a country from favorites
    Toggle {
        /// Three-letter country code (e.g. FRA)
        code: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config and state file locations
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
