//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};
use serde::Serialize;

use terra_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

#[derive(Serialize)]
struct Paths {
    config: String,
    state: String,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = terra_config::config_path();
            let current = terra_config::load_config_or_default();
            eprintln!("✨ terra: configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let registry_url: String = Input::new()
                .with_prompt("Country registry URL")
                .default(current.registry_url.clone())
                .interact_text()
                .map_err(prompt_err)?;

            let auth_url: String = Input::new()
                .with_prompt("Auth backend URL")
                .default(current.auth_url.clone())
                .interact_text()
                .map_err(prompt_err)?;

            let formats = &["table", "json", "yaml", "plain"];
            let default_format = formats
                .iter()
                .position(|f| *f == current.output)
                .unwrap_or(0);
            let format = Select::new()
                .with_prompt("Default output format")
                .items(formats)
                .default(default_format)
                .interact()
                .map_err(prompt_err)?;

            let insecure = Confirm::new()
                .with_prompt("Accept self-signed certificates from the auth backend?")
                .default(current.insecure)
                .interact()
                .map_err(prompt_err)?;

            let cfg = Config {
                registry_url,
                auth_url,
                output: formats[format].to_owned(),
                insecure,
                ..current
            };
            // Reject bad URLs before anything is written.
            cfg.to_explorer_config()?;

            let path = terra_config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("\n  Next: terra login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = terra_config::load_config()?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# unrenderable: {e}")),
                |c| c.registry_url.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            let cfg = terra_config::load_config_or_default();
            let state = global
                .state_file
                .clone()
                .unwrap_or_else(|| cfg.state_path());
            let paths = Paths {
                config: terra_config::config_path().display().to_string(),
                state: state.display().to_string(),
            };
            let out = output::render_single(
                &global.output,
                &paths,
                |p| format!("config: {}\nstate:  {}", p.config, p.state),
                |p| p.config.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
