//! Favorites command handlers.

use std::sync::Arc;

use terra_core::{Country, Route};

use crate::cli::{FavoritesArgs, FavoritesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::countries::CountryRow;
use super::util::load_canonical;

pub async fn handle(ctx: &Context, args: FavoritesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.require(Route::Favorites)?;

    match args.command {
        FavoritesCommand::List => {
            let mut controller = ctx.controller()?;
            // Nothing to resolve against the registry when no code is saved.
            let view = if controller.favorites().is_empty() {
                output::notice(
                    "No favorites yet. Add one with: terra favorites toggle <CODE>",
                    global.quiet,
                );
                Vec::new()
            } else {
                load_canonical(&mut controller).await?;
                controller.favorites_view()
            };
            let countries: Vec<&Country> = view.iter().map(Arc::as_ref).collect();
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &countries,
                |c| CountryRow::new(c, true, color),
                |c| c.code.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FavoritesCommand::Toggle { code } => {
            let code = code.trim();
            if code.is_empty() {
                return Err(CliError::Validation {
                    field: "code".into(),
                    reason: "cannot be empty".into(),
                });
            }
            let mut controller = ctx.controller()?;
            let added = controller.toggle_favorite(code)?;
            let code = code.to_ascii_uppercase();
            let message = if added {
                format!("★ {code} added to favorites")
            } else {
                format!("☆ {code} removed from favorites")
            };
            output::notice(&message, global.quiet);
            Ok(())
        }
    }
}
