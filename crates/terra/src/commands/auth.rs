//! Session command handlers: login, signup, logout, whoami.

use serde::Serialize;

use terra_core::Route;

use crate::cli::{GlobalOpts, LoginArgs, SignupArgs};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::util::{password_or_prompt, value_or_prompt};

pub async fn login(ctx: &Context, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = value_or_prompt(args.email, "Email")?;
    let password = password_or_prompt(args.password)?;

    let client = ctx.explorer.auth_client()?;
    let user = ctx.session.login(&client, &email, &password).await?;

    let who = user.map_or_else(|| email.trim().to_owned(), |u| u.username);
    output::notice(&format!("✓ Logged in as {who}"), global.quiet);
    Ok(())
}

pub async fn signup(ctx: &Context, args: SignupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let username = value_or_prompt(args.username, "Username")?;
    let email = value_or_prompt(args.email, "Email")?;
    let password = password_or_prompt(args.password)?;

    let client = ctx.explorer.auth_client()?;
    ctx.session
        .register(&client, &username, &email, &password)
        .await?;

    output::notice("✓ Account created. Sign in with: terra login", global.quiet);
    Ok(())
}

pub fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.session.logout()?;
    output::notice("✓ Logged out", global.quiet);
    Ok(())
}

#[derive(Serialize)]
struct Whoami {
    username: Option<String>,
    email: Option<String>,
    id: Option<String>,
}

pub fn whoami(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.require(Route::Home)?;

    let user = ctx.session.user();
    let info = Whoami {
        username: user.as_ref().map(|u| u.username.clone()),
        email: user.as_ref().and_then(|u| u.email.clone()),
        id: user.and_then(|u| u.id),
    };

    let out = output::render_single(
        &global.output,
        &info,
        |w| match (&w.username, &w.email) {
            (Some(name), Some(email)) => format!("{name} <{email}>"),
            (Some(name), None) => name.clone(),
            // A token without a stored profile: signed in, identity unknown.
            _ => "signed in (no profile stored)".into(),
        },
        |w| w.username.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
