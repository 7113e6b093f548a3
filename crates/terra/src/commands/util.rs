//! Shared helpers for command handlers.

use dialoguer::Input;
use secrecy::SecretString;

use terra_core::{ListController, LoadStatus, RegistryClient};

use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Use `value` when given, otherwise ask for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    let value = match value {
        Some(v) => v,
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err)?,
    };
    if value.trim().is_empty() {
        return Err(CliError::Validation {
            field: prompt.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(value)
}

/// Use `value` when given, otherwise read it without echo.
pub fn password_or_prompt(value: Option<String>) -> Result<SecretString, CliError> {
    let raw = match value {
        Some(v) => v,
        None => rpassword::prompt_password("Password: ").map_err(prompt_err)?,
    };
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

/// Fetch the full collection, turning a failed load into an error.
pub async fn load_canonical(controller: &mut ListController<RegistryClient>) -> Result<(), CliError> {
    controller.load_all().await;
    fail_on_error(controller.status())
}

/// `Failed` becomes `FetchFailed`; every other status passes.
pub fn fail_on_error(status: &LoadStatus) -> Result<(), CliError> {
    match status.error() {
        Some(message) => Err(CliError::FetchFailed {
            message: message.to_owned(),
        }),
        None => Ok(()),
    }
}
