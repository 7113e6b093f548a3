//! Account creation screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, layout::Rect};
use secrecy::SecretString;

use terra_core::Route;

use crate::action::Action;
use crate::component::{Component, View};
use crate::widgets::form::{Field, Form, FormEvent};

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const PASSWORD: usize = 2;

pub struct SignupScreen {
    form: Form,
}

impl SignupScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new(
                "Create account",
                vec![
                    Field::text("Username"),
                    Field::text("Email"),
                    Field::secret("Password"),
                ],
            ),
        }
    }

    fn clear(&mut self) {
        for field in &mut self.form.fields {
            field.value.clear();
        }
        self.form.focus = USERNAME;
        self.form.error = None;
        self.form.busy = false;
    }
}

impl Component for SignupScreen {
    fn handle_key_event(&mut self, key: KeyEvent, _view: &View<'_>) -> Result<Option<Action>> {
        if key.code == KeyCode::Esc && !self.form.busy {
            return Ok(Some(Action::Navigate(Route::Login)));
        }
        match self.form.handle_key(key) {
            FormEvent::Submit => {
                self.form.busy = true;
                Ok(Some(Action::SubmitSignup {
                    username: self.form.value(USERNAME).trim().to_owned(),
                    email: self.form.value(EMAIL).trim().to_owned(),
                    password: SecretString::from(self.form.value(PASSWORD).to_owned()),
                }))
            }
            FormEvent::Edited => {
                self.form.error = None;
                Ok(None)
            }
            FormEvent::None => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SignupFinished(Ok(())) => self.clear(),
            Action::SignupFinished(Err(message)) => {
                self.form.reset_secrets();
                self.form.error = Some(message.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, _view: &View<'_>) {
        self.form
            .render(frame, area, &[("Enter", "create"), ("Esc", "back to sign in"), ("Ctrl+C", "quit")]);
    }

    fn captures_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::screens::test_support::{press, with_view};

    #[test]
    fn escape_returns_to_login() {
        with_view(|view| {
            let mut screen = SignupScreen::new();
            let action = screen.handle_key_event(press(KeyCode::Esc), view).ok().flatten();
            assert!(matches!(action, Some(Action::Navigate(Route::Login))));
        });
    }

    #[test]
    fn success_clears_every_field() {
        let mut screen = SignupScreen::new();
        screen.form.fields[USERNAME].value = "ada".into();
        screen.form.fields[EMAIL].value = "ada@example.com".into();
        screen.form.fields[PASSWORD].value = "pw".into();
        screen.form.busy = true;
        screen.update(&Action::SignupFinished(Ok(()))).ok();
        assert_eq!(screen.form.value(USERNAME), "");
        assert_eq!(screen.form.value(EMAIL), "");
        assert!(!screen.form.busy);
    }

    #[test]
    fn failure_keeps_username() {
        let mut screen = SignupScreen::new();
        screen.form.fields[USERNAME].value = "ada".into();
        screen.form.fields[PASSWORD].value = "pw".into();
        screen
            .update(&Action::SignupFinished(Err("Registration failed".into())))
            .ok();
        assert_eq!(screen.form.value(USERNAME), "ada");
        assert_eq!(screen.form.value(PASSWORD), "");
        assert_eq!(screen.form.error.as_deref(), Some("Registration failed"));
    }
}
