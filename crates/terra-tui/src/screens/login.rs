//! Sign-in screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, layout::Rect};
use secrecy::SecretString;

use terra_core::Route;

use crate::action::Action;
use crate::component::{Component, View};
use crate::widgets::form::{Field, Form, FormEvent};

const EMAIL: usize = 0;
const PASSWORD: usize = 1;

pub struct LoginScreen {
    form: Form,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: Form::new("Sign in", vec![Field::text("Email"), Field::secret("Password")]),
        }
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent, _view: &View<'_>) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('n') {
            return Ok(Some(Action::Navigate(Route::Signup)));
        }
        match self.form.handle_key(key) {
            FormEvent::Submit => {
                self.form.busy = true;
                Ok(Some(Action::SubmitLogin {
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
            Action::LoginFinished(result) => {
                self.form.reset_secrets();
                self.form.focus = match result {
                    Ok(_) => EMAIL,
                    Err(_) => PASSWORD,
                };
                self.form.error = result.as_ref().err().cloned();
            }
            Action::RouteChanged(Route::Login) => {
                self.form.reset_secrets();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, _view: &View<'_>) {
        self.form
            .render(frame, area, &[("Enter", "sign in"), ("Ctrl+N", "create account"), ("Ctrl+C", "quit")]);
    }

    fn captures_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::screens::test_support::{press, with_view};

    #[test]
    fn submit_trims_email_and_marks_busy() {
        with_view(|view| {
            let mut screen = LoginScreen::new();
            for c in " ada@example.com ".chars() {
                screen.handle_key_event(press(KeyCode::Char(c)), view).ok();
            }
            screen.handle_key_event(press(KeyCode::Tab), view).ok();
            for c in "hunter2".chars() {
                screen.handle_key_event(press(KeyCode::Char(c)), view).ok();
            }
            let action = screen
                .handle_key_event(press(KeyCode::Enter), view)
                .ok()
                .flatten();
            let Some(Action::SubmitLogin { email, password }) = action else {
                panic!("expected SubmitLogin, got {action:?}");
            };
            assert_eq!(email, "ada@example.com");
            assert_eq!(password.expose_secret(), "hunter2");
            assert!(screen.form.busy);
        });
    }

    #[test]
    fn failure_shows_message_and_clears_password() {
        let mut screen = LoginScreen::new();
        screen.form.fields[PASSWORD].value = "wrong".into();
        screen.form.busy = true;
        screen
            .update(&Action::LoginFinished(Err("Invalid credentials".into())))
            .ok();
        assert_eq!(screen.form.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(screen.form.value(PASSWORD), "");
        assert_eq!(screen.form.focus, PASSWORD);
        assert!(!screen.form.busy);
    }
}
