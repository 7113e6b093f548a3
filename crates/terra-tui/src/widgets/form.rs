//! Small text-entry form shared by the login and signup screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme;

#[derive(Debug)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Render as bullets.
    pub masked: bool,
}

impl Field {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label)
        }
    }
}

/// What a key press did to the form.
#[derive(Debug, PartialEq, Eq)]
pub enum FormEvent {
    None,
    Edited,
    /// Enter on the last field with every field filled in.
    Submit,
}

#[derive(Debug)]
pub struct Form {
    pub title: &'static str,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub error: Option<String>,
    /// A request is outstanding; input is ignored.
    pub busy: bool,
}

impl Form {
    pub fn new(title: &'static str, fields: Vec<Field>) -> Self {
        Self {
            title,
            fields,
            focus: 0,
            error: None,
            busy: false,
        }
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.value.as_str())
    }

    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    fn prev_field(&mut self) {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    /// Clear secrets and state after a round trip; other values stay so
    /// a failed attempt can be corrected.
    pub fn reset_secrets(&mut self) {
        for field in self.fields.iter_mut().filter(|f| f.masked) {
            field.value.clear();
        }
        self.busy = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        if self.busy {
            return FormEvent::None;
        }
        match (key.modifiers, key.code) {
            (_, KeyCode::Tab | KeyCode::Down) => {
                self.next_field();
                FormEvent::None
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.prev_field();
                FormEvent::None
            }
            (_, KeyCode::Enter) => {
                if self.focus + 1 < self.fields.len() {
                    self.next_field();
                    FormEvent::None
                } else if self.fields.iter().any(|f| f.value.trim().is_empty()) {
                    self.error = Some("All fields are required".into());
                    FormEvent::None
                } else {
                    self.error = None;
                    FormEvent::Submit
                }
            }
            (_, KeyCode::Backspace) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
                FormEvent::Edited
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.push(c);
                }
                FormEvent::Edited
            }
            _ => FormEvent::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, footer: &[(&str, &str)]) {
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let height = (self.fields.len() as u16) * 3 + 6;
        let [column] = Layout::horizontal([Constraint::Length(52)])
            .flex(Flex::Center)
            .areas(area);
        let [card] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);

        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(" 🌍 Country Explorer ", theme::title_style()),
                Span::styled(format!("· {} ", self.title), theme::label()),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut rows: Vec<Constraint> = vec![Constraint::Length(1)];
        rows.extend(self.fields.iter().map(|_| Constraint::Length(3)));
        rows.push(Constraint::Length(1));
        rows.push(Constraint::Min(1));
        let slots = Layout::vertical(rows).split(inner);

        let status = match (&self.error, self.busy) {
            (_, true) => Line::from(Span::styled("  Working…", theme::label())),
            (Some(err), false) => Line::from(Span::styled(format!("  {err}"), theme::error())),
            (None, false) => Line::default(),
        };
        frame.render_widget(Paragraph::new(status), slots[0]);

        for (idx, field) in self.fields.iter().enumerate() {
            let focused = idx == self.focus;
            let shown = if field.masked {
                "•".repeat(field.value.chars().count())
            } else {
                field.value.clone()
            };
            let cursor = if focused && !self.busy { "█" } else { "" };
            let input = Paragraph::new(Line::from(vec![
                Span::styled(shown, theme::value()),
                Span::styled(cursor, theme::key_hint_key()),
            ]))
            .block(
                Block::default()
                    .title(format!(" {} ", field.label))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(if focused {
                        theme::border_focused()
                    } else {
                        theme::border_default()
                    }),
            );
            frame.render_widget(input, slots[idx + 1]);
        }

        let mut hints = vec![Span::raw("  ")];
        for (key, what) in footer {
            hints.push(Span::styled(format!("{key} "), theme::key_hint_key()));
            hints.push(Span::styled(format!("{what}  "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), slots[self.fields.len() + 2]);
    }
}
