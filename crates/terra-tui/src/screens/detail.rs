//! Country detail screen.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use terra_core::{Country, Route};

use crate::action::Action;
use crate::component::{Component, View};
use crate::theme;
use crate::widgets::number_fmt;

#[derive(Debug, Default)]
enum Detail {
    #[default]
    Empty,
    Loading(String),
    Loaded(Arc<Country>),
    Failed { code: String, message: String },
}

impl Detail {
    fn code(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Loading(code) | Self::Failed { code, .. } => Some(code.as_str()),
            Self::Loaded(country) => Some(country.code.as_str()),
        }
    }
}

pub struct DetailScreen {
    detail: Detail,
}

impl DetailScreen {
    pub fn new() -> Self {
        Self {
            detail: Detail::Empty,
        }
    }
}

fn join_or_dash<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> String {
    let parts: Vec<T> = items.into_iter().collect();
    if parts.is_empty() {
        return "─".into();
    }
    parts.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(", ")
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), theme::label()),
        Span::styled(value, theme::value()),
    ])
}

/// Labelled rows for one country.
fn country_lines(country: &Country) -> Vec<Line<'static>> {
    let currencies = join_or_dash(country.currencies.iter().map(|(code, c)| match &c.symbol {
        Some(sym) => format!("{} ({code}, {sym})", c.name),
        None => format!("{} ({code})", c.name),
    }));
    let region = match &country.subregion {
        Some(sub) => format!("{} · {sub}", country.region),
        None => country.region.clone(),
    };

    vec![
        field("Official name", country.official_name.clone()),
        field("Code", country.code.clone()),
        field("Region", region),
        field("Capital", join_or_dash(&country.capitals)),
        field(
            "Population",
            format!(
                "{} ({})",
                number_fmt::fmt_grouped(country.population),
                number_fmt::fmt_population_short(country.population)
            ),
        ),
        field("Area", number_fmt::fmt_area(country.area)),
        field("Currencies", currencies),
        field("Languages", join_or_dash(country.languages.values())),
        field("Borders", join_or_dash(&country.borders)),
        field(
            "Flag",
            country
                .flags
                .png
                .clone()
                .or_else(|| country.flags.svg.clone())
                .unwrap_or_else(|| "─".into()),
        ),
    ]
}

impl Component for DetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent, _view: &View<'_>) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                Some(Action::Navigate(Route::Home))
            }
            KeyCode::Char('f' | ' ') => match &self.detail {
                Detail::Loaded(country) => Some(Action::ToggleFavorite(country.code.clone())),
                _ => None,
            },
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RouteChanged(Route::Country(code)) => {
                if self.detail.code() != Some(code.as_str()) || !matches!(self.detail, Detail::Loaded(_)) {
                    self.detail = Detail::Loading(code.clone());
                }
            }
            Action::DetailLoaded { code, result } if self.detail.code() == Some(code.as_str()) => {
                self.detail = match result {
                    Ok(country) => Detail::Loaded(Arc::clone(country)),
                    Err(message) => Detail::Failed {
                        code: code.clone(),
                        message: message.clone(),
                    },
                };
            }
            Action::Logout => self.detail = Detail::Empty,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, view: &View<'_>) {
        let (title, body) = match &self.detail {
            Detail::Empty => (Line::from(" Country "), vec![]),
            Detail::Loading(code) => (
                Line::from(format!(" {code} ")),
                vec![Line::from(Span::styled("Loading…", theme::label()))],
            ),
            Detail::Failed { code, message } => (
                Line::from(format!(" {code} ")),
                vec![Line::from(Span::styled(message.clone(), theme::error()))],
            ),
            Detail::Loaded(country) => {
                let star = if view.list.is_favorite(&country.code) {
                    Span::styled(" ★", theme::star())
                } else {
                    Span::styled(" ☆", theme::label())
                };
                (
                    Line::from(vec![
                        star,
                        Span::styled(format!(" {} ", country.name), theme::title_style()),
                    ]),
                    country_lines(country),
                )
            }
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [content] = Layout::vertical([Constraint::Min(1)])
            .horizontal_margin(2)
            .vertical_margin(1)
            .areas(inner);
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), content);
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("f", "favorite"), ("Esc", "back")]
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use terra_core::{Currency, Flags};

    use super::*;
    use crate::screens::test_support::{press, with_view};

    fn france() -> Arc<Country> {
        let mut currencies = IndexMap::new();
        currencies.insert(
            "EUR".to_owned(),
            Currency {
                name: "Euro".into(),
                symbol: Some("€".into()),
            },
        );
        Arc::new(Country {
            code: "FRA".into(),
            name: "France".into(),
            official_name: "French Republic".into(),
            region: "Europe".into(),
            subregion: Some("Western Europe".into()),
            capitals: vec!["Paris".into()],
            population: 67_391_582,
            area: Some(551_695.0),
            flags: Flags::default(),
            borders: vec!["BEL".into(), "DEU".into()],
            currencies,
            languages: IndexMap::from([("fra".to_owned(), "French".to_owned())]),
        })
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn lines_cover_every_field() {
        let lines: Vec<String> = country_lines(&france()).iter().map(text).collect();
        assert_eq!(lines[2].trim_end(), "Region        Europe · Western Europe");
        assert!(lines[4].ends_with("67,391,582 (67.4M)"));
        assert!(lines[6].ends_with("Euro (EUR, €)"));
        assert!(lines[8].ends_with("BEL, DEU"));
        assert!(lines[9].ends_with('─'));
    }

    #[test]
    fn stale_lookup_is_ignored() {
        let mut screen = DetailScreen::new();
        screen.update(&Action::RouteChanged(Route::Country("DEU".into()))).ok();
        screen
            .update(&Action::DetailLoaded {
                code: "FRA".into(),
                result: Ok(france()),
            })
            .ok();
        assert!(matches!(screen.detail, Detail::Loading(ref c) if c == "DEU"));
    }

    #[test]
    fn favorite_key_needs_loaded_country() {
        with_view(|view| {
            let mut screen = DetailScreen::new();
            let none = screen.handle_key_event(press(KeyCode::Char('f')), view).ok().flatten();
            assert!(none.is_none());

            screen.update(&Action::RouteChanged(Route::Country("FRA".into()))).ok();
            screen
                .update(&Action::DetailLoaded {
                    code: "FRA".into(),
                    result: Ok(france()),
                })
                .ok();
            let action = screen.handle_key_event(press(KeyCode::Char('f')), view).ok().flatten();
            assert!(matches!(action, Some(Action::ToggleFavorite(ref c)) if c == "FRA"));
        });
    }
}
