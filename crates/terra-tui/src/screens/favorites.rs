//! Favorites screen: the bookmarked subset of the loaded collection.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, TableState},
};

use terra_core::Route;

use crate::action::Action;
use crate::component::{Component, View};
use crate::theme;
use crate::widgets::country_table::{self, CountryTable};

pub struct FavoritesScreen {
    table_state: TableState,
}

impl FavoritesScreen {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn selected_code(&self, view: &View<'_>) -> Option<String> {
        let rows = view.list.favorites_view();
        country_table::clamp_selection(&self.table_state, rows.len())
            .and_then(|idx| rows.get(idx).map(|c| c.code.clone()))
    }
}

impl Component for FavoritesScreen {
    fn handle_key_event(&mut self, key: KeyEvent, view: &View<'_>) -> Result<Option<Action>> {
        let len = view.list.favorites_view().len();
        Ok(match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                country_table::move_selection(&mut self.table_state, len, 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                country_table::move_selection(&mut self.table_state, len, -1);
                None
            }
            KeyCode::Enter => self
                .selected_code(view)
                .map(|code| Action::Navigate(Route::Country(code))),
            KeyCode::Char('f' | ' ') => self.selected_code(view).map(Action::ToggleFavorite),
            KeyCode::Esc | KeyCode::Char('b') => Some(Action::Navigate(Route::Home)),
            _ => None,
        })
    }

    fn render(&self, frame: &mut Frame, area: Rect, view: &View<'_>) {
        let rows = view.list.favorites_view();
        if rows.is_empty() {
            let message = if view.list.canonical().is_empty() && view.list.status().is_loading() {
                "Loading…"
            } else {
                "No favorites added yet."
            };
            let empty = Paragraph::new(vec![
                Line::default(),
                Line::from(Span::styled(message, theme::label())),
                Line::from(Span::styled(
                    "Press f on a country to bookmark it.",
                    theme::key_hint(),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(Span::styled(" ★ Favorites ", theme::title_style()))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_focused()),
            );
            frame.render_widget(empty, area);
            return;
        }

        CountryTable {
            countries: &rows,
            favorites: view.list.favorites(),
            sort: None,
            title: Line::from(vec![
                Span::styled(" ★ ", theme::star()),
                Span::styled(format!("Favorites ({}) ", rows.len()), theme::title_style()),
            ]),
            focused: true,
        }
        .render(frame, area, &self.table_state);
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("Enter", "details"), ("f", "remove"), ("Esc", "back")]
    }
}
