//! Home screen: search box with suggestions, region filter, sortable
//! country table.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, TableState},
};

use terra_core::{LoadStatus, NavInput, Route, SortKey};

use crate::action::Action;
use crate::component::{Component, View};
use crate::theme;
use crate::widgets::country_table::{self, CountryTable};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Search,
    Table,
}

pub struct HomeScreen {
    input: String,
    focus: Focus,
    table_state: TableState,
    /// Where the dropdown was last drawn, for mouse hit-testing.
    dropdown_area: Cell<Rect>,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            focus: Focus::Table,
            table_state: TableState::default().with_selected(Some(0)),
            dropdown_area: Cell::new(Rect::default()),
        }
    }

    fn selected_code(&self, view: &View<'_>) -> Option<String> {
        let rows = view.list.working_set();
        country_table::clamp_selection(&self.table_state, rows.len())
            .and_then(|idx| rows.get(idx))
            .map(|c| c.code.clone())
    }

    fn handle_search_key(&mut self, key: KeyEvent, view: &View<'_>) -> Option<Action> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.input.push(c);
                Some(Action::QueryChanged(self.input.clone()))
            }
            (_, KeyCode::Backspace) => {
                self.input.pop();
                Some(Action::QueryChanged(self.input.clone()))
            }
            (_, KeyCode::Down) => Some(Action::SuggestionNav(NavInput::Down)),
            (_, KeyCode::Up) => Some(Action::SuggestionNav(NavInput::Up)),
            (_, KeyCode::Enter) => {
                if view.list.suggestion_state().selected().is_some() {
                    Some(Action::SuggestionNav(NavInput::Enter))
                } else {
                    self.focus = Focus::Table;
                    Some(Action::SubmitSearch(self.input.clone()))
                }
            }
            (_, KeyCode::Esc) => {
                if view.list.suggestion_state().is_open() {
                    Some(Action::SuggestionNav(NavInput::Escape))
                } else {
                    self.focus = Focus::Table;
                    None
                }
            }
            (_, KeyCode::Tab) => {
                self.focus = Focus::Table;
                Some(Action::SuggestionNav(NavInput::ClickOutside))
            }
            _ => None,
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent, view: &View<'_>) -> Option<Action> {
        let len = view.list.working_set().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                country_table::move_selection(&mut self.table_state, len, 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                country_table::move_selection(&mut self.table_state, len, -1);
                None
            }
            KeyCode::PageDown => {
                country_table::move_selection(&mut self.table_state, len, 10);
                None
            }
            KeyCode::PageUp => {
                country_table::move_selection(&mut self.table_state, len, -10);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.table_state.select(Some(0));
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.table_state.select(len.checked_sub(1));
                None
            }
            KeyCode::Enter => self
                .selected_code(view)
                .map(|code| Action::Navigate(Route::Country(code))),
            KeyCode::Char('f' | ' ') => self.selected_code(view).map(Action::ToggleFavorite),
            KeyCode::Char('/') | KeyCode::Tab => {
                self.focus = Focus::Search;
                None
            }
            KeyCode::Char('r') => Some(Action::CycleRegion { forward: true }),
            KeyCode::Char('R') => Some(Action::CycleRegion { forward: false }),
            KeyCode::Char('n') => Some(Action::SortBy(SortKey::Name)),
            KeyCode::Char('p') => Some(Action::SortBy(SortKey::Population)),
            KeyCode::Char('a') => Some(Action::SortBy(SortKey::Area)),
            KeyCode::Char('x') => Some(Action::ResetFilters),
            KeyCode::Char('l') => Some(Action::Reload),
            _ => None,
        }
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Search;
        let line = if self.input.is_empty() && !focused {
            Line::from(Span::styled("Search by name…", theme::label()))
        } else {
            Line::from(vec![
                Span::styled(self.input.as_str(), theme::value()),
                Span::styled(if focused { "█" } else { "" }, theme::key_hint_key()),
            ])
        };
        let search = Paragraph::new(line).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    theme::border_focused()
                } else {
                    theme::border_default()
                }),
        );
        frame.render_widget(search, area);
    }

    fn render_region(frame: &mut Frame, area: Rect, view: &View<'_>) {
        let label = view
            .list
            .region()
            .map_or_else(|| "All regions".to_owned(), |r| r.as_ref().to_owned());
        let region = Paragraph::new(Line::from(vec![
            Span::styled("◂ ", theme::key_hint()),
            Span::styled(label, theme::value()),
            Span::styled(" ▸", theme::key_hint()),
        ]))
        .block(
            Block::default()
                .title(" Region ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default()),
        );
        frame.render_widget(region, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view: &View<'_>) {
        let list = view.list;
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let spinner = SPINNER[(view.tick as usize) % SPINNER.len()];
        let line = match list.status() {
            LoadStatus::Loading => Line::from(vec![
                Span::styled(format!(" {spinner} "), theme::key_hint_key()),
                Span::styled("Loading countries…", theme::label()),
            ]),
            LoadStatus::NoResults => {
                Line::from(Span::styled(" No countries found.", theme::label()))
            }
            LoadStatus::Failed(message) => Line::from(vec![
                Span::styled(" ✗ ", theme::error()),
                Span::styled(message.as_str(), theme::error()),
                Span::styled("  l retry", theme::key_hint()),
            ]),
            LoadStatus::Idle | LoadStatus::Ready => Line::from(vec![
                Span::styled(format!(" {} ", list.working_set().len()), theme::value()),
                Span::styled(
                    format!("of {} countries", list.canonical().len()),
                    theme::label(),
                ),
                Span::styled(
                    if list.query().trim().is_empty() {
                        String::new()
                    } else {
                        format!("  matching \"{}\"", list.query().trim())
                    },
                    theme::label(),
                ),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_dropdown(&self, frame: &mut Frame, anchor: Rect, view: &View<'_>) {
        let state = view.list.suggestion_state();
        let suggestions = view.list.suggestions();
        if !state.is_open() || suggestions.is_empty() {
            self.dropdown_area.set(Rect::default());
            return;
        }

        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let height = (suggestions.len() as u16 + 2).min(frame.area().height.saturating_sub(anchor.bottom()));
        let area = Rect::new(anchor.x, anchor.bottom(), anchor.width, height);
        self.dropdown_area.set(area);

        let items: Vec<ListItem> = suggestions
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<4}", c.code), theme::key_hint_key()),
                    Span::styled(c.name.as_str(), theme::value()),
                    Span::styled(
                        c.capital().map(|cap| format!("  · {cap}")).unwrap_or_default(),
                        theme::label(),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme::table_selected())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_focused())
                    .style(ratatui::style::Style::default().bg(theme::BG_DARK)),
            );
        let mut list_state = ListState::default().with_selected(state.selected());

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

impl Component for HomeScreen {
    fn handle_key_event(&mut self, key: KeyEvent, view: &View<'_>) -> Result<Option<Action>> {
        Ok(match self.focus {
            Focus::Search => self.handle_search_key(key, view),
            Focus::Table => self.handle_table_key(key, view),
        })
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, view: &View<'_>) -> Result<Option<Action>> {
        if !view.list.suggestion_state().is_open() {
            return Ok(None);
        }
        let area = self.dropdown_area.get();
        let pos = Position::new(mouse.column, mouse.row);
        let inner = area.inner(ratatui::layout::Margin::new(1, 1));
        if inner.contains(pos) {
            let idx = usize::from(mouse.row - inner.y);
            return Ok(Some(Action::SuggestionNav(NavInput::Click(idx))));
        }
        Ok(Some(Action::SuggestionNav(NavInput::ClickOutside)))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RouteChanged(route) if *route != Route::Home => {
                self.input.clear();
                self.focus = Focus::Table;
                self.table_state.select(Some(0));
            }
            Action::ResetFilters | Action::Logout => {
                self.input.clear();
                self.focus = Focus::Table;
                self.table_state.select(Some(0));
            }
            Action::FetchDone(_) | Action::CycleRegion { .. } | Action::SubmitSearch(_) => {
                self.table_state.select(Some(0));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, view: &View<'_>) {
        let [controls, status, table] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);
        let [search, region] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(20)]).areas(controls);

        self.render_search(frame, search);
        Self::render_region(frame, region, view);
        Self::render_status(frame, status, view);

        CountryTable {
            countries: view.list.working_set(),
            favorites: view.list.favorites(),
            sort: view.list.sort_spec(),
            title: Line::from(Span::styled(" Countries ", theme::title_style())),
            focused: self.focus == Focus::Table,
        }
        .render(frame, table, &self.table_state);

        self.render_dropdown(frame, search, view);
    }

    fn captures_text(&self) -> bool {
        self.focus == Focus::Search
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.focus {
            Focus::Search => &[
                ("↑↓", "suggestions"),
                ("Enter", "search"),
                ("Esc", "close"),
                ("Tab", "table"),
            ],
            Focus::Table => &[
                ("/", "search"),
                ("Enter", "details"),
                ("f", "favorite"),
                ("r/R", "region"),
                ("n/p/a", "sort"),
                ("x", "reset"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::screens::test_support::{press, with_view};

    fn typed(screen: &mut HomeScreen, view: &View<'_>, text: &str) -> Option<Action> {
        let mut last = None;
        for c in text.chars() {
            last = screen.handle_key_event(press(KeyCode::Char(c)), view).ok().flatten();
        }
        last
    }

    #[test]
    fn slash_focuses_search_and_typing_updates_query() {
        with_view(|view| {
            let mut screen = HomeScreen::new();
            assert!(!screen.captures_text());
            screen.handle_key_event(press(KeyCode::Char('/')), view).ok();
            assert!(screen.captures_text());
            let action = typed(&mut screen, view, "fra");
            assert!(matches!(action, Some(Action::QueryChanged(ref q)) if q == "fra"));
        });
    }

    #[test]
    fn enter_without_selection_submits_search() {
        with_view(|view| {
            let mut screen = HomeScreen::new();
            screen.handle_key_event(press(KeyCode::Tab), view).ok();
            typed(&mut screen, view, "ger");
            let action = screen.handle_key_event(press(KeyCode::Enter), view).ok().flatten();
            assert!(matches!(action, Some(Action::SubmitSearch(ref q)) if q == "ger"));
            assert_eq!(screen.focus, Focus::Table);
        });
    }

    #[test]
    fn table_keys_map_to_list_actions() {
        with_view(|view| {
            let mut screen = HomeScreen::new();
            let mut key = |c| screen.handle_key_event(press(KeyCode::Char(c)), view).ok().flatten();
            assert!(matches!(key('p'), Some(Action::SortBy(SortKey::Population))));
            assert!(matches!(key('r'), Some(Action::CycleRegion { forward: true })));
            assert!(matches!(key('R'), Some(Action::CycleRegion { forward: false })));
            assert!(matches!(key('x'), Some(Action::ResetFilters)));
            // Empty working set: nothing to open or favorite.
            assert!(key('f').is_none());
        });
    }

    #[test]
    fn reset_clears_search_text() {
        with_view(|view| {
            let mut screen = HomeScreen::new();
            screen.handle_key_event(press(KeyCode::Char('/')), view).ok();
            typed(&mut screen, view, "spa");
            screen.update(&Action::ResetFilters).ok();
            assert_eq!(screen.input, "");
            assert!(!screen.captures_text());
        });
    }

    #[test]
    fn leaving_home_forgets_search_text() {
        with_view(|view| {
            let mut screen = HomeScreen::new();
            screen.handle_key_event(press(KeyCode::Char('/')), view).ok();
            typed(&mut screen, view, "ger");

            screen.update(&Action::RouteChanged(Route::Home)).ok();
            assert_eq!(screen.input, "ger");

            screen.update(&Action::RouteChanged(Route::Favorites)).ok();
            assert_eq!(screen.input, "");
            assert_eq!(screen.focus, Focus::Table);
        });
    }

    #[test]
    fn click_is_ignored_while_dropdown_closed() {
        with_view(|view| {
            let mut screen = HomeScreen::new();
            let click = MouseEvent {
                kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
                column: 3,
                row: 5,
                modifiers: KeyModifiers::NONE,
            };
            assert!(screen.handle_mouse_event(click, view).ok().flatten().is_none());
        });
    }
}
