//! Country table shared by the home and favorites screens.

use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
};

use terra_core::{Country, FavoritesStore, SortKey, SortOrder, SortSpec};

use crate::theme;
use crate::widgets::number_fmt;

/// Header label with an arrow when `key` is the active sort column.
pub fn header_label(title: &str, key: SortKey, sort: Option<SortSpec>) -> String {
    match sort {
        Some(spec) if spec.key == key => {
            let arrow = match spec.order {
                SortOrder::Ascending => '▲',
                SortOrder::Descending => '▼',
            };
            format!("{title} {arrow}")
        }
        _ => title.to_owned(),
    }
}

/// Selected index clamped to `len`; `None` for an empty table.
pub fn clamp_selection(state: &TableState, len: usize) -> Option<usize> {
    match len {
        0 => None,
        _ => Some(state.selected().unwrap_or(0).min(len - 1)),
    }
}

/// Move the selection by `delta` rows, clamped to the table.
pub fn move_selection(state: &mut TableState, len: usize, delta: isize) {
    let Some(current) = clamp_selection(state, len) else {
        state.select(None);
        return;
    };
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

pub struct CountryTable<'a> {
    pub countries: &'a [Arc<Country>],
    pub favorites: &'a FavoritesStore,
    pub sort: Option<SortSpec>,
    pub title: Line<'a>,
    pub focused: bool,
}

impl CountryTable<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &TableState) {
        let header = Row::new(vec![
            Cell::from(""),
            Cell::from("Code"),
            Cell::from(header_label("Name", SortKey::Name, self.sort)),
            Cell::from("Capital"),
            Cell::from("Region"),
            Cell::from(header_label("Population", SortKey::Population, self.sort)),
            Cell::from(header_label("Area", SortKey::Area, self.sort)),
        ])
        .style(theme::table_header());

        let rows = self.countries.iter().map(|c| {
            let star = if self.favorites.contains(&c.code) {
                Span::styled("★", theme::star())
            } else {
                Span::styled("☆", theme::label())
            };
            Row::new(vec![
                Cell::from(star),
                Cell::from(c.code.clone()),
                Cell::from(c.name.clone()),
                Cell::from(c.capital().unwrap_or("─").to_owned()),
                Cell::from(c.region.clone()),
                Cell::from(number_fmt::fmt_grouped(c.population)),
                Cell::from(number_fmt::fmt_area(c.area)),
            ])
            .style(theme::table_row())
        });

        let widths = [
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(15),
            Constraint::Length(16),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected())
            .block(
                Block::default()
                    .title(self.title.clone())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(if self.focused {
                        theme::border_focused()
                    } else {
                        theme::border_default()
                    }),
            );

        let mut state = state.clone();
        state.select(clamp_selection(&state, self.countries.len()));
        frame.render_stateful_widget(table, area, &mut state);
    }
}
