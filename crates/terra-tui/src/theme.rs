//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const OCEAN_BLUE: Color = Color::Rgb(96, 165, 250); // #60a5fa
pub const DEEP_BLUE: Color = Color::Rgb(30, 64, 175); // #1e40af
pub const STAR_YELLOW: Color = Color::Rgb(250, 204, 21); // #facc15
pub const LEAF_GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113); // #f87171
pub const SAND: Color = Color::Rgb(253, 186, 116); // #fdba74

pub const TEXT: Color = Color::Rgb(226, 232, 240); // #e2e8f0
pub const MUTED: Color = Color::Rgb(100, 116, 139); // #64748b
pub const BG_HIGHLIGHT: Color = Color::Rgb(30, 41, 59); // #1e293b
pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0f172a

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(OCEAN_BLUE).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(OCEAN_BLUE)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(OCEAN_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(STAR_YELLOW)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default().fg(MUTED)
}

pub fn value() -> Style {
    Style::default().fg(TEXT)
}

pub fn star() -> Style {
    Style::default().fg(STAR_YELLOW)
}

pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(OCEAN_BLUE).add_modifier(Modifier::BOLD)
}
