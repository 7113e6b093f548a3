//! Component trait, the building block for every screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use terra_core::{ListController, RegistryClient};

use crate::action::Action;

/// Read-only application state handed to screens for input mapping and
/// rendering. Screens keep only view-local state (input text, selection).
pub struct View<'a> {
    pub list: &'a ListController<RegistryClient>,
    /// Tick counter for the loading spinner.
    pub tick: u64,
}

/// Lifecycle: (`handle_key_event` | `handle_mouse_event` | `update` | `render`)*
pub trait Component: Send {
    /// Map a key press to an action, or None.
    fn handle_key_event(&mut self, key: KeyEvent, view: &View<'_>) -> Result<Option<Action>>;

    fn handle_mouse_event(&mut self, _mouse: MouseEvent, _view: &View<'_>) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Observe an action the app has processed. May return a follow-up.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, view: &View<'_>);

    /// True while a text field has focus; single-letter global shortcuts
    /// are suspended.
    fn captures_text(&self) -> bool {
        false
    }

    /// Key hints for the status bar.
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }
}
