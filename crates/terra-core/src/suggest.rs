// ── Suggestion dropdown navigation ──
//
// Three states, pure transitions. The dropdown renders only while open
// with at least one suggestion; the list itself lives in the controller.

/// Navigation state of the suggestion dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Closed,
    /// Open with no highlighted entry.
    Open,
    /// Open with the entry at this index highlighted.
    Selected(usize),
}

/// Inputs the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    /// The query text changed; `non_empty` after trimming.
    Typed { non_empty: bool },
    Down,
    Up,
    Enter,
    Escape,
    /// Pointer press outside the dropdown.
    ClickOutside,
    /// Pointer press on the entry at this index.
    Click(usize),
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: SuggestionState,
    /// Index of the suggestion chosen by this input, if any.
    pub commit: Option<usize>,
}

impl Transition {
    fn to(state: SuggestionState) -> Self {
        Self {
            state,
            commit: None,
        }
    }

    fn commit(index: usize) -> Self {
        Self {
            state: SuggestionState::Closed,
            commit: Some(index),
        }
    }
}

impl SuggestionState {
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn selected(self) -> Option<usize> {
        match self {
            Self::Selected(idx) => Some(idx),
            _ => None,
        }
    }

    /// Apply `input` given `count` current suggestions.
    ///
    /// Movement clamps to `[0, count - 1]` and never wraps. Committing
    /// always closes the dropdown.
    pub fn next(self, input: NavInput, count: usize) -> Transition {
        // A selection past the end (the list shrank) is pulled back first.
        let state = match self {
            Self::Selected(_) if count == 0 => Self::Open,
            Self::Selected(idx) if idx >= count => Self::Selected(count - 1),
            other => other,
        };

        match (input, state) {
            (NavInput::Typed { non_empty: true }, _) => Transition::to(Self::Open),
            (NavInput::Typed { non_empty: false } | NavInput::Escape | NavInput::ClickOutside, _) => {
                Transition::to(Self::Closed)
            }
            (NavInput::Down, Self::Open) if count > 0 => Transition::to(Self::Selected(0)),
            (NavInput::Down, Self::Selected(idx)) => {
                Transition::to(Self::Selected((idx + 1).min(count - 1)))
            }
            (NavInput::Up, Self::Selected(idx)) => {
                Transition::to(Self::Selected(idx.saturating_sub(1)))
            }
            (NavInput::Enter, Self::Selected(idx)) => Transition::commit(idx),
            (NavInput::Click(idx), _) if idx < count => Transition::commit(idx),
            _ => Transition::to(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: SuggestionState, inputs: &[NavInput], count: usize) -> Transition {
        let mut t = Transition::to(start);
        for input in inputs {
            t = t.state.next(*input, count);
        }
        t
    }

    #[test]
    fn typing_opens_and_clearing_closes() {
        let typed = NavInput::Typed { non_empty: true };
        assert_eq!(SuggestionState::Closed.next(typed, 3).state, SuggestionState::Open);
        assert_eq!(
            SuggestionState::Selected(2).next(typed, 3).state,
            SuggestionState::Open
        );
        assert_eq!(
            SuggestionState::Open
                .next(NavInput::Typed { non_empty: false }, 0)
                .state,
            SuggestionState::Closed
        );
    }

    #[test]
    fn movement_clamps_without_wrapping() {
        use NavInput::{Down, Up};

        let t = run(SuggestionState::Open, &[Down, Down, Down, Down, Down], 3);
        assert_eq!(t.state, SuggestionState::Selected(2));

        let t = run(SuggestionState::Selected(2), &[Up, Up, Up, Up], 3);
        assert_eq!(t.state, SuggestionState::Selected(0));

        assert_eq!(run(SuggestionState::Open, &[Up], 3).state, SuggestionState::Open);
        assert_eq!(run(SuggestionState::Open, &[Down], 0).state, SuggestionState::Open);
        assert_eq!(
            run(SuggestionState::Closed, &[Down], 3).state,
            SuggestionState::Closed
        );
    }

    #[test]
    fn enter_commits_only_with_selection() {
        let t = SuggestionState::Selected(1).next(NavInput::Enter, 3);
        assert_eq!(t.commit, Some(1));
        assert_eq!(t.state, SuggestionState::Closed);

        let t = SuggestionState::Open.next(NavInput::Enter, 3);
        assert_eq!(t.commit, None);
        assert_eq!(t.state, SuggestionState::Open);
    }

    #[test]
    fn escape_and_outside_click_close_without_commit() {
        for input in [NavInput::Escape, NavInput::ClickOutside] {
            let t = SuggestionState::Selected(0).next(input, 2);
            assert_eq!(t, Transition::to(SuggestionState::Closed));
        }
    }

    #[test]
    fn click_commits_from_any_open_state() {
        let t = SuggestionState::Open.next(NavInput::Click(4), 5);
        assert_eq!(t.commit, Some(4));
        assert_eq!(t.state, SuggestionState::Closed);

        let t = SuggestionState::Open.next(NavInput::Click(9), 5);
        assert_eq!(t.commit, None);
    }

    #[test]
    fn stale_selection_is_clamped_to_shrunken_list() {
        let t = SuggestionState::Selected(5).next(NavInput::Enter, 2);
        assert_eq!(t.commit, Some(1));
        let t = SuggestionState::Selected(5).next(NavInput::Up, 0);
        assert_eq!(t.state, SuggestionState::Open);
    }
}
