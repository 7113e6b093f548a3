//! Screen identifiers and their mapping from routes.

use std::fmt;

use terra_core::Route;

/// One screen component per kind of route. `Route::Country` carries the
/// code; the detail screen is shared across codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Login,
    Signup,
    Home,
    Detail,
    Favorites,
}

impl ScreenId {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Login => Self::Login,
            Route::Signup => Self::Signup,
            Route::Home => Self::Home,
            Route::Country(_) => Self::Detail,
            Route::Favorites => Self::Favorites,
        }
    }

    /// Auth forms get the full frame with no header.
    pub fn shows_header(self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Signup => "Create account",
            Self::Home => "Countries",
            Self::Detail => "Country",
            Self::Favorites => "Favorites",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detail_screen_serves_every_code() {
        assert_eq!(
            ScreenId::for_route(&Route::Country("FRA".into())),
            ScreenId::Detail
        );
        assert_eq!(
            ScreenId::for_route(&Route::Country("DEU".into())),
            ScreenId::Detail
        );
    }

    #[test]
    fn auth_forms_hide_header() {
        assert!(!ScreenId::Login.shows_header());
        assert!(!ScreenId::Signup.shows_header());
        assert!(ScreenId::Favorites.shows_header());
    }
}
