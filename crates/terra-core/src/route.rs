// ── Routed views ──

use std::fmt;

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Home,
    /// Detail view for one country code.
    Country(String),
    Favorites,
}

impl Route {
    /// Parse a path such as `/country/FRA`. `/` maps to the login view.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let mut segments = trimmed.split('/').filter(|s| !s.is_empty());
        let route = match (segments.next(), segments.next()) {
            (None, _) | (Some("login"), None) => Self::Login,
            (Some("signup"), None) => Self::Signup,
            (Some("home"), None) => Self::Home,
            (Some("favorites"), None) => Self::Favorites,
            (Some("country"), Some(code)) => Self::Country(code.to_ascii_uppercase()),
            _ => return None,
        };
        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    /// Whether the view requires a session token.
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Home | Self::Country(_) | Self::Favorites)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::Signup => f.write_str("/signup"),
            Self::Home => f.write_str("/home"),
            Self::Country(code) => write!(f, "/country/{code}"),
            Self::Favorites => f.write_str("/favorites"),
        }
    }
}
