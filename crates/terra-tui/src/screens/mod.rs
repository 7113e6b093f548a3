//! Screen implementations. Each screen is a top-level Component.

pub mod detail;
pub mod favorites;
pub mod home;
pub mod login;
pub mod signup;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create one component per screen.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Login, Box::new(login::LoginScreen::new())),
        (ScreenId::Signup, Box::new(signup::SignupScreen::new())),
        (ScreenId::Home, Box::new(home::HomeScreen::new())),
        (ScreenId::Detail, Box::new(detail::DetailScreen::new())),
        (ScreenId::Favorites, Box::new(favorites::FavoritesScreen::new())),
    ]
}
