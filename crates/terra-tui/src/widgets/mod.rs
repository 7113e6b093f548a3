//! Reusable widgets shared across screens.

pub mod country_table;
pub mod form;
pub mod number_fmt;
