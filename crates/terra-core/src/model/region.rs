// ── Region filter ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Registry regions a list can be filtered by.
///
/// Names match the registry's `/region/{region}` path values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Antarctic,
}

impl Region {
    /// Parse a region filter where `""` and `"all"` mean "no filter".
    pub fn parse_filter(input: &str) -> Result<Option<Self>, strum::ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// All regions in display order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}
