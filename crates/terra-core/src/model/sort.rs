// ── Sort specification ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    Name,
    Population,
    Area,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    #[strum(to_string = "ascending", serialize = "asc")]
    Ascending,
    #[strum(to_string = "descending", serialize = "desc")]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_parses_short_and_long_forms() {
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!("Ascending".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.flipped(), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.to_string(), "descending");
    }

    #[test]
    fn key_round_trips_lowercase() {
        assert_eq!("Population".parse::<SortKey>().unwrap(), SortKey::Population);
        assert_eq!(SortKey::Area.to_string(), "area");
    }
}
