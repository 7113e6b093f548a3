// ── Country domain type ──

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A validated country record.
///
/// Built once at the registry boundary and never mutated afterwards;
/// views share it as `Arc<Country>` and only filter or reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, upper-case. Unique key.
    pub code: String,
    /// Common name (e.g. "Germany").
    pub name: String,
    /// Official name (e.g. "Federal Republic of Germany").
    pub official_name: String,
    pub region: String,
    pub subregion: Option<String>,
    /// Capitals in registry order. The first entry is the primary one.
    pub capitals: Vec<String>,
    pub population: u64,
    /// Area in km². Absent when the registry has no (or a nonsensical) value.
    pub area: Option<f64>,
    pub flags: Flags,
    pub borders: Vec<String>,
    pub currencies: IndexMap<String, Currency>,
    pub languages: IndexMap<String, String>,
}

impl Country {
    /// Primary capital, if the country has one.
    pub fn capital(&self) -> Option<&str> {
        self.capitals.first().map(String::as_str)
    }

    /// Area for ordering purposes; missing counts as zero.
    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// Case-insensitive code comparison.
    pub fn has_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub svg: Option<String>,
    pub png: Option<String>,
    /// Accessible description of the flag.
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}
