// ── API-to-domain conversion ──
//
// Validates loosely-typed `RawCountry` payloads into `Country`. Records
// without a code or common name are dropped; everything else is
// normalized with sensible defaults.

use tracing::warn;

use terra_api::models::{RawCountry, RawCurrency, RawFlags};

use crate::model::{Country, Currency, Flags};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn convert_flags(raw: Option<RawFlags>) -> Flags {
    let raw = raw.unwrap_or_default();
    Flags {
        svg: non_empty(raw.svg),
        png: non_empty(raw.png),
        alt: non_empty(raw.alt),
    }
}

fn convert_currency(raw: RawCurrency) -> Currency {
    Currency {
        name: raw.name.unwrap_or_default(),
        symbol: non_empty(raw.symbol),
    }
}

/// Validate one raw record. Returns `None` when the record lacks a code
/// or a common name.
pub fn country_from_raw(raw: RawCountry) -> Option<Country> {
    let code = non_empty(raw.cca3)?.to_ascii_uppercase();
    let names = raw.name.unwrap_or_default();
    let name = non_empty(names.common)?;
    let official_name = non_empty(names.official).unwrap_or_else(|| name.clone());

    let population = raw
        .population
        .and_then(|p| u64::try_from(p).ok())
        .unwrap_or(0);
    let area = raw.area.filter(|a| a.is_finite() && *a >= 0.0);

    Some(Country {
        code,
        name,
        official_name,
        region: non_empty(raw.region).unwrap_or_default(),
        subregion: non_empty(raw.subregion),
        capitals: raw
            .capital
            .unwrap_or_default()
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect(),
        population,
        area,
        flags: convert_flags(raw.flags),
        borders: raw
            .borders
            .unwrap_or_default()
            .into_iter()
            .map(|b| b.trim().to_ascii_uppercase())
            .collect(),
        currencies: raw
            .currencies
            .unwrap_or_default()
            .into_iter()
            .map(|(code, currency)| (code, convert_currency(currency)))
            .collect(),
        languages: raw.languages.unwrap_or_default(),
    })
}

/// Validate a whole response, preserving order and logging dropped records.
pub fn countries_from_raw(raws: Vec<RawCountry>) -> Vec<Country> {
    let total = raws.len();
    let countries: Vec<Country> = raws.into_iter().filter_map(country_from_raw).collect();
    if countries.len() < total {
        warn!(
            dropped = total - countries.len(),
            total, "dropped country records without a code or name"
        );
    }
    countries
}
