// ── Client-side ordering and suggestion matching ──
//
// Pure functions over `Arc<Country>` slices. Nothing here touches the
// network.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::model::{Country, SortKey, SortOrder, SortSpec};

/// Upper bound on suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 6;

fn compare(a: &Country, b: &Country, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Population => a.population.cmp(&b.population),
        SortKey::Area => a.area_or_zero().total_cmp(&b.area_or_zero()),
    }
}

/// Stable in-place sort. Ties keep their relative order in both
/// directions.
pub fn sort_countries(countries: &mut [Arc<Country>], spec: SortSpec) {
    countries.sort_by(|a, b| {
        let ord = compare(a, b, spec.key);
        match spec.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Whether `country` matches a lower-cased, trimmed needle: substring of
/// the common name or primary capital, or the exact code.
pub fn matches_suggestion(country: &Country, needle: &str) -> bool {
    country.name.to_lowercase().contains(needle)
        || country
            .capital()
            .is_some_and(|c| c.to_lowercase().contains(needle))
        || country.code.eq_ignore_ascii_case(needle)
}

/// Up to [`MAX_SUGGESTIONS`] entries of `canonical` matching `query`, in
/// input order. Empty for an empty query.
pub fn suggestions(canonical: &[Arc<Country>], query: &str) -> Vec<Arc<Country>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    canonical
        .iter()
        .filter(|c| matches_suggestion(c, &needle))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::model::{Country, Flags};

    pub(crate) fn country(code: &str, name: &str, capital: &str, population: u64) -> Country {
        Country {
            code: code.to_owned(),
            name: name.to_owned(),
            official_name: name.to_owned(),
            region: "Europe".to_owned(),
            subregion: None,
            capitals: if capital.is_empty() {
                Vec::new()
            } else {
                vec![capital.to_owned()]
            },
            population,
            area: None,
            flags: Flags::default(),
            borders: Vec::new(),
            currencies: indexmap::IndexMap::new(),
            languages: indexmap::IndexMap::new(),
        }
    }

    pub(crate) fn france() -> Country {
        let mut c = country("FRA", "France", "Paris", 67_000_000);
        c.area = Some(551_695.0);
        c
    }

    pub(crate) fn germany() -> Country {
        let mut c = country("DEU", "Germany", "Berlin", 83_000_000);
        c.area = Some(357_114.0);
        c
    }

    pub(crate) fn arcs(countries: Vec<Country>) -> Vec<Arc<Country>> {
        countries.into_iter().map(Arc::new).collect()
    }

    pub(crate) fn codes(countries: &[Arc<Country>]) -> Vec<&str> {
        countries.iter().map(|c| c.code.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{arcs, codes, country, france, germany};
    use super::*;

    fn sample() -> Vec<Arc<Country>> {
        arcs(vec![
            country("URY", "Uruguay", "Montevideo", 3_400_000),
            france(),
            country("AUT", "austria", "Vienna", 9_000_000),
            germany(),
            country("ATA", "Antarctica", "", 1_000),
            country("NIU", "Niue", "Alofi", 1_000),
        ])
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let mut list = sample();
        sort_countries(&mut list, SortSpec::new(SortKey::Name, SortOrder::Ascending));
        assert_eq!(codes(&list), ["ATA", "AUT", "FRA", "DEU", "NIU", "URY"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut list = sample();
        sort_countries(
            &mut list,
            SortSpec::new(SortKey::Population, SortOrder::Ascending),
        );
        assert_eq!(codes(&list)[..2], ["ATA", "NIU"]);

        sort_countries(
            &mut list,
            SortSpec::new(SortKey::Population, SortOrder::Descending),
        );
        assert_eq!(codes(&list)[4..], ["ATA", "NIU"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let spec = SortSpec::new(SortKey::Area, SortOrder::Descending);
        let mut once = sample();
        sort_countries(&mut once, spec);
        let mut twice = once.clone();
        sort_countries(&mut twice, spec);
        assert_eq!(codes(&once), codes(&twice));
    }

    #[test]
    fn toggled_name_sort_reverses() {
        let mut asc = sample();
        sort_countries(&mut asc, SortSpec::new(SortKey::Name, SortOrder::Ascending));
        let mut desc = asc.clone();
        sort_countries(&mut desc, SortSpec::new(SortKey::Name, SortOrder::Descending));

        let mut reversed = codes(&asc);
        reversed.reverse();
        assert_eq!(codes(&desc), reversed);
    }

    #[test]
    fn missing_area_sorts_as_zero() {
        let mut list = sample();
        sort_countries(&mut list, SortSpec::new(SortKey::Area, SortOrder::Descending));
        assert_eq!(codes(&list)[..2], ["FRA", "DEU"]);
    }

    #[test]
    fn suggestions_match_name_capital_and_code() {
        let list = sample();
        assert_eq!(codes(&suggestions(&list, "AN")), ["FRA", "DEU", "ATA"]);
        assert_eq!(codes(&suggestions(&list, "vienna")), ["AUT"]);
        assert_eq!(codes(&suggestions(&list, "deu")), ["DEU"]);
        assert!(suggestions(&list, "   ").is_empty());
    }

    #[test]
    fn suggestions_are_capped_and_drawn_from_input() {
        let list: Vec<Arc<Country>> = (0..20)
            .map(|i| Arc::new(country(&format!("X{i:02}"), &format!("Land {i}"), "", 1)))
            .collect();
        for query in ["land", "l", "1", "x0", "zzz"] {
            let found = suggestions(&list, query);
            assert!(found.len() <= MAX_SUGGESTIONS);
            let needle = query.to_lowercase();
            for c in &found {
                assert!(list.iter().any(|orig| Arc::ptr_eq(orig, c)));
                assert!(matches_suggestion(c, &needle));
            }
        }
        assert_eq!(suggestions(&list, "land").len(), MAX_SUGGESTIONS);
    }
}
