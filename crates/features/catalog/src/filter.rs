//! Compiles a [`FilterSpec`] into a reusable [`Predicate`].
//!
//! Needles are lower-cased once at compile time so that matching a whole catalog does not
//! re-normalize the spec per record. Blank strings and NaN price bounds compile to "no
//! constraint".

use chrono::NaiveDate;
use confhub_domain::{ConferenceRecord, FilterSpec, PriceRange};
use std::collections::BTreeSet;

/// A compiled conjunction of the active constraints of a [`FilterSpec`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    categories: BTreeSet<String>,
    date: Option<NaiveDate>,
    location: Option<String>,
    price: PriceRange,
    search: Option<String>,
}

/// Builds the predicate for `spec`.
///
/// ```rust
/// use confhub_catalog::filter::compile;
/// use confhub_domain::FilterSpec;
///
/// let predicate = compile(&FilterSpec::default().with_search("   "));
/// assert!(predicate.is_identity());
/// ```
#[must_use]
pub fn compile(spec: &FilterSpec) -> Predicate {
    Predicate {
        categories: spec.categories.clone(),
        date: spec.date,
        location: needle(&spec.location),
        price: PriceRange::new(spec.price.min, spec.price.max),
        search: needle(&spec.search),
    }
}

fn needle(raw: &str) -> Option<String> {
    if raw.trim().is_empty() { None } else { Some(raw.to_lowercase()) }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Predicate {
    /// The predicate that accepts every record.
    #[must_use]
    pub fn everything() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.categories.is_empty()
            && self.date.is_none()
            && self.location.is_none()
            && self.price.is_unbounded()
            && self.search.is_none()
    }

    #[must_use]
    pub fn matches(&self, record: &ConferenceRecord) -> bool {
        self.matches_category(record)
            && self.date.is_none_or(|day| record.date == day)
            && self.location.as_deref().is_none_or(|loc| contains_folded(&record.location, loc))
            && self.price.contains(record.price)
            && self.matches_search(record)
    }

    fn matches_category(&self, record: &ConferenceRecord) -> bool {
        self.categories.is_empty() || self.categories.contains(&record.category)
    }

    fn matches_search(&self, record: &ConferenceRecord) -> bool {
        self.search.as_deref().is_none_or(|term| {
            contains_folded(&record.title, term) || contains_folded(&record.description, term)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confhub_domain::ConferenceId;

    fn record() -> ConferenceRecord {
        ConferenceRecord {
            id: ConferenceId(1),
            title: "React Brasil 2024".to_owned(),
            description: "Hooks, server components and more".to_owned(),
            category: "Frontend".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            location: "São Paulo, SP".to_owned(),
            price: 250.0,
            spaces: 100,
            image: None,
        }
    }

    #[test]
    fn text_matching_ignores_case() {
        let spec = FilterSpec::default().with_location("SÃO PAULO").with_search("HOOKS");
        assert!(compile(&spec).matches(&record()));
    }

    #[test]
    fn search_does_not_look_at_location() {
        let spec = FilterSpec::default().with_search("paulo");
        assert!(!compile(&spec).matches(&record()));
    }

    #[test]
    fn nan_bounds_do_not_constrain() {
        let mut spec = FilterSpec::default();
        spec.price = PriceRange { min: Some(f64::NAN), max: Some(f64::NAN) };
        let predicate = compile(&spec);
        assert!(predicate.is_identity());
        assert!(predicate.matches(&record()));
    }

    #[test]
    fn date_matches_exact_day_only() {
        let spec = FilterSpec::default().with_date(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        assert!(!compile(&spec).matches(&record()));
    }
}
