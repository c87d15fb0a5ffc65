//! Filter descriptions for the conference list.
//!
//! A [`FilterSpec`] is plain data; compiling it into a predicate happens in the catalog
//! feature. Every field is optional and the default value constrains nothing.

use bitflags::bitflags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

bitflags! {
    /// Which constraints of a [`FilterSpec`] are in force.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
    pub struct ActiveFilters: u8 {
        const CATEGORY = 1 << 0;
        const DATE = 1 << 1;
        const LOCATION = 1 << 2;
        const PRICE = 1 << 3;
        const SEARCH = 1 << 4;
    }
}

/// A closed price interval. Unset bounds do not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Builds a normalized range.
    ///
    /// NaN bounds are dropped, negative bounds clamp to zero, and a reversed pair is
    /// swapped so that `min <= max` always holds.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let clean = |bound: Option<f64>| bound.filter(|v| !v.is_nan()).map(|v| v.max(0.0));
        let (min, max) = (clean(min), clean(max));

        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self { min: Some(hi), max: Some(lo) },
            _ => Self { min, max },
        }
    }

    #[must_use]
    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    #[must_use]
    pub fn up_to(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|lo| price >= lo) && self.max.is_none_or(|hi| price <= hi)
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// The combined filter and search constraints of the list view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Accepted categories; empty accepts every category.
    pub categories: BTreeSet<String>,
    /// Exact calendar day.
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the location.
    pub location: String,
    pub price: PriceRange,
    /// Case-insensitive substring of the title or the description.
    pub search: String,
}

impl FilterSpec {
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub const fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Applies the fields present in `patch`, leaving the others untouched.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }

    #[must_use]
    pub fn active(&self) -> ActiveFilters {
        let mut active = ActiveFilters::empty();
        active.set(ActiveFilters::CATEGORY, !self.categories.is_empty());
        active.set(ActiveFilters::DATE, self.date.is_some());
        active.set(ActiveFilters::LOCATION, !self.location.trim().is_empty());
        active.set(ActiveFilters::PRICE, !self.price.is_unbounded());
        active.set(ActiveFilters::SEARCH, !self.search.trim().is_empty());
        active
    }

    /// `true` when this filter matches every record.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.active().is_empty()
    }
}

/// A partial update of the sidebar filters.
///
/// `date: Some(None)` clears the date; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub categories: Option<BTreeSet<String>>,
    pub date: Option<Option<NaiveDate>>,
}

impl FilterPatch {
    #[must_use]
    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { categories: Some(categories.into_iter().map(Into::into).collect()), date: None }
    }

    #[must_use]
    pub const fn date(date: Option<NaiveDate>) -> Self {
        Self { categories: None, date: Some(date) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_price_bounds_are_swapped() {
        let range = PriceRange::between(600.0, 200.0);
        assert_eq!(range, PriceRange { min: Some(200.0), max: Some(600.0) });
    }

    #[test]
    fn malformed_price_bounds_are_unset_or_clamped() {
        let range = PriceRange::new(Some(f64::NAN), Some(-5.0));
        assert_eq!(range, PriceRange { min: None, max: Some(0.0) });
        assert!(PriceRange::new(Some(f64::NAN), None).is_unbounded());
    }

    #[test]
    fn price_range_is_inclusive() {
        let range = PriceRange::between(100.0, 500.0);
        assert!(range.contains(100.0));
        assert!(range.contains(500.0));
        assert!(!range.contains(500.01));
        assert!(PriceRange::default().contains(f64::MAX));
    }

    #[test]
    fn active_flags_follow_fields() {
        assert!(FilterSpec::default().is_identity());

        let spec = FilterSpec::default()
            .with_categories(["Frontend"])
            .with_location("   ")
            .with_price(PriceRange::up_to(300.0));
        assert_eq!(spec.active(), ActiveFilters::CATEGORY | ActiveFilters::PRICE);
    }

    #[test]
    fn merge_applies_only_present_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut spec = FilterSpec::default().with_categories(["Backend"]).with_date(date);

        spec.merge(FilterPatch::categories(["Frontend", "DevOps"]));
        assert_eq!(spec.date, Some(date));
        assert_eq!(spec.categories.len(), 2);

        spec.merge(FilterPatch::date(None));
        assert_eq!(spec.date, None);
        assert_eq!(spec.categories.len(), 2);
    }
}
