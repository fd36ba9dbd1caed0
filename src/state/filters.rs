//! Filter control state

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::data::{Dataset, ValueDomain};

/// Inclusive range on the Value column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when the range and the domain share at least one value
    pub fn intersects(&self, domain: ValueDomain) -> bool {
        self.min <= domain.max && self.max >= domain.min
    }
}

impl From<ValueDomain> for ValueRange {
    fn from(domain: ValueDomain) -> Self {
        Self::new(domain.min, domain.max)
    }
}

/// Current values of every filter control
///
/// `selected_category` drives the scoped views (summary, table) while
/// `visible_categories` drives the chart family. The two are independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Range slider
    pub value_range: ValueRange,

    /// Category dropdown
    pub selected_category: String,

    /// Region dropdown
    pub selected_region: String,

    /// Category checklist for the charts
    pub visible_categories: BTreeSet<String>,
}

impl FilterState {
    /// Controls as they appear on first load: full range, first category and
    /// region, every category visible
    pub fn initial(dataset: &Dataset) -> Self {
        Self {
            value_range: dataset.value_domain().into(),
            selected_category: dataset.categories().first().cloned().unwrap_or_default(),
            selected_region: dataset.regions().first().cloned().unwrap_or_default(),
            visible_categories: dataset.categories().iter().cloned().collect(),
        }
    }

    pub fn set_value_range(&mut self, min: f64, max: f64) {
        self.value_range = ValueRange::new(min, max);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.selected_region = region.into();
    }

    pub fn set_visible_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible_categories = categories.into_iter().map(Into::into).collect();
    }

    /// Check if a category toggle is on
    pub fn is_visible(&self, category: &str) -> bool {
        self.visible_categories.contains(category)
    }

    /// Bring the state back inside the dataset's domain
    ///
    /// An inverted range is swapped. A range that overlaps the Value domain is
    /// clamped to it; a disjoint range is left alone so it keeps selecting
    /// nothing. Unknown toggle entries are dropped. Unknown dropdown values
    /// are kept and simply match no rows.
    pub fn validate(&mut self, dataset: &Dataset) {
        let range = &mut self.value_range;
        if range.min.is_nan() || range.max.is_nan() {
            *range = dataset.value_domain().into();
        }
        if range.min > range.max {
            std::mem::swap(&mut range.min, &mut range.max);
        }

        let domain = dataset.value_domain();
        if range.intersects(domain) {
            range.min = range.min.clamp(domain.min, domain.max);
            range.max = range.max.clamp(domain.min, domain.max);
        }

        let known = dataset.categories();
        self.visible_categories.retain(|c| known.contains(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Row, Timestamp};

    fn dataset() -> Dataset {
        let ts = |s: f64| Timestamp::from_unix_seconds(s).unwrap();
        Dataset::from_rows(vec![
            Row::new(ts(1.0), "A", "North", 10.0),
            Row::new(ts(2.0), "B", "South", 50.0),
            Row::new(ts(3.0), "C", "North", 90.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let filters = FilterState::initial(&dataset());
        assert_eq!(filters.value_range, ValueRange::new(10.0, 90.0));
        assert_eq!(filters.selected_category, "A");
        assert_eq!(filters.selected_region, "North");
        assert_eq!(filters.visible_categories.len(), 3);
        assert!(filters.is_visible("C"));
    }

    #[test]
    fn test_validate_swaps_and_clamps() {
        let ds = dataset();
        let mut filters = FilterState::initial(&ds);

        filters.set_value_range(120.0, 0.0);
        filters.validate(&ds);
        assert_eq!(filters.value_range, ValueRange::new(10.0, 90.0));

        filters.set_value_range(20.0, 200.0);
        filters.validate(&ds);
        assert_eq!(filters.value_range, ValueRange::new(20.0, 90.0));
    }

    #[test]
    fn test_validate_keeps_disjoint_range() {
        let ds = dataset();
        let mut filters = FilterState::initial(&ds);
        filters.set_value_range(200.0, 300.0);
        filters.validate(&ds);
        assert_eq!(filters.value_range, ValueRange::new(200.0, 300.0));
    }

    #[test]
    fn test_validate_drops_unknown_toggles() {
        let ds = dataset();
        let mut filters = FilterState::initial(&ds);
        filters.set_visible_categories(["A", "Z"]);
        filters.set_category("Z");
        filters.validate(&ds);

        assert_eq!(filters.visible_categories, BTreeSet::from(["A".to_string()]));
        assert_eq!(filters.selected_category, "Z");
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ValueRange::new(1.0, 2.0);
        assert!(range.contains(1.0));
        assert!(range.contains(2.0));
        assert!(!range.contains(2.0001));
    }
}
