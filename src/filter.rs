//! Row filtering
//!
//! Two predicate shapes share three of their four inputs but answer different
//! questions:
//!
//! - [`ScopedFilter`] keys on the category dropdown and feeds the summary
//!   panel and the data table.
//! - [`BroadFilter`] keys on the category checklist and feeds the charts.
//!
//! Both are pure. A combination that matches nothing yields an empty subset,
//! never an error.

use crate::data::{Dataset, Row};
use crate::state::FilterState;

/// A filter over dataset rows
pub trait RowPredicate {
    fn matches(&self, row: &Row) -> bool;
}

/// Value range AND selected category AND selected region
#[derive(Debug, Clone, Copy)]
pub struct ScopedFilter<'a> {
    filters: &'a FilterState,
}

impl<'a> ScopedFilter<'a> {
    pub fn new(filters: &'a FilterState) -> Self {
        Self { filters }
    }
}

impl RowPredicate for ScopedFilter<'_> {
    fn matches(&self, row: &Row) -> bool {
        self.filters.value_range.contains(row.value)
            && row.category == self.filters.selected_category
            && row.region == self.filters.selected_region
    }
}

/// Value range AND selected region AND category in the visible set
#[derive(Debug, Clone, Copy)]
pub struct BroadFilter<'a> {
    filters: &'a FilterState,
}

impl<'a> BroadFilter<'a> {
    pub fn new(filters: &'a FilterState) -> Self {
        Self { filters }
    }
}

impl RowPredicate for BroadFilter<'_> {
    fn matches(&self, row: &Row) -> bool {
        self.filters.value_range.contains(row.value)
            && row.region == self.filters.selected_region
            && self.filters.is_visible(&row.category)
    }
}

impl<F: Fn(&Row) -> bool> RowPredicate for F {
    fn matches(&self, row: &Row) -> bool {
        self(row)
    }
}

/// Rows of `dataset` that pass `predicate`, in dataset order
pub fn filter_rows<'a, P: RowPredicate + ?Sized>(dataset: &'a Dataset, predicate: &P) -> Vec<&'a Row> {
    profiling::scope!("filter_rows");
    dataset.rows().iter().filter(|row| predicate.matches(row)).collect()
}

/// Subset used by the summary panel and the data table
pub fn scoped_rows<'a>(dataset: &'a Dataset, filters: &FilterState) -> Vec<&'a Row> {
    filter_rows(dataset, &ScopedFilter::new(filters))
}

/// Subset used by the overview and per-category charts
pub fn broad_rows<'a>(dataset: &'a Dataset, filters: &FilterState) -> Vec<&'a Row> {
    filter_rows(dataset, &BroadFilter::new(filters))
}
