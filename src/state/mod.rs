//! Dashboard state management
//!
//! The durable state of a running dashboard: the shared dataset, the filter
//! controls, the annotation store and the remembered point selection.

mod annotations;
mod filters;

pub use annotations::{describe_selection, Annotation, AnnotationStore, SelectedPoint};
pub use filters::{FilterState, ValueRange};

use crate::data::Dataset;
use std::sync::Arc;

/// Main dashboard state container
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Loaded once, shared read-only by every view
    pub dataset: Arc<Dataset>,

    /// Filter control values
    pub filters: FilterState,

    /// Annotations on the annotated chart, in insertion order
    pub annotations: AnnotationStore,

    /// Point picked by the latest click, if any
    pub selection: Option<SelectedPoint>,
}

impl DashboardState {
    /// Create the startup state: initial filters, no annotations, nothing selected
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filters = FilterState::initial(&dataset);
        Self {
            dataset,
            filters,
            annotations: AnnotationStore::new(),
            selection: None,
        }
    }

    pub fn selection_description(&self) -> String {
        describe_selection(self.selection.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::display::NO_SELECTION_MESSAGE;
    use crate::data::{Row, Timestamp};

    #[test]
    fn test_startup_state() {
        let ts = Timestamp::from_unix_seconds(0.0).unwrap();
        let dataset = Arc::new(Dataset::from_rows(vec![Row::new(ts, "B", "West", 4.0)]).unwrap());
        let state = DashboardState::new(dataset);

        assert!(state.annotations.is_empty());
        assert!(state.selection.is_none());
        assert_eq!(state.filters.selected_category, "B");
        assert_eq!(state.selection_description(), NO_SELECTION_MESSAGE);
    }
}
