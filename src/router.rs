//! Event routing
//!
//! Maps the events fired in one update cycle to the views they make stale,
//! and resolves the annotation events of a cycle into a single ordered plan.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::data::Timestamp;
use crate::state::{AnnotationStore, FilterState, SelectedPoint};

/// A named input signal with its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Range slider moved
    ValueRangeChanged { min: f64, max: f64 },
    /// Category dropdown changed
    CategorySelected { category: String },
    /// Region dropdown changed
    RegionSelected { region: String },
    /// Category checklist changed
    VisibleCategoriesChanged { categories: BTreeSet<String> },
    /// Point clicked on the annotated chart
    PointClicked { x: Timestamp, y: f64 },
    /// "Add Annotation" pressed with the current text input
    AddAnnotationRequested { text: String },
    /// "Delete Annotations" pressed
    ClearAnnotationsRequested,
    /// Periodic refresh
    Tick,
    /// "Download Data" pressed
    ExportRequested,
}

/// Every derived output of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Summary,
    OverviewChart,
    CategoryCharts,
    DataTable,
    Selection,
    AnnotatedChart,
    Export,
}

impl ViewId {
    /// Views computed from the scoped subset
    pub const SCOPED: [ViewId; 2] = [ViewId::Summary, ViewId::DataTable];

    /// Views computed from the broad subset
    pub const BROAD: [ViewId; 2] = [ViewId::OverviewChart, ViewId::CategoryCharts];

    /// Views driven by clicks and annotation buttons
    pub const ANNOTATION: [ViewId; 2] = [ViewId::Selection, ViewId::AnnotatedChart];

    /// Every view a refresh recomputes; the export only runs on request
    pub const REFRESHED: [ViewId; 6] = [
        ViewId::Summary,
        ViewId::OverviewChart,
        ViewId::CategoryCharts,
        ViewId::DataTable,
        ViewId::Selection,
        ViewId::AnnotatedChart,
    ];
}

impl InputEvent {
    /// Views this event makes stale
    pub fn affected_views(&self) -> &'static [ViewId] {
        match self {
            InputEvent::ValueRangeChanged { .. } | InputEvent::RegionSelected { .. } => &[
                ViewId::Summary,
                ViewId::OverviewChart,
                ViewId::CategoryCharts,
                ViewId::DataTable,
            ],
            InputEvent::CategorySelected { .. } => &ViewId::SCOPED,
            InputEvent::VisibleCategoriesChanged { .. } => &ViewId::BROAD,
            InputEvent::PointClicked { .. }
            | InputEvent::AddAnnotationRequested { .. }
            | InputEvent::ClearAnnotationsRequested => &ViewId::ANNOTATION,
            InputEvent::Tick => &ViewId::REFRESHED,
            InputEvent::ExportRequested => &[ViewId::Export],
        }
    }

    /// Apply a filter control change; other events leave `filters` alone
    pub fn apply_to_filters(&self, filters: &mut FilterState) -> bool {
        match self {
            InputEvent::ValueRangeChanged { min, max } => filters.set_value_range(*min, *max),
            InputEvent::CategorySelected { category } => filters.set_category(category.clone()),
            InputEvent::RegionSelected { region } => filters.set_region(region.clone()),
            InputEvent::VisibleCategoriesChanged { categories } => {
                filters.visible_categories = categories.clone()
            }
            _ => return false,
        }
        true
    }
}

/// Union of the views made stale by a batch
pub fn stale_views(events: &[InputEvent]) -> BTreeSet<ViewId> {
    let stale: BTreeSet<ViewId> = events
        .iter()
        .flat_map(|event| event.affected_views().iter().copied())
        .collect();
    debug!(events = events.len(), ?stale, "stale views");
    stale
}

/// Annotation events of one cycle after conflict resolution
///
/// The latest click becomes the selection. Additions are evaluated in
/// arrival order against the store as it was before any clear. A clear in the
/// same cycle runs last, so clear wins over add whatever the arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPlan {
    pub selection: Option<SelectedPoint>,
    pub additions: Vec<String>,
    pub clear: bool,
}

impl AnnotationPlan {
    pub fn from_events(events: &[InputEvent]) -> Self {
        let mut plan = Self::default();
        for event in events {
            match event {
                InputEvent::PointClicked { x, y } => plan.selection = Some(SelectedPoint { x: *x, y: *y }),
                InputEvent::AddAnnotationRequested { text } => plan.additions.push(text.clone()),
                InputEvent::ClearAnnotationsRequested => plan.clear = true,
                _ => {}
            }
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_none() && self.additions.is_empty() && !self.clear
    }

    /// Run the plan against the router's durable state
    pub fn apply(&self, selection: &mut Option<SelectedPoint>, store: &mut AnnotationStore) {
        if let Some(point) = self.selection {
            *selection = Some(point);
        }
        for text in &self.additions {
            store.add(selection.as_ref(), text);
        }
        if self.clear {
            if !self.additions.is_empty() {
                debug!(additions = self.additions.len(), "clear overrides additions in the same cycle");
            }
            store.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: f64) -> Timestamp {
        Timestamp::from_unix_seconds(s).unwrap()
    }

    fn add(text: &str) -> InputEvent {
        InputEvent::AddAnnotationRequested { text: text.into() }
    }

    fn click(x: f64, y: f64) -> InputEvent {
        InputEvent::PointClicked { x: ts(x), y }
    }

    #[test]
    fn test_filter_events_touch_their_views_only() {
        let stale = stale_views(&[InputEvent::CategorySelected { category: "B".into() }]);
        assert_eq!(stale, BTreeSet::from(ViewId::SCOPED));

        let stale = stale_views(&[InputEvent::VisibleCategoriesChanged {
            categories: BTreeSet::new(),
        }]);
        assert_eq!(stale, BTreeSet::from(ViewId::BROAD));

        let stale = stale_views(&[InputEvent::RegionSelected { region: "x".into() }]);
        assert!(stale.contains(&ViewId::Summary) && stale.contains(&ViewId::OverviewChart));
        assert!(!stale.contains(&ViewId::AnnotatedChart));
    }

    #[test]
    fn test_annotation_events_touch_annotation_views() {
        let stale = stale_views(&[click(1.0, 2.0), InputEvent::ClearAnnotationsRequested]);
        assert_eq!(stale, BTreeSet::from(ViewId::ANNOTATION));
    }

    #[test]
    fn test_tick_refreshes_everything_but_export() {
        let stale = stale_views(&[InputEvent::Tick]);
        assert_eq!(stale.len(), 6);
        assert!(!stale.contains(&ViewId::Export));

        let stale = stale_views(&[InputEvent::ExportRequested]);
        assert_eq!(stale, BTreeSet::from([ViewId::Export]));
    }

    #[test]
    fn test_empty_batch_is_not_stale() {
        assert!(stale_views(&[]).is_empty());
    }

    #[test]
    fn test_apply_to_filters() {
        let mut filters = FilterState {
            value_range: crate::state::ValueRange::new(0.0, 1.0),
            selected_category: "A".into(),
            selected_region: "North".into(),
            visible_categories: BTreeSet::new(),
        };
        assert!(InputEvent::RegionSelected { region: "South".into() }.apply_to_filters(&mut filters));
        assert!(InputEvent::ValueRangeChanged { min: 2.0, max: 3.0 }.apply_to_filters(&mut filters));
        assert!(!InputEvent::Tick.apply_to_filters(&mut filters));

        assert_eq!(filters.selected_region, "South");
        assert_eq!(filters.value_range.max, 3.0);
    }

    #[test]
    fn test_click_then_add_annotates_clicked_point() {
        let mut selection = None;
        let mut store = AnnotationStore::new();

        AnnotationPlan::from_events(&[click(5.0, 10.0)]).apply(&mut selection, &mut store);
        assert!(store.is_empty());

        AnnotationPlan::from_events(&[add("peak")]).apply(&mut selection, &mut store);
        AnnotationPlan::from_events(&[add("peak2")]).apply(&mut selection, &mut store);

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].x, entries[0].y, entries[0].text.as_str()), (ts(5.0), 10.0, "peak"));
        assert_eq!((entries[1].x, entries[1].y, entries[1].text.as_str()), (ts(5.0), 10.0, "peak2"));
    }

    #[test]
    fn test_add_without_selection_is_ignored() {
        let mut selection = None;
        let mut store = AnnotationStore::new();
        AnnotationPlan::from_events(&[add("orphan")]).apply(&mut selection, &mut store);
        assert!(store.is_empty());
        assert!(selection.is_none());
    }

    #[test]
    fn test_clear_wins_over_add_in_either_order() {
        for events in [
            vec![add("a"), InputEvent::ClearAnnotationsRequested],
            vec![InputEvent::ClearAnnotationsRequested, add("a")],
        ] {
            let mut selection = Some(SelectedPoint { x: ts(1.0), y: 1.0 });
            let mut store = AnnotationStore::new();
            store.add(selection.as_ref(), "existing");

            AnnotationPlan::from_events(&events).apply(&mut selection, &mut store);
            assert!(store.is_empty());
            assert!(selection.is_some(), "clear must not touch the selection");
        }
    }

    #[test]
    fn test_latest_click_wins() {
        let plan = AnnotationPlan::from_events(&[click(1.0, 1.0), click(2.0, 4.0), add("x")]);
        assert_eq!(plan.selection, Some(SelectedPoint { x: ts(2.0), y: 4.0 }));
        assert_eq!(plan.additions, vec!["x".to_string()]);
        assert!(!plan.clear);
        assert!(AnnotationPlan::from_events(&[InputEvent::Tick]).is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let event: InputEvent = serde_json::from_str(r#"{"event":"point_clicked","x":"2024-01-01 00:00:00","y":3.5}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::PointClicked {
                x: Timestamp::parse("2024-01-01").unwrap(),
                y: 3.5
            }
        );

        let event: InputEvent = serde_json::from_str(r#"{"event":"clear_annotations_requested"}"#).unwrap();
        assert_eq!(event, InputEvent::ClearAnnotationsRequested);
    }
}
