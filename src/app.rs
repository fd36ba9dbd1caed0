use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::controls::ControlOptions;
use crate::data::Dataset;
use crate::error::Result;
use crate::filter::{broad_rows, scoped_rows};
use crate::router::{stale_views, AnnotationPlan, InputEvent, ViewId};
use crate::state::DashboardState;
use crate::views::{
    annotated_chart, category_charts, data_table, export_csv, overview_chart, summary_stats, CategoryChart,
    ChartPayload, CsvExport, SummaryView, TableView,
};

/// Payloads produced by one update cycle
///
/// Only the views that were stale carry a value; the rest are `None` and the
/// renderer keeps what it last drew.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleOutput {
    pub cycle: u64,
    pub recomputed: Vec<ViewId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_chart: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_charts: Option<Vec<CategoryChart>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_table: Option<TableView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_chart: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<CsvExport>,
}

impl CycleOutput {
    pub fn is_empty(&self) -> bool {
        self.recomputed.is_empty()
    }
}

/// The reactive engine: owns the durable state and runs update cycles
///
/// Cycles are strictly sequential; each one applies a whole batch before any
/// view is computed.
pub struct Dashboard {
    pub state: DashboardState,
    pub config: DashboardConfig,
    cycle: u64,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        Self {
            state: DashboardState::new(dataset),
            config,
            cycle: 0,
        }
    }

    /// Number of cycles processed so far
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn dataset(&self) -> &Dataset {
        &self.state.dataset
    }

    pub fn controls(&self) -> ControlOptions {
        ControlOptions::from_dataset(&self.state.dataset, &self.config)
    }

    /// First page load: every view except the export
    pub fn initial_render(&mut self) -> Result<CycleOutput> {
        self.cycle += 1;
        let views: BTreeSet<ViewId> = ViewId::REFRESHED.into_iter().collect();
        self.render(&views)
    }

    /// Process one coalesced batch of events
    ///
    /// Filter changes apply in arrival order (last write wins per control),
    /// then the annotation plan runs, then every stale view is recomputed
    /// from the new state.
    pub fn process(&mut self, events: &[InputEvent]) -> Result<CycleOutput> {
        profiling::scope!("process_cycle");
        self.cycle += 1;

        let stale = stale_views(events);

        let mut filters_changed = false;
        for event in events {
            filters_changed |= event.apply_to_filters(&mut self.state.filters);
        }
        if filters_changed {
            self.state.filters.validate(&self.state.dataset);
            debug!(filters = ?self.state.filters, "filters updated");
        }

        let plan = AnnotationPlan::from_events(events);
        if !plan.is_empty() {
            plan.apply(&mut self.state.selection, &mut self.state.annotations);
        }

        let output = self.render(&stale)?;
        info!(
            cycle = self.cycle,
            events = events.len(),
            recomputed = output.recomputed.len(),
            annotations = self.state.annotations.len(),
            "cycle complete"
        );
        Ok(output)
    }

    /// Compute the given views from the current state
    pub fn render(&self, views: &BTreeSet<ViewId>) -> Result<CycleOutput> {
        let dataset = self.state.dataset.as_ref();
        let filters = &self.state.filters;
        let mut output = CycleOutput {
            cycle: self.cycle,
            recomputed: views.iter().copied().collect(),
            ..Default::default()
        };

        if ViewId::SCOPED.iter().any(|v| views.contains(v)) {
            let rows = scoped_rows(dataset, filters);
            if views.contains(&ViewId::Summary) {
                output.summary = Some(summary_stats(&rows));
            }
            if views.contains(&ViewId::DataTable) {
                output.data_table = Some(data_table(dataset, &rows));
            }
        }

        if ViewId::BROAD.iter().any(|v| views.contains(v)) {
            let rows = broad_rows(dataset, filters);
            if views.contains(&ViewId::OverviewChart) {
                output.overview_chart = Some(overview_chart(&rows));
            }
            if views.contains(&ViewId::CategoryCharts) {
                output.category_charts = Some(category_charts(&rows, &self.config.category_panels));
            }
        }

        if views.contains(&ViewId::Selection) {
            output.selection = Some(self.state.selection_description());
        }
        if views.contains(&ViewId::AnnotatedChart) {
            output.annotated_chart = Some(annotated_chart(dataset, &self.state.annotations));
        }
        if views.contains(&ViewId::Export) {
            output.export = Some(export_csv(dataset, &self.config.export_file_name)?);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::display::NO_SELECTION_MESSAGE;
    use crate::data::{Row, Timestamp};

    fn ts(s: f64) -> Timestamp {
        Timestamp::from_unix_seconds(s).unwrap()
    }

    fn dashboard() -> Dashboard {
        let rows = vec![
            Row::new(ts(1.0), "A", "North", 10.0),
            Row::new(ts(2.0), "B", "North", 20.0),
            Row::new(ts(3.0), "A", "South", 30.0),
            Row::new(ts(4.0), "C", "North", 40.0),
            Row::new(ts(5.0), "A", "North", 50.0),
        ];
        Dashboard::new(Arc::new(Dataset::from_rows(rows).unwrap()), DashboardConfig::default())
    }

    #[test]
    fn test_initial_render_fills_every_view() {
        let mut dash = dashboard();
        let out = dash.initial_render().unwrap();

        assert_eq!(out.cycle, 1);
        assert_eq!(out.summary.unwrap().to_string(), "Mean: 30.00, Max: 50.00, Min: 10.00");
        assert_eq!(out.data_table.unwrap().record_count(), 2);
        assert_eq!(out.overview_chart.unwrap().series.len(), 3);
        assert_eq!(out.category_charts.unwrap().len(), 3);
        assert_eq!(out.selection.as_deref(), Some(NO_SELECTION_MESSAGE));
        assert_eq!(out.annotated_chart.unwrap().point_count(), 5);
        assert!(out.export.is_none());
    }

    #[test]
    fn test_category_change_recomputes_scoped_views_only() {
        let mut dash = dashboard();
        let out = dash
            .process(&[InputEvent::CategorySelected { category: "B".into() }])
            .unwrap();

        assert_eq!(out.recomputed, vec![ViewId::Summary, ViewId::DataTable]);
        assert_eq!(out.data_table.unwrap().record_count(), 1);
        assert!(out.overview_chart.is_none());
        assert!(out.annotated_chart.is_none());
    }

    #[test]
    fn test_toggle_change_leaves_scoped_views_alone() {
        let mut dash = dashboard();
        let out = dash
            .process(&[InputEvent::VisibleCategoriesChanged {
                categories: BTreeSet::from(["B".to_string()]),
            }])
            .unwrap();

        assert!(out.summary.is_none());
        let charts = out.category_charts.unwrap();
        assert!(charts[0].chart.is_no_data());
        assert!(!charts[1].chart.is_no_data());
        assert_eq!(out.overview_chart.unwrap().series.len(), 1);
    }

    #[test]
    fn test_annotation_cycle() {
        let mut dash = dashboard();
        let out = dash
            .process(&[InputEvent::PointClicked { x: ts(5.0), y: 10.0 }])
            .unwrap();
        assert_eq!(out.selection.as_deref(), Some("Selected Point - X: 1970-01-01 00:00:05, Y: 10"));
        assert!(out.annotated_chart.unwrap().markers.is_empty());

        dash.process(&[InputEvent::AddAnnotationRequested { text: "peak".into() }])
            .unwrap();
        let out = dash
            .process(&[InputEvent::AddAnnotationRequested { text: "peak2".into() }])
            .unwrap();
        let markers = out.annotated_chart.unwrap().markers;
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].text, "peak2");

        let out = dash
            .process(&[
                InputEvent::AddAnnotationRequested { text: "a".into() },
                InputEvent::ClearAnnotationsRequested,
            ])
            .unwrap();
        assert!(out.annotated_chart.unwrap().markers.is_empty());
        assert!(dash.state.annotations.is_empty());
        assert!(dash.state.selection.is_some());
    }

    #[test]
    fn test_tick_repeats_previous_output() {
        let mut dash = dashboard();
        let first = dash.initial_render().unwrap();
        let tick = dash.process(&[InputEvent::Tick]).unwrap();

        assert_eq!(tick.summary, first.summary);
        assert_eq!(tick.data_table, first.data_table);
        assert_eq!(tick.overview_chart, first.overview_chart);
        assert_eq!(tick.annotated_chart, first.annotated_chart);
        assert!(tick.export.is_none());
    }

    #[test]
    fn test_export_ignores_filters() {
        let mut dash = dashboard();
        let out = dash
            .process(&[
                InputEvent::CategorySelected { category: "C".into() },
                InputEvent::ExportRequested,
            ])
            .unwrap();

        assert_eq!(out.data_table.unwrap().record_count(), 1);
        let export = out.export.unwrap();
        assert_eq!(export.data_row_count(), 5);
        assert_eq!(export.file_name, "real_time_data.csv");
    }

    #[test]
    fn test_last_filter_write_wins_within_batch() {
        let mut dash = dashboard();
        dash.process(&[
            InputEvent::RegionSelected { region: "South".into() },
            InputEvent::RegionSelected { region: "North".into() },
        ])
        .unwrap();
        assert_eq!(dash.state.filters.selected_region, "North");
    }

    #[test]
    fn test_empty_batch_recomputes_nothing() {
        let mut dash = dashboard();
        let out = dash.process(&[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(dash.cycle(), 1);
        assert_eq!(serde_json::to_value(&out).unwrap()["recomputed"], serde_json::json!([]));
    }
}
