//! Line chart payloads: overview, per-category and annotated

use serde::Serialize;

use crate::constants::display::{ANNOTATED_TITLE, NO_DATA_CHART_TITLE, OVERVIEW_TITLE};
use crate::constants::schema;
use crate::data::{Dataset, Row, Timestamp};
use crate::state::{Annotation, AnnotationStore};

/// One (Timestamp, Value) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: Timestamp,
    pub y: f64,
}

/// Labeled line, sorted by timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Build a series from rows; ties on timestamp keep dataset order
    pub fn from_rows<'a>(label: impl Into<String>, rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut points: Vec<ChartPoint> = rows
            .into_iter()
            .map(|row| ChartPoint {
                x: row.timestamp,
                y: row.value,
            })
            .collect();
        points.sort_by_key(|p| p.x);
        Self {
            label: label.into(),
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStatus {
    Populated,
    NoData,
}

/// Everything the renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub title: String,
    pub status: ChartStatus,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ChartSeries>,
    /// Text markers, in the order they were added
    pub markers: Vec<Annotation>,
}

impl ChartPayload {
    fn populated(title: impl Into<String>, series: Vec<ChartSeries>) -> Self {
        Self {
            title: title.into(),
            status: ChartStatus::Populated,
            x_label: schema::TIMESTAMP,
            y_label: schema::VALUE,
            series,
            markers: Vec::new(),
        }
    }

    /// A named but empty chart
    pub fn no_data() -> Self {
        Self {
            status: ChartStatus::NoData,
            ..Self::populated(NO_DATA_CHART_TITLE, Vec::new())
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.status == ChartStatus::NoData
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Chart panel dedicated to a single category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub category: String,
    pub chart: ChartPayload,
}

/// One series per category present in the broad subset, in order of first
/// appearance
pub fn overview_chart(rows: &[&Row]) -> ChartPayload {
    profiling::scope!("overview_chart");
    if rows.is_empty() {
        return ChartPayload::no_data();
    }

    let mut categories: Vec<&str> = Vec::new();
    for row in rows {
        if !categories.contains(&row.category.as_str()) {
            categories.push(&row.category);
        }
    }

    let series = categories
        .into_iter()
        .map(|category| {
            ChartSeries::from_rows(category, rows.iter().copied().filter(|r| r.category == category))
        })
        .collect();

    ChartPayload::populated(OVERVIEW_TITLE, series)
}

/// The broad subset restricted to `category`
pub fn category_chart(rows: &[&Row], category: &str) -> ChartPayload {
    let matching: Vec<&Row> = rows.iter().copied().filter(|r| r.category == category).collect();
    if matching.is_empty() {
        return ChartPayload::no_data();
    }
    ChartPayload::populated(
        format!("Category {}", category),
        vec![ChartSeries::from_rows(category, matching)],
    )
}

/// A panel per configured category, in configured order
pub fn category_charts(rows: &[&Row], panels: &[String]) -> Vec<CategoryChart> {
    profiling::scope!("category_charts");
    panels
        .iter()
        .map(|category| CategoryChart {
            category: category.clone(),
            chart: category_chart(rows, category),
        })
        .collect()
}

/// Full, unfiltered dataset as one series plus one marker per annotation
pub fn annotated_chart(dataset: &Dataset, annotations: &AnnotationStore) -> ChartPayload {
    profiling::scope!("annotated_chart");
    let mut chart = ChartPayload::populated(
        ANNOTATED_TITLE,
        vec![ChartSeries::from_rows(schema::VALUE, dataset.rows())],
    );
    chart.markers = annotations.entries().to_vec();
    chart
}
