//! Derived views
//!
//! Pure functions from a filtered subset (or the whole dataset, for the
//! annotated chart) to the payload a renderer draws.

mod chart;
mod export;
mod summary;
mod table;

pub use chart::{
    annotated_chart, category_chart, category_charts, overview_chart, CategoryChart, ChartPayload, ChartPoint,
    ChartSeries, ChartStatus,
};
pub use export::{export_csv, CsvExport};
pub use summary::{summary_stats, SummaryView};
pub use table::{data_table, TableView};
