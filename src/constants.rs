//! Application-wide constants and default values
//!
//! This module centralizes the defaults and display strings used throughout
//! the dashboard, making them easier to maintain and configure.

/// Dataset schema
pub mod schema {
    /// Timestamp column name
    pub const TIMESTAMP: &str = "Timestamp";

    /// Category column name
    pub const CATEGORY: &str = "Category";

    /// Region column name
    pub const REGION: &str = "Region";

    /// Value column name
    pub const VALUE: &str = "Value";

    /// Number of rows used for schema inference when reading CSV
    pub const INFER_SCHEMA_ROWS: usize = 100;
}

/// Filtering and control defaults
pub mod controls {
    /// Range slider step
    pub const DEFAULT_SLIDER_STEP: f64 = 5.0;

    /// Spacing between labelled range slider marks
    pub const DEFAULT_MARK_SPACING: i64 = 10;

    /// Categories that get their own chart panel
    pub const DEFAULT_CATEGORY_PANELS: [&str; 3] = ["A", "B", "C"];
}

/// Periodic refresh defaults
pub mod refresh {
    /// Refresh interval in milliseconds
    pub const DEFAULT_INTERVAL_MS: u64 = 5000;

    /// Smallest accepted refresh interval in milliseconds
    pub const MIN_INTERVAL_MS: u64 = 100;
}

/// Display strings handed to the rendering layer
pub mod display {
    /// Dashboard title
    pub const DASHBOARD_TITLE: &str = "Interactive Data Visualization Dashboard";

    /// Shown by the summary panel and data table when the scoped subset is empty
    pub const NO_DATA_MESSAGE: &str = "No data available for the selected filters.";

    /// Title of any chart computed from an empty subset
    pub const NO_DATA_CHART_TITLE: &str = "No Data Available";

    /// Title of the overview chart
    pub const OVERVIEW_TITLE: &str = "Overall Trends by Selected Categories";

    /// Title of the annotated chart
    pub const ANNOTATED_TITLE: &str = "Annotated Line Chart";

    /// Selection prompt before any point has been clicked
    pub const NO_SELECTION_MESSAGE: &str = "Click on the chart to select a point for annotation.";

    /// Decimal places used for summary statistics
    pub const STATS_DECIMALS: i32 = 2;

    /// Format used when rendering timestamps; fractional seconds only appear
    /// when non-zero
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
}

/// Export defaults
pub mod export {
    /// File name offered for the CSV download
    pub const DEFAULT_FILE_NAME: &str = "real_time_data.csv";
}

/// Logging defaults
pub mod logging {
    /// Default tracing filter directive
    pub const DEFAULT_FILTER: &str = "info";
}
