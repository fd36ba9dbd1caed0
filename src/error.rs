//! Error types for the dashboard
//!
//! Only the adapters around the engine can fail (dataset load, config load,
//! export, event scripts). The engine itself is total over its inputs.

use thiserror::Error;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Required column missing from the dataset
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Column present in the dataset but not part of the row schema
    #[error("Unexpected column '{column}' in dataset")]
    UnexpectedColumn { column: String },

    /// A cell could not be converted to its schema type
    #[error("Invalid {column} at row {row}: {reason}")]
    InvalidCell {
        column: String,
        row: usize,
        reason: String,
    },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            DashError::FileIo(e) => format!("File error: {}", e),
            DashError::Polars(e) => format!("Data error: {}", e),
            DashError::Config(msg) => format!("Config error: {}", msg),
            DashError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            DashError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            DashError::UnexpectedColumn { column } => {
                format!("Column '{}' is not part of the dataset schema", column)
            }
            DashError::InvalidCell {
                column,
                row,
                reason,
            } => format!("Row {}: bad {} ({})", row, column, reason),
            DashError::EmptyDataset => "Dataset is empty".to_string(),
            DashError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error
    pub fn title(&self) -> &'static str {
        match self {
            DashError::FileIo(_) => "File Error",
            DashError::Polars(_) => "Data Error",
            DashError::Config(_) => "Configuration Error",
            DashError::UnsupportedFormat { .. } => "Unsupported Format",
            DashError::ColumnNotFound { .. } => "Column Not Found",
            DashError::UnexpectedColumn { .. } => "Unexpected Column",
            DashError::InvalidCell { .. } => "Invalid Cell",
            DashError::EmptyDataset => "Empty Dataset",
            DashError::Json(_) => "JSON Error",
        }
    }
}
