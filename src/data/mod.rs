pub mod row;
pub mod source;
pub mod stats;

// Re-export key types for convenience
pub use row::{CellValue, Column, Row, Timestamp};
pub use source::{Dataset, ValueDomain};
pub use stats::Stats;
