use serde::Serialize;

use crate::constants::display::NO_DATA_MESSAGE;
use crate::data::{CellValue, Dataset, Row};

/// Data table payload
///
/// An empty subset yields `NoData` rather than `Records` with no rows, so a
/// caller can tell "nothing matched" apart from a table that was emptied on
/// purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableView {
    Records {
        columns: Vec<String>,
        records: Vec<Vec<CellValue>>,
    },
    NoData {
        message: String,
    },
}

impl TableView {
    pub fn is_no_data(&self) -> bool {
        matches!(self, TableView::NoData { .. })
    }

    pub fn record_count(&self) -> usize {
        match self {
            TableView::Records { records, .. } => records.len(),
            TableView::NoData { .. } => 0,
        }
    }
}

/// The scoped subset verbatim, cells in the dataset's column order
pub fn data_table(dataset: &Dataset, rows: &[&Row]) -> TableView {
    profiling::scope!("data_table");
    if rows.is_empty() {
        return TableView::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    let columns = dataset.columns();
    TableView::Records {
        columns: dataset.column_names(),
        records: rows
            .iter()
            .map(|row| columns.iter().map(|&c| row.cell(c)).collect())
            .collect(),
    }
}
