use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use tracing::{debug, info};

use super::row::{Column, Row, Timestamp};
use crate::constants::display::TIMESTAMP_FORMAT;
use crate::constants::schema::INFER_SCHEMA_ROWS;
use crate::error::{DashError, Result};

/// Closed interval spanned by the Value column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

/// Immutable, loaded-once table of typed rows
///
/// Keeps the polars frame it was built from so the export writes the table
/// exactly as loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column order of the source table
    columns: Vec<Column>,
    rows: Vec<Row>,
    frame: DataFrame,
    categories: Vec<String>,
    regions: Vec<String>,
    domain: ValueDomain,
    source_path: Option<PathBuf>,
}

impl Dataset {
    /// Load a dataset from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        profiling::scope!("dataset_load");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DashError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let frame = match extension.to_lowercase().as_str() {
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
                .with_try_parse_dates(true)
                .finish()?
                .collect()?,
            ext => {
                return Err(DashError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let dataset = Self::from_dataframe(frame, Some(path.to_path_buf()))?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            categories = dataset.categories.len(),
            regions = dataset.regions.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Build a dataset from an already-loaded DataFrame
    pub fn from_dataframe(frame: DataFrame, path: Option<PathBuf>) -> Result<Self> {
        let mut columns = Vec::with_capacity(frame.width());
        for name in frame.get_column_names() {
            let column = Column::from_name(name.as_str()).ok_or_else(|| DashError::UnexpectedColumn {
                column: name.to_string(),
            })?;
            columns.push(column);
        }
        for required in Column::ALL {
            if !columns.contains(&required) {
                return Err(DashError::ColumnNotFound {
                    column: required.name().to_string(),
                });
            }
        }

        let timestamps = extract_timestamps(&column_series(&frame, Column::Timestamp)?)?;
        let categories = extract_strings(&column_series(&frame, Column::Category)?)?;
        let regions = extract_strings(&column_series(&frame, Column::Region)?)?;
        let values = extract_values(&column_series(&frame, Column::Value)?)?;

        let mut rows = Vec::with_capacity(frame.height());
        for (idx, (((timestamp, category), region), value)) in timestamps
            .into_iter()
            .zip(categories)
            .zip(regions)
            .zip(values)
            .enumerate()
        {
            let timestamp = timestamp.ok_or_else(|| invalid(Column::Timestamp, idx, "missing or unparseable"))?;
            let category = category.ok_or_else(|| invalid(Column::Category, idx, "missing"))?;
            let region = region.ok_or_else(|| invalid(Column::Region, idx, "missing"))?;
            let value = value.ok_or_else(|| invalid(Column::Value, idx, "missing"))?;
            rows.push(Row {
                timestamp,
                category,
                region,
                value,
            });
        }

        Self::assemble(columns, rows, frame, path)
    }

    /// Build a dataset from typed rows, using the canonical column order
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        let micros: Vec<i64> = rows.iter().map(|r| r.timestamp.unix_micros()).collect();
        let timestamp = Series::new(Column::Timestamp.name().into(), micros)
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
        let category = Series::new(
            Column::Category.name().into(),
            rows.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(),
        );
        let region = Series::new(
            Column::Region.name().into(),
            rows.iter().map(|r| r.region.as_str()).collect::<Vec<_>>(),
        );
        let value = Series::new(
            Column::Value.name().into(),
            rows.iter().map(|r| r.value).collect::<Vec<_>>(),
        );
        let frame = DataFrame::new(vec![timestamp.into(), category.into(), region.into(), value.into()])?;

        Self::assemble(Column::ALL.to_vec(), rows, frame, None)
    }

    fn assemble(columns: Vec<Column>, rows: Vec<Row>, frame: DataFrame, source_path: Option<PathBuf>) -> Result<Self> {
        if rows.is_empty() {
            return Err(DashError::EmptyDataset);
        }

        let mut categories: Vec<String> = Vec::new();
        let mut regions: Vec<String> = Vec::new();
        let mut domain = ValueDomain {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        };
        for (idx, row) in rows.iter().enumerate() {
            if !row.value.is_finite() {
                return Err(invalid(Column::Value, idx, "not finite"));
            }
            domain.min = domain.min.min(row.value);
            domain.max = domain.max.max(row.value);
            if !categories.contains(&row.category) {
                categories.push(row.category.clone());
            }
            if !regions.contains(&row.region) {
                regions.push(row.region.clone());
            }
        }
        debug!(?categories, ?regions, min = domain.min, max = domain.max, "dataset domain");

        Ok(Self {
            columns,
            rows,
            frame,
            categories,
            regions,
            domain,
            source_path,
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column order of the source table
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct regions in order of first appearance
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn value_domain(&self) -> ValueDomain {
        self.domain
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Serialize the full, unfiltered dataset as CSV with a header row
    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the full, unfiltered dataset to a CSV file
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv_to(file)?;
        info!(path = %path.display(), rows = self.len(), "dataset exported");
        Ok(())
    }

    fn write_csv_to<W: std::io::Write>(&self, writer: W) -> Result<()> {
        profiling::scope!("dataset_export");
        let mut frame = self.frame.clone();
        CsvWriter::new(writer)
            .include_header(true)
            .with_datetime_format(Some(TIMESTAMP_FORMAT.to_string()))
            .finish(&mut frame)?;
        Ok(())
    }
}

fn invalid(column: Column, row: usize, reason: &str) -> DashError {
    DashError::InvalidCell {
        column: column.name().to_string(),
        row,
        reason: reason.to_string(),
    }
}

fn column_series(frame: &DataFrame, column: Column) -> Result<Series> {
    frame
        .column(column.name())
        .map(|c| c.as_materialized_series().clone())
        .map_err(|_| DashError::ColumnNotFound {
            column: column.name().to_string(),
        })
}

fn extract_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let series = series.cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

fn extract_strings(series: &Series) -> Result<Vec<Option<String>>> {
    let series = series.cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect())
}

/// Datetime and Date columns convert directly; strings go through
/// `Timestamp::parse`; anything else is read as Unix seconds.
fn extract_timestamps(series: &Series) -> Result<Vec<Option<Timestamp>>> {
    match series.dtype() {
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            Ok(series
                .datetime()?
                .into_iter()
                .map(|opt| opt.and_then(|v| from_epoch(v, unit)))
                .collect())
        }
        DataType::Date => Ok(series
            .date()?
            .into_iter()
            .map(|opt| {
                opt.and_then(|days| DateTime::from_timestamp(days as i64 * 86_400, 0))
                    .map(|dt| Timestamp::new(dt.naive_utc()))
            })
            .collect()),
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(Timestamp::parse))
            .collect()),
        _ => Ok(extract_values(series)?
            .into_iter()
            .map(|opt| opt.and_then(Timestamp::from_unix_seconds))
            .collect()),
    }
}

fn from_epoch(value: i64, unit: TimeUnit) -> Option<Timestamp> {
    let dt = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    dt.map(|dt| Timestamp::new(dt.naive_utc()))
}
