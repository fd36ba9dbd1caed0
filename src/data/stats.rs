use polars::prelude::*;

/// Mean, max and min of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Calculate statistics from a Series using polars
///
/// Returns `None` for an empty series or one that has no numeric values.
pub fn calculate_stats(series: &Series) -> Option<Stats> {
    let count = series.len();
    if count == 0 {
        return None;
    }

    // Cast to f64 for numeric operations
    let series_f64 = series.cast(&DataType::Float64).ok()?;
    let chunked = series_f64.f64().ok()?;

    Some(Stats {
        mean: chunked.mean()?,
        min: chunked.min()?,
        max: chunked.max()?,
        count,
    })
}

/// Calculate statistics from a slice of values
pub fn calculate_stats_vec(values: &[f64]) -> Option<Stats> {
    if values.is_empty() {
        return None;
    }

    let series = Series::new("Value".into(), values);
    calculate_stats(&series)
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
