use serde::Serialize;
use std::fmt;

use crate::constants::display::{NO_DATA_MESSAGE, STATS_DECIMALS};
use crate::data::stats::{calculate_stats_vec, round_to};
use crate::data::Row;

/// Summary panel payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryView {
    Stats {
        mean: f64,
        max: f64,
        min: f64,
        count: usize,
    },
    NoData,
}

impl SummaryView {
    pub fn is_no_data(&self) -> bool {
        matches!(self, SummaryView::NoData)
    }
}

impl fmt::Display for SummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryView::Stats { mean, max, min, .. } => {
                write!(f, "Mean: {:.2}, Max: {:.2}, Min: {:.2}", mean, max, min)
            }
            SummaryView::NoData => f.write_str(NO_DATA_MESSAGE),
        }
    }
}

/// Mean, max and min of the scoped subset, rounded for display
///
/// Falls back to `NoData` when the mean is not representable.
pub fn summary_stats(rows: &[&Row]) -> SummaryView {
    profiling::scope!("summary_stats");
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
    // The sum behind the mean can overflow for values near f64::MAX
    match calculate_stats_vec(&values).filter(|s| s.mean.is_finite()) {
        Some(stats) => SummaryView::Stats {
            mean: round_to(stats.mean, STATS_DECIMALS),
            max: round_to(stats.max, STATS_DECIMALS),
            min: round_to(stats.min, STATS_DECIMALS),
            count: stats.count,
        },
        None => SummaryView::NoData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Timestamp;

    fn rows(values: &[f64]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Row::new(Timestamp::from_unix_seconds(i as f64).unwrap(), "A", "North", v))
            .collect()
    }

    #[test]
    fn test_summary_of_rows() {
        let rows = rows(&[1.0, 2.0, 4.0]);
        let subset: Vec<&Row> = rows.iter().collect();
        let summary = summary_stats(&subset);

        assert_eq!(
            summary,
            SummaryView::Stats {
                mean: 2.33,
                max: 4.0,
                min: 1.0,
                count: 3
            }
        );
        assert_eq!(summary.to_string(), "Mean: 2.33, Max: 4.00, Min: 1.00");
    }

    #[test]
    fn test_summary_of_empty_subset() {
        let summary = summary_stats(&[]);
        assert!(summary.is_no_data());
        assert_eq!(summary.to_string(), NO_DATA_MESSAGE);

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["status"], "no_data");
    }

    #[test]
    fn test_summary_serializes_numbers() {
        let rows = rows(&[10.0, 20.0]);
        let subset: Vec<&Row> = rows.iter().collect();
        let json = serde_json::to_value(summary_stats(&subset)).unwrap();
        assert_eq!(json["status"], "stats");
        assert_eq!(json["mean"], 15.0);
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn test_summary_never_emits_non_finite_mean() {
        let rows = rows(&[f64::MAX, f64::MAX, f64::MAX]);
        let subset: Vec<&Row> = rows.iter().collect();
        let summary = summary_stats(&subset);

        if let SummaryView::Stats { mean, max, min, .. } = summary {
            assert!(mean.is_finite() && max.is_finite() && min.is_finite());
        }
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("null"));
    }
}
