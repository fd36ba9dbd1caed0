//! Filter control descriptors
//!
//! Option lists and slider geometry derived from the dataset, so a renderer
//! can draw the dropdowns, checklist and range slider.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data::Dataset;
use crate::state::ValueRange;

/// A labelled choice in a dropdown or checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlOption {
    pub label: String,
    pub value: String,
}

impl ControlOption {
    fn same(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
        }
    }
}

/// Labelled tick on the range slider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub at: f64,
    pub label: String,
}

/// Range slider geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub initial: ValueRange,
}

impl RangeSlider {
    /// Marks every `spacing` units between the integer parts of the bounds
    pub fn new(min: f64, max: f64, step: f64, spacing: i64) -> Self {
        let start = min.floor() as i64;
        let end = max.floor() as i64;
        let marks = (start..=end)
            .step_by(spacing.max(1) as usize)
            .map(|at| SliderMark {
                at: at as f64,
                label: at.to_string(),
            })
            .collect();

        Self {
            min,
            max,
            step,
            marks,
            initial: ValueRange::new(min, max),
        }
    }
}

/// All filter controls of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOptions {
    pub value_range: RangeSlider,
    pub category_dropdown: Vec<ControlOption>,
    pub region_dropdown: Vec<ControlOption>,
    pub category_toggle: Vec<ControlOption>,
}

impl ControlOptions {
    pub fn from_dataset(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let domain = dataset.value_domain();
        let categories: Vec<ControlOption> = dataset.categories().iter().map(|c| ControlOption::same(c)).collect();

        Self {
            value_range: RangeSlider::new(domain.min, domain.max, config.slider_step, config.slider_mark_spacing),
            category_toggle: categories.clone(),
            category_dropdown: categories,
            region_dropdown: dataset.regions().iter().map(|r| ControlOption::same(r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Row, Timestamp};

    #[test]
    fn test_slider_marks() {
        let slider = RangeSlider::new(3.5, 42.0, 5.0, 10);
        let at: Vec<f64> = slider.marks.iter().map(|m| m.at).collect();
        assert_eq!(at, vec![3.0, 13.0, 23.0, 33.0]);
        assert_eq!(slider.marks[1].label, "13");
        assert_eq!(slider.initial, ValueRange::new(3.5, 42.0));
    }

    #[test]
    fn test_options_follow_first_appearance() {
        let ts = |s: f64| Timestamp::from_unix_seconds(s).unwrap();
        let dataset = Dataset::from_rows(vec![
            Row::new(ts(0.0), "C", "West", 0.0),
            Row::new(ts(1.0), "A", "East", 20.0),
            Row::new(ts(2.0), "C", "East", 10.0),
        ])
        .unwrap();

        let controls = ControlOptions::from_dataset(&dataset, &DashboardConfig::default());
        let values: Vec<_> = controls.category_dropdown.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["C", "A"]);
        assert_eq!(controls.category_toggle, controls.category_dropdown);
        assert_eq!(controls.region_dropdown[0].label, "West");
        assert_eq!(controls.value_range.marks.len(), 3);
        assert_eq!(controls.value_range.step, 5.0);
    }
}
