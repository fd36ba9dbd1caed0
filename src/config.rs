//! Dashboard configuration file

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::constants::{controls, display, export, logging, refresh};
use crate::error::{DashError, Result};

/// Settings read from a JSON file; every field is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,

    /// Periodic refresh interval in milliseconds
    pub refresh_interval_ms: u64,

    /// Range slider step
    pub slider_step: f64,

    /// Spacing between labelled slider marks
    pub slider_mark_spacing: i64,

    /// Categories that get a chart panel of their own
    pub category_panels: Vec<String>,

    /// File name offered for the CSV download
    pub export_file_name: String,

    /// Default tracing filter (RUST_LOG takes precedence)
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: display::DASHBOARD_TITLE.to_string(),
            refresh_interval_ms: refresh::DEFAULT_INTERVAL_MS,
            slider_step: controls::DEFAULT_SLIDER_STEP,
            slider_mark_spacing: controls::DEFAULT_MARK_SPACING,
            category_panels: controls::DEFAULT_CATEGORY_PANELS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            export_file_name: export::DEFAULT_FILE_NAME.to_string(),
            log_filter: logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read a config file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents)
            .map_err(|e| DashError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate();
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Fix any out-of-range values
    pub fn validate(&mut self) {
        if self.refresh_interval_ms < refresh::MIN_INTERVAL_MS {
            warn!(
                requested = self.refresh_interval_ms,
                "refresh interval too short, raising to minimum"
            );
            self.refresh_interval_ms = refresh::MIN_INTERVAL_MS;
        }

        if !(self.slider_step.is_finite() && self.slider_step > 0.0) {
            self.slider_step = controls::DEFAULT_SLIDER_STEP;
        }

        if self.slider_mark_spacing < 1 {
            self.slider_mark_spacing = controls::DEFAULT_MARK_SPACING;
        }

        let mut seen = Vec::with_capacity(self.category_panels.len());
        self.category_panels.retain(|c| {
            if c.is_empty() || seen.contains(c) {
                false
            } else {
                seen.push(c.clone());
                true
            }
        });

        if self.export_file_name.trim().is_empty() {
            self.export_file_name = export::DEFAULT_FILE_NAME.to_string();
        }
    }
}
