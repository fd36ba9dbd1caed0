//! Point selection and the annotation store

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::constants::display::NO_SELECTION_MESSAGE;
use crate::data::Timestamp;

/// A text label pinned to a point of the annotated chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: Timestamp,
    pub y: f64,
    pub text: String,
}

/// Point picked by the latest click on the annotated chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub x: Timestamp,
    pub y: f64,
}

impl fmt::Display for SelectedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selected Point - X: {}, Y: {}", self.x, self.y)
    }
}

/// Human-readable selection line shown above the annotated chart
pub fn describe_selection(selection: Option<&SelectedPoint>) -> String {
    match selection {
        Some(point) => point.to_string(),
        None => NO_SELECTION_MESSAGE.to_string(),
    }
}

/// Ordered, append-only list of annotations with a full clear
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationStore {
    entries: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation at the selected point
    ///
    /// Ignored when nothing is selected or the text is empty. Returns whether
    /// the store changed.
    pub fn add(&mut self, selection: Option<&SelectedPoint>, text: &str) -> bool {
        let Some(point) = selection else {
            debug!("annotation ignored: no point selected");
            return false;
        };
        if text.is_empty() {
            debug!("annotation ignored: empty text");
            return false;
        }

        self.entries.push(Annotation {
            x: point.x,
            y: point.y,
            text: text.to_string(),
        });
        debug!(x = %point.x, y = point.y, count = self.entries.len(), "annotation added");
        true
    }

    /// Remove every annotation
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!(removed = self.entries.len(), "annotations cleared");
        }
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Annotation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.entries.iter()
    }
}
