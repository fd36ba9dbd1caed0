//! Reactive recomputation engine for an interactive data-exploration
//! dashboard.
//!
//! A [`Dashboard`] owns the loaded [`Dataset`], the filter controls and the
//! annotation store. Each update cycle takes a batch of [`InputEvent`]s,
//! decides which views are stale, and recomputes only those from the
//! filtered rows.

pub mod app;
pub mod config;
pub mod constants;
pub mod controls;
pub mod data;
pub mod error;
pub mod filter;
pub mod logging;
pub mod refresh;
pub mod router;
pub mod state;
pub mod views;

pub use app::{CycleOutput, Dashboard};
pub use config::DashboardConfig;
pub use data::{Dataset, Row, Timestamp};
pub use error::{DashError, Result};
pub use router::{InputEvent, ViewId};
pub use state::{Annotation, AnnotationStore, FilterState, SelectedPoint};
