//! infinite-timeline: headless engine for bubble charts on a scrolling timeline.
//!
//! The engine maps a continuous horizontal scroll offset and a pixels-per-day
//! density onto a calendar window, positions pooled marker handles for the
//! records inside that window, and emits backend-agnostic frames. Hosts own
//! the actual drawing surface and marker elements.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod markers;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
