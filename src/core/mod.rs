pub mod date_math;
pub mod layout;
pub mod mapper;
pub mod primitives;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use layout::{ChartGutters, ChartLayout};
pub use mapper::{
    DateWindow, MarkerGeometry, compute_window, map_record_to_x, map_record_to_y,
    marker_diameter, marker_geometry,
};
pub use types::{Record, RecordId, Viewport, max_revenue, validate_records};
pub use viewport::{DensityChange, ViewportState};
pub use windowing::{records_in_window, visible_record_range};
