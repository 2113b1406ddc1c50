mod axis_frame_builder;
mod engine;
mod engine_config;
mod gesture_controller;
mod plot_hook;
mod render_coordinator;
mod summary;
mod tooltip_controller;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use gesture_controller::GestureEffect;
pub use plot_hook::{PlotContext, PlotHook};
pub use render_coordinator::RedrawOutcome;
pub use summary::WindowSummary;
