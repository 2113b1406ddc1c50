//! Pooled marker handles and tooltip placement.

mod pool;
mod tooltip;

pub use pool::{DEFAULT_PARK_OFFSET_PX, ElementPool, MarkerHandle, MarkerId, MarkerState};
pub use tooltip::{
    TooltipContent, TooltipPlacement, TooltipSide, TooltipSize, place_tooltip, tooltip_content,
};
