mod frame;
mod null_renderer;
mod primitives;

pub use frame::{ChartTitle, DensityHandlePrimitive, MarkerPrimitive, RenderFrame, TooltipFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, MarkerStyle, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `RenderFrame`: canvas primitives for
/// the axis layer plus the element updates for markers, density handles, the
/// title block and the tooltip. Chart logic never touches the host surface.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
