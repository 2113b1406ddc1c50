use crate::core::{ChartLayout, DateWindow, Record};
use crate::error::ChartResult;
use crate::render::RenderFrame;

/// Read-only state handed to a custom plot hook.
#[derive(Debug, Clone, Copy)]
pub struct PlotContext<'a> {
    pub window: &'a DateWindow,
    pub pixels_per_day: f64,
    pub records: &'a [Record],
    pub layout: &'a ChartLayout,
}

/// Replaces the built-in bubble pass with custom drawing.
///
/// The hook runs once per render after the axis layer is built, and may push
/// any primitives into the frame. Marker pooling is skipped while a hook is
/// installed.
pub trait PlotHook {
    fn plot(&mut self, context: PlotContext<'_>, frame: &mut RenderFrame) -> ChartResult<()>;
}

impl<F> PlotHook for F
where
    F: FnMut(PlotContext<'_>, &mut RenderFrame) -> ChartResult<()>,
{
    fn plot(&mut self, context: PlotContext<'_>, frame: &mut RenderFrame) -> ChartResult<()> {
        self(context, frame)
    }
}
