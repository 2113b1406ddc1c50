use crate::core::date_math::{days_in_month_of, format_short};
use crate::core::{ChartLayout, DateWindow};
use crate::render::{
    Color, DensityHandlePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

/// Horizontal shift of month labels relative to their grid line.
const MONTH_LABEL_SHIFT_PX: f64 = -20.0;
/// Baseline distance of month labels below the plot bottom.
const MONTH_LABEL_BASELINE_PX: f64 = 22.0;
/// Baseline nudge of percentage labels below their grid line.
const PERCENT_LABEL_BASELINE_PX: f64 = 5.0;
/// Horizontal grid lines start this far left of the plot.
const GRID_OVERHANG_PX: f64 = 5.0;
/// Density handles are centred on their grid line.
const DENSITY_HANDLE_CENTRE_PX: f64 = 11.0;
/// Parked position for surplus density handles.
const HIDDEN_HANDLE_X_PX: f64 = -100.0;

pub(super) struct AxisFrameInput<'a> {
    pub layout: &'a ChartLayout,
    pub window: &'a DateWindow,
    pub pixels_per_day: f64,
    pub months_visible: u32,
    pub font_size_px: f64,
    /// Handle currently dragged, with its live plot-area x.
    pub dragged_handle: Option<(usize, f64)>,
}

/// Builds the axis layer and returns the plot-area x of each month line.
pub(super) fn build_axis_layer(input: &AxisFrameInput<'_>, frame: &mut RenderFrame) -> Vec<f64> {
    let layout = input.layout;
    let text_color = Color::rgb(0.0, 0.0, 0.0);
    let grid_color = Color::from_rgb8(0xde, 0xde, 0xde);

    let step = 100.0 / f64::from(layout.y_tick_count);
    for tick in 0..layout.y_tick_count {
        let percent = 100.0 - step * f64::from(tick);
        frame.texts.push(TextPrimitive::new(
            format!("{percent:.0}%"),
            0.0,
            layout.y_tick_spacing_px * f64::from(tick) + layout.plot_top() + PERCENT_LABEL_BASELINE_PX,
            input.font_size_px,
            text_color,
            TextHAlign::Left,
        ));
    }

    let month_lines = month_line_offsets(input);
    for (index, offset) in month_lines.iter().enumerate() {
        frame.texts.push(TextPrimitive::new(
            format_short(input.window.month_boundaries[index]),
            layout.plot_left() + offset + MONTH_LABEL_SHIFT_PX,
            layout.plot_bottom() + MONTH_LABEL_BASELINE_PX,
            input.font_size_px,
            text_color,
            TextHAlign::Left,
        ));
    }

    frame.lines.push(LinePrimitive::new(
        layout.plot_left(),
        layout.plot_top(),
        layout.plot_left(),
        layout.plot_bottom(),
        1.0,
        text_color,
    ));
    frame.lines.push(LinePrimitive::new(
        layout.plot_left(),
        layout.plot_bottom(),
        layout.plot_left() + layout.chart_width_px,
        layout.plot_bottom(),
        1.0,
        text_color,
    ));

    for tick in 0..layout.y_tick_count {
        frame.rects.push(RectPrimitive::new(
            layout.plot_left() - GRID_OVERHANG_PX,
            layout.plot_top() + layout.y_tick_spacing_px * f64::from(tick),
            layout.chart_width_px,
            1.0,
            grid_color,
        ));
    }

    for offset in &month_lines {
        frame.rects.push(RectPrimitive::new(
            layout.plot_left() + offset,
            layout.plot_top(),
            1.0,
            layout.chart_height_px + GRID_OVERHANG_PX,
            grid_color,
        ));
    }

    month_lines
}

/// Emits one primitive per known density handle. The handle list only grows;
/// handles beyond the visible month count are parked and hidden.
pub(super) fn build_density_handles(
    input: &AxisFrameInput<'_>,
    month_lines: &[f64],
    known_handles: usize,
    frame: &mut RenderFrame,
) -> Vec<Option<f64>> {
    let total = known_handles.max(month_lines.len());
    let mut positions = Vec::with_capacity(total);

    for index in 0..total {
        let line_x = month_lines
            .get(index)
            .map(|offset| offset - DENSITY_HANDLE_CENTRE_PX);
        let dragging = input
            .dragged_handle
            .is_some_and(|(handle, _)| handle == index);
        let x = match input.dragged_handle {
            Some((handle, x)) if handle == index => Some(x),
            _ => line_x,
        };

        frame.density_handles.push(DensityHandlePrimitive {
            index,
            x: x.unwrap_or(HIDDEN_HANDLE_X_PX),
            height: input.layout.chart_height_px,
            visible: x.is_some(),
            dragging,
        });
        positions.push(x);
    }

    positions
}

fn month_line_offsets(input: &AxisFrameInput<'_>) -> Vec<f64> {
    let mut offset = input.window.leading_offset();
    let mut lines = Vec::with_capacity(input.months_visible as usize);
    for boundary in input
        .window
        .month_boundaries
        .iter()
        .take(input.months_visible as usize)
    {
        lines.push(offset);
        offset += f64::from(days_in_month_of(*boundary)) * input.pixels_per_day;
    }
    lines
}
