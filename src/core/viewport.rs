use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date_math::{add_days, first_of_month};
use crate::core::primitives::{ensure_finite, ensure_positive};
use crate::error::{ChartError, ChartResult};

/// Nominal month length used to convert densities into month counts.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Lower bound on visible months after a density change.
pub const MIN_MONTHS_VISIBLE: u32 = 2;
/// Density adjustments below this month count fall back to `MIN_MONTHS_VISIBLE`.
pub const MONTHS_VISIBLE_CLAMP_THRESHOLD: u32 = 3;
/// Default floor applied to `pixels_per_day` by density adjustments.
pub const DEFAULT_MIN_PIXELS_PER_DAY: f64 = 6.0;

/// Scroll and density state of the timeline axis.
///
/// The effective scroll offset is `scroll_offset_px + pending_drag_offset_px`:
/// the committed offset plus whatever an in-flight pan gesture has moved.
///
/// Deserialization goes through the same checks as [`ViewportState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportStateRepr")]
pub struct ViewportState {
    origin_date: NaiveDate,
    pixels_per_day: f64,
    months_visible: u32,
    scroll_offset_px: f64,
    pending_drag_offset_px: f64,
    /// Gap before the first month line while the chart is at rest, set by `anchored`.
    rest_leading_offset_px: Option<f64>,
}

#[derive(Deserialize)]
struct ViewportStateRepr {
    origin_date: NaiveDate,
    pixels_per_day: f64,
    months_visible: u32,
    #[serde(default)]
    scroll_offset_px: f64,
    #[serde(default)]
    pending_drag_offset_px: f64,
    #[serde(default)]
    rest_leading_offset_px: Option<f64>,
}

impl TryFrom<ViewportStateRepr> for ViewportState {
    type Error = ChartError;

    fn try_from(repr: ViewportStateRepr) -> ChartResult<Self> {
        let mut state = Self::new(repr.origin_date, repr.pixels_per_day, repr.months_visible)?;
        state.scroll_offset_px = ensure_finite(repr.scroll_offset_px, "scroll offset")?;
        state.pending_drag_offset_px = ensure_finite(repr.pending_drag_offset_px, "drag offset")?;
        state.rest_leading_offset_px = repr
            .rest_leading_offset_px
            .map(|offset| ensure_finite(offset, "rest leading offset"))
            .transpose()?;
        Ok(state)
    }
}

/// Result of committing a density gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityChange {
    pub previous_pixels_per_day: f64,
    pub pixels_per_day: f64,
    pub previous_months_visible: u32,
    pub months_visible: u32,
    /// `true` when the month count fell under the threshold and was pinned to two.
    pub clamped_to_min_months: bool,
}

impl ViewportState {
    pub fn new(
        origin_date: NaiveDate,
        pixels_per_day: f64,
        months_visible: u32,
    ) -> ChartResult<Self> {
        ensure_positive(pixels_per_day, "pixels per day")?;
        if months_visible < MIN_MONTHS_VISIBLE {
            return Err(ChartError::InvalidData(format!(
                "months visible must be >= {MIN_MONTHS_VISIBLE}"
            )));
        }
        Ok(Self {
            origin_date,
            pixels_per_day,
            months_visible,
            scroll_offset_px: 0.0,
            pending_drag_offset_px: 0.0,
            rest_leading_offset_px: None,
        })
    }

    /// Builds the initial state for a chart whose first record closes on `first_date`.
    ///
    /// The density spreads `months_visible` nominal months over the chart width
    /// minus the leading offset. The leading offset is raised to one day's width
    /// when narrower, and the origin is moved back by the whole days it covers so
    /// the first month starts right after it. At rest the first month line is
    /// drawn at that leading offset. Returns the state together with the
    /// effective leading offset.
    pub fn anchored(
        first_date: NaiveDate,
        chart_width_px: f64,
        leading_offset_px: f64,
        months_visible: u32,
    ) -> ChartResult<(Self, f64)> {
        ensure_positive(chart_width_px, "chart width")?;
        ensure_finite(leading_offset_px, "leading offset")?;
        if leading_offset_px < 0.0 || leading_offset_px >= chart_width_px {
            return Err(ChartError::InvalidData(
                "leading offset must be >= 0 and narrower than the chart".to_owned(),
            ));
        }

        let pixels_per_day =
            (chart_width_px - leading_offset_px) / (f64::from(months_visible) * DAYS_PER_MONTH);
        let leading_offset_px = leading_offset_px.max(pixels_per_day);
        let lead_days = (leading_offset_px / pixels_per_day).floor() as i64;
        let origin_date = add_days(first_of_month(first_date), -lead_days);

        let mut state = Self::new(origin_date, pixels_per_day, months_visible)?;
        state.rest_leading_offset_px = Some(leading_offset_px);
        Ok((state, leading_offset_px))
    }

    #[must_use]
    pub fn origin_date(&self) -> NaiveDate {
        self.origin_date
    }

    #[must_use]
    pub fn pixels_per_day(&self) -> f64 {
        self.pixels_per_day
    }

    #[must_use]
    pub fn months_visible(&self) -> u32 {
        self.months_visible
    }

    #[must_use]
    pub fn scroll_offset_px(&self) -> f64 {
        self.scroll_offset_px
    }

    #[must_use]
    pub fn pending_drag_offset_px(&self) -> f64 {
        self.pending_drag_offset_px
    }

    #[must_use]
    pub fn rest_leading_offset_px(&self) -> Option<f64> {
        self.rest_leading_offset_px
    }

    #[must_use]
    pub fn effective_offset_px(&self) -> f64 {
        self.scroll_offset_px + self.pending_drag_offset_px
    }

    pub fn set_pending_drag_offset(&mut self, offset_px: f64) -> ChartResult<()> {
        self.pending_drag_offset_px = ensure_finite(offset_px, "drag offset")?;
        Ok(())
    }

    /// Folds the in-flight drag offset into the committed offset.
    pub fn commit_pending_drag(&mut self) {
        self.scroll_offset_px += self.pending_drag_offset_px;
        self.pending_drag_offset_px = 0.0;
    }

    /// Drops the in-flight drag offset without committing it.
    pub fn discard_pending_drag(&mut self) {
        self.pending_drag_offset_px = 0.0;
    }

    /// Commits a density-handle drag of `delta_px = start_x - final_x`.
    ///
    /// Dragging a handle left yields a positive delta and lowers the density,
    /// packing more months into the chart. The density is floored at
    /// `min_pixels_per_day`; when fewer than three months would fit, the state is
    /// pinned to two months filling `chart_width_px - leading_offset_px`.
    pub fn apply_density_delta(
        &mut self,
        delta_px: f64,
        chart_width_px: f64,
        leading_offset_px: f64,
        min_pixels_per_day: f64,
    ) -> ChartResult<DensityChange> {
        ensure_finite(delta_px, "density delta")?;
        ensure_positive(chart_width_px, "chart width")?;
        ensure_finite(leading_offset_px, "leading offset")?;
        ensure_positive(min_pixels_per_day, "minimum pixels per day")?;

        let previous_pixels_per_day = self.pixels_per_day;
        let previous_months_visible = self.months_visible;

        let mut pixels_per_day =
            ((self.pixels_per_day * DAYS_PER_MONTH - delta_px) / DAYS_PER_MONTH)
                .max(min_pixels_per_day);
        let mut months_visible = (chart_width_px / (pixels_per_day * DAYS_PER_MONTH)).floor();
        let clamped_to_min_months = months_visible < f64::from(MONTHS_VISIBLE_CLAMP_THRESHOLD);
        if clamped_to_min_months {
            months_visible = f64::from(MIN_MONTHS_VISIBLE);
            pixels_per_day = ((chart_width_px - leading_offset_px)
                / (f64::from(MIN_MONTHS_VISIBLE) * DAYS_PER_MONTH))
                .max(min_pixels_per_day);
        }

        self.pixels_per_day = pixels_per_day;
        self.months_visible = months_visible as u32;

        Ok(DensityChange {
            previous_pixels_per_day,
            pixels_per_day,
            previous_months_visible,
            months_visible: self.months_visible,
            clamped_to_min_months,
        })
    }
}
