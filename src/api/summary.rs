use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date_math::{format_long, format_thousands};
use crate::core::{DateWindow, Record, records_in_window};
use crate::render::ChartTitle;

/// Aggregate over the records inside the current window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: i64,
    pub visible_records: usize,
    pub total_revenue: f64,
}

impl WindowSummary {
    #[must_use]
    pub fn from_window(window: &DateWindow, records: &[Record]) -> Self {
        let visible = records_in_window(records, window);
        Self {
            start_date: window.start_date,
            end_date: window.end_date,
            day_count: window.day_count(),
            visible_records: visible.len(),
            total_revenue: visible.iter().map(|record| record.revenue).sum(),
        }
    }

    #[must_use]
    pub fn title(&self) -> ChartTitle {
        ChartTitle {
            range_line: format!(
                "Pipeline from {} to {} ({} days)",
                format_long(self.start_date),
                format_long(self.end_date),
                self.day_count
            ),
            revenue_line: format!(
                "Projected Revenue: ${}",
                format_thousands(self.total_revenue)
            ),
        }
    }
}
