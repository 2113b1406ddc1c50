use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// Host container size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Index of a record inside the engine record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// One pipeline opportunity plotted as a bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub project: String,
    pub account: String,
    pub revenue: f64,
    pub close_date: NaiveDate,
    /// Win probability in percent, `0..=100`.
    pub probability: f64,
}

impl Record {
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        account: impl Into<String>,
        revenue: f64,
        close_date: NaiveDate,
        probability: f64,
    ) -> Self {
        Self {
            project: project.into(),
            account: account.into(),
            revenue,
            close_date,
            probability,
        }
    }

    pub fn from_decimal_revenue(
        project: impl Into<String>,
        account: impl Into<String>,
        revenue: Decimal,
        close_date: NaiveDate,
        probability: f64,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            project,
            account,
            decimal_to_f64(revenue, "revenue")?,
            close_date,
            probability,
        ))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.revenue.is_finite() || self.revenue < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "record `{}` revenue must be finite and >= 0",
                self.project
            )));
        }
        if !self.probability.is_finite() || !(0.0..=100.0).contains(&self.probability) {
            return Err(ChartError::InvalidData(format!(
                "record `{}` probability must be finite and in [0, 100]",
                self.project
            )));
        }
        Ok(())
    }
}

/// Largest revenue in the set, `0.0` for an empty slice.
#[must_use]
pub fn max_revenue(records: &[Record]) -> f64 {
    records
        .iter()
        .map(|record| record.revenue)
        .fold(0.0, f64::max)
}

/// Checks the record-set preconditions and returns the maximum revenue.
///
/// The set must be non-empty, ascending by `close_date`, contain only valid
/// records, and carry at least one positive revenue so marker sizes are defined.
pub fn validate_records(records: &[Record]) -> ChartResult<f64> {
    if records.is_empty() {
        return Err(ChartError::InvalidData(
            "record set must not be empty".to_owned(),
        ));
    }

    for record in records {
        record.validate()?;
    }

    if let Some(index) = records
        .windows(2)
        .position(|pair| pair[1].close_date < pair[0].close_date)
    {
        return Err(ChartError::InvalidData(format!(
            "records must be sorted ascending by close date (index {} precedes index {})",
            index + 1,
            index
        )));
    }

    let max = max_revenue(records);
    if max <= 0.0 {
        return Err(ChartError::InvalidData(
            "at least one record must have revenue > 0".to_owned(),
        ));
    }
    Ok(max)
}
