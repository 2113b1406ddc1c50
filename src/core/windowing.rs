use std::ops::Range;

use crate::core::{DateWindow, Record};

/// Index range of records whose close date falls inside the window.
///
/// Relies on the record set being sorted ascending by close date.
#[must_use]
pub fn visible_record_range(records: &[Record], window: &DateWindow) -> Range<usize> {
    let start = records.partition_point(|record| record.close_date < window.start_date);
    let end = records.partition_point(|record| record.close_date <= window.end_date);
    start..end.max(start)
}

/// Records whose close date falls inside the inclusive window.
#[must_use]
pub fn records_in_window<'a>(records: &'a [Record], window: &DateWindow) -> &'a [Record] {
    &records[visible_record_range(records, window)]
}
