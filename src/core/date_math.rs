//! Calendar helpers shared by the mapper, axis labels and title text.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Number of days in `month` (1-based) of `year`, in `28..=31`.
///
/// Months outside `1..=12` are clamped into range.
#[must_use]
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month.clamp(1, 12) {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[must_use]
pub fn days_in_month_of(date: NaiveDate) -> u32 {
    days_in_month(date.month(), date.year())
}

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shifts `date` by whole months, clamping the day to the target month's end.
///
/// Saturates at the representable calendar bounds.
#[must_use]
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(if months >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Shifts `date` by whole days. Saturates at the representable calendar bounds.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Axis label: `M/YY`.
#[must_use]
pub fn format_short(date: NaiveDate) -> String {
    format!("{}/{:02}", date.month(), date.year().rem_euclid(100))
}

/// Title date: `MM/DD/YYYY`.
#[must_use]
pub fn format_long(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.month(), date.day(), date.year())
}

/// Tooltip date: `M/D/YY`.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// Formats a number with `,` thousands separators on its integer part.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    let raw = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    };

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn days_in_month_handles_leap_february() {
        assert_eq!(days_in_month(2, 2012), 29);
        assert_eq!(days_in_month(2, 2011), 28);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
        assert_eq!(days_in_month(4, 2012), 30);
        assert_eq!(days_in_month(12, 2012), 31);
    }

    #[test]
    fn add_months_crosses_year_boundaries() {
        assert_eq!(add_months(date(2011, 12, 1), 1), date(2012, 1, 1));
        assert_eq!(add_months(date(2012, 1, 1), -1), date(2011, 12, 1));
        assert_eq!(add_months(date(2012, 1, 31), 1), date(2012, 2, 29));
    }

    #[test]
    fn add_days_moves_backwards() {
        assert_eq!(add_days(date(2012, 1, 1), -2), date(2011, 12, 30));
    }

    #[test]
    fn formatters_match_label_layouts() {
        let d = date(2012, 3, 7);
        assert_eq!(format_short(d), "3/12");
        assert_eq!(format_long(d), "03/07/2012");
        assert_eq!(format_tooltip_date(d), "3/7/12");
        assert_eq!(format_short(date(2005, 11, 1)), "11/05");
    }

    #[test]
    fn thousands_separator_groups_integer_part() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1_000.0), "1,000");
        assert_eq!(format_thousands(4_638_000.0), "4,638,000");
        assert_eq!(format_thousands(-12_345.0), "-12,345");
        assert_eq!(format_thousands(1_234.5), "1,234.5");
    }
}
