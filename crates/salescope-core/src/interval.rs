//! Month-of-year to half-open UTC interval resolution.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// Month abbreviations accepted by [`parse_month`], in calendar order.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("invalid month \"{0}\": expected a three-letter abbreviation such as \"Mar\"")]
    InvalidMonth(String),
    #[error("invalid year \"{0}\"")]
    InvalidYear(String),
}

/// One calendar month as `[start, end)`, both at UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthInterval {
    /// Interval covering `month` (1-based) of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::InvalidMonth`] if `month` is outside `1..=12`,
    /// or [`IntervalError::InvalidYear`] if either boundary falls outside the
    /// range chrono can represent.
    pub fn for_month(month: u32, year: i32) -> Result<Self, IntervalError> {
        if !(1..=12).contains(&month) {
            return Err(IntervalError::InvalidMonth(month.to_string()));
        }
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1), 1)
        } else {
            (Some(year), month + 1)
        };

        let start = first_of_month(year, month)
            .ok_or_else(|| IntervalError::InvalidYear(year.to_string()))?;
        let end = next_year
            .and_then(|y| first_of_month(y, next_month))
            .ok_or_else(|| IntervalError::InvalidYear(year.to_string()))?;

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `ts` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

fn first_of_month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a month abbreviation into its 1-based number.
///
/// Surrounding whitespace is ignored; the match itself is case-sensitive.
///
/// # Errors
///
/// Returns [`IntervalError::InvalidMonth`] for anything that is not one of
/// [`MONTH_ABBREVIATIONS`].
pub fn parse_month(name: &str) -> Result<u32, IntervalError> {
    let trimmed = name.trim();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == trimmed)
        .and_then(|idx| u32::try_from(idx + 1).ok())
        .ok_or_else(|| IntervalError::InvalidMonth(name.to_string()))
}

/// Parse a year given as text.
///
/// # Errors
///
/// Returns [`IntervalError::InvalidYear`] if the trimmed input is not an integer.
pub fn parse_year(raw: &str) -> Result<i32, IntervalError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| IntervalError::InvalidYear(raw.to_string()))
}

/// Resolve a `(month name, year)` pair into its UTC month interval.
///
/// # Errors
///
/// Returns [`IntervalError`] if either component fails to parse.
pub fn resolve_month(month: &str, year: &str) -> Result<MonthInterval, IntervalError> {
    let month = parse_month(month)?;
    let year = parse_year(year)?;
    MonthInterval::for_month(month, year)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Months, TimeZone, Timelike};

    use super::*;

    #[test]
    fn resolves_march_2022() {
        let interval = resolve_month("Mar", "2022").expect("valid input");
        assert_eq!(
            interval.start(),
            Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            interval.end(),
            Utc.with_ymd_and_hms(2022, 4, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn december_rolls_into_next_year() {
        let interval = resolve_month("Dec", "2021").expect("valid input");
        assert_eq!(
            interval.end(),
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn every_month_spans_exactly_one_calendar_month() {
        for year in [1999, 2020, 2021, 2024] {
            for name in MONTH_ABBREVIATIONS {
                let interval = resolve_month(name, &year.to_string()).expect("valid input");
                assert_eq!(interval.start().day(), 1);
                assert_eq!(interval.start().hour(), 0);
                assert_eq!(interval.end().hour(), 0);
                assert_eq!(
                    interval.start().checked_add_months(Months::new(1)),
                    Some(interval.end()),
                    "{name} {year}"
                );
            }
        }
    }

    #[test]
    fn month_whitespace_is_trimmed() {
        assert_eq!(parse_month("  Feb ").unwrap(), 2);
    }

    #[test]
    fn month_match_is_case_sensitive() {
        assert!(matches!(
            parse_month("mar"),
            Err(IntervalError::InvalidMonth(_))
        ));
        assert!(matches!(
            parse_month("March"),
            Err(IntervalError::InvalidMonth(_))
        ));
        assert!(matches!(
            parse_month("Xyz"),
            Err(IntervalError::InvalidMonth(_))
        ));
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        assert_eq!(
            resolve_month("Mar", "twenty"),
            Err(IntervalError::InvalidYear("twenty".to_string()))
        );
        assert!(matches!(
            resolve_month("Mar", ""),
            Err(IntervalError::InvalidYear(_))
        ));
    }

    #[test]
    fn year_outside_chrono_range_is_rejected() {
        assert!(matches!(
            resolve_month("Jan", "999999999"),
            Err(IntervalError::InvalidYear(_))
        ));
    }

    #[test]
    fn contains_is_half_open() {
        let interval = MonthInterval::for_month(3, 2022).unwrap();
        assert!(interval.contains(interval.start()));
        assert!(!interval.contains(interval.end()));
        assert!(interval.contains(Utc.with_ymd_and_hms(2022, 3, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn for_month_rejects_out_of_range_month() {
        assert!(matches!(
            MonthInterval::for_month(13, 2022),
            Err(IntervalError::InvalidMonth(_))
        ));
    }
}
