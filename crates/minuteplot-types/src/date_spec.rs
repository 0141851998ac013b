//! Compact date specifier parsing.
//!
//! A specifier is either a single date or a start date followed by `-` and an
//! abbreviated end date:
//!
//! | Specifier           | Range                                   |
//! |---------------------|-----------------------------------------|
//! | `20231027`          | 2023-10-27                              |
//! | `20231023-27`       | 2023-10-23 to 2023-10-27                |
//! | `20231228-0105`     | 2023-12-28 to 2024-01-05 (year rolled)  |
//! | `20231201-20240115` | 2023-12-01 to 2024-01-15                |

use chrono::{Datelike, NaiveDate};

use crate::{DateRange, DateSpecError};

/// Human-readable list of the accepted specifier layouts.
pub const DATE_SPEC_FORMATS: &str = "YYYYMMDD, YYYYMMDD-DD, YYYYMMDD-MMDD, or YYYYMMDD-YYYYMMDD";

/// Parses a date specifier into an inclusive [`DateRange`].
///
/// The end segment's length selects how it is read: two digits replace the
/// start's day, four digits replace month and day (rolling into the next year
/// when the result would precede the start), eight digits are a full date.
///
/// # Errors
///
/// Returns an error if either segment is not a valid calendar date, if the end
/// segment has an unsupported length, or if the resolved end precedes the
/// start.
///
/// # Example
///
/// ```
/// use minuteplot_types::parse_date_spec;
///
/// let range = parse_date_spec("20231228-0105").unwrap();
/// assert_eq!(range.end.to_string(), "2024-01-05");
/// assert_eq!(range.total_days(), 9);
/// ```
pub fn parse_date_spec(spec: &str) -> Result<DateRange, DateSpecError> {
    let spec = spec.trim();

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return Ok(DateRange::single_day(parse_full_date(spec)?));
    };

    let start = parse_full_date(start_str)?;
    let end = match end_str.len() {
        2 => {
            let day = parse_field(digits(end_str, "DD")?);
            start
                .with_day(day)
                .ok_or_else(|| invalid(end_str, "DD"))?
        }
        4 => {
            let end_digits = digits(end_str, "MMDD")?;
            let month = parse_field(&end_digits[..2]);
            let day = parse_field(&end_digits[2..]);
            let naive = NaiveDate::from_ymd_opt(start.year(), month, day)
                .ok_or_else(|| invalid(end_str, "MMDD"))?;
            if naive < start {
                NaiveDate::from_ymd_opt(start.year() + 1, month, day)
                    .ok_or_else(|| invalid(end_str, "MMDD"))?
            } else {
                naive
            }
        }
        8 => parse_full_date(end_str)?,
        len => return Err(DateSpecError::UnsupportedEndLength(len)),
    };

    Ok(DateRange::new(start, end)?)
}

/// Parses a strict 8-digit `YYYYMMDD` date.
fn parse_full_date(segment: &str) -> Result<NaiveDate, DateSpecError> {
    if segment.len() != 8 {
        return Err(invalid(segment, "YYYYMMDD"));
    }
    let ymd = digits(segment, "YYYYMMDD")?;

    let year = parse_field(&ymd[..4]) as i32;
    let month = parse_field(&ymd[4..6]);
    let day = parse_field(&ymd[6..]);

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(segment, "YYYYMMDD"))
}

/// Checks that a segment is non-empty and made only of ASCII digits.
fn digits<'a>(segment: &'a str, expected: &'static str) -> Result<&'a str, DateSpecError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(segment, expected));
    }
    Ok(segment)
}

/// Converts a short run of ASCII digits, already validated by [`digits`].
fn parse_field(field: &str) -> u32 {
    field
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

fn invalid(segment: &str, expected: &'static str) -> DateSpecError {
    DateSpecError::InvalidDate {
        segment: segment.to_string(),
        expected,
    }
}
