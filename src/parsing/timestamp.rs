//! Timestamp resolution.
//!
//! Date tokens are ambiguous (`01/02/2024` is February 1st or January 2nd),
//! so resolution walks an ordered list of date strategies and keeps the first
//! one that yields a valid calendar date. A failure here is never fatal: the
//! message simply has no timestamp.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

/// 12-hour clock marker found in a time token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A fallible interpretation of the three numeric date fields.
type DateStrategy = fn(&DateFields) -> Option<NaiveDate>;

/// Strategies in the order they are tried.
const DATE_STRATEGIES: &[(&str, DateStrategy)] =
    &[("day-first", day_first), ("month-first", month_first)];

/// Numeric fields of a date token, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateFields {
    first: u32,
    second: u32,
    year: i32,
}

impl DateFields {
    fn parse(date_text: &str) -> Option<Self> {
        let mut parts = date_text.split(['/', '-', '.']);
        let first = parts.next()?.parse().ok()?;
        let second = parts.next()?.parse().ok()?;
        let year_text = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let year: i32 = year_text.parse().ok()?;
        let year = if year_text.len() <= 2 {
            expand_two_digit_year(year, *CURRENT_YEAR)
        } else {
            year
        };

        Some(Self {
            first,
            second,
            year,
        })
    }
}

static CURRENT_YEAR: LazyLock<i32> = LazyLock::new(|| Local::now().year());

/// Places a two-digit year within 50 years of `current_year`.
///
/// The current century is tried first; a result 50 or more years ahead
/// moves back a century, one more than 50 years behind moves forward.
fn expand_two_digit_year(year: i32, current_year: i32) -> i32 {
    let candidate = current_year - current_year.rem_euclid(100) + year;
    if candidate >= current_year + 50 {
        candidate - 100
    } else if candidate < current_year - 50 {
        candidate + 100
    } else {
        candidate
    }
}

fn day_first(fields: &DateFields) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(fields.year, fields.second, fields.first)
}

fn month_first(fields: &DateFields) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(fields.year, fields.first, fields.second)
}

/// Splits a trailing AM/PM marker off a time token.
///
/// ```rust
/// use chatstat::parsing::{split_meridiem, Meridiem};
///
/// assert_eq!(split_meridiem("9:02 PM"), ("9:02", Some(Meridiem::Pm)));
/// assert_eq!(split_meridiem("21:02"), ("21:02", None));
/// ```
pub fn split_meridiem(time_text: &str) -> (&str, Option<Meridiem>) {
    let upper = time_text.to_ascii_uppercase();
    let meridiem = if upper.contains("PM") {
        Some(Meridiem::Pm)
    } else if upper.contains("AM") {
        Some(Meridiem::Am)
    } else {
        None
    };

    let clock = time_text
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c.is_whitespace())
        .trim();
    (clock, meridiem)
}

fn parse_clock(clock: &str) -> Option<NaiveTime> {
    let mut parts = clock.split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    let second = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Coerces a resolved time into 24-hour form.
///
/// PM adds 12 to hours below 12; AM turns hour 12 into 0.
fn apply_meridiem(datetime: NaiveDateTime, meridiem: Option<Meridiem>) -> NaiveDateTime {
    let hour = datetime.hour();
    let adjusted = match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    };
    datetime.with_hour(adjusted).unwrap_or(datetime)
}

/// Resolves captured date and time tokens into a timestamp.
///
/// Returns `None` when no strategy produces a valid date or the clock is out
/// of range.
///
/// ```rust
/// use chatstat::parsing::resolve_timestamp;
///
/// let ts = resolve_timestamp("12/09/2025", "9:02 PM").unwrap();
/// assert_eq!(ts.to_string(), "2025-09-12 21:02:00");
///
/// // Day-first is impossible (month 13), so month-first wins.
/// let ts = resolve_timestamp("09/13/2025", "08:00").unwrap();
/// assert_eq!(ts.to_string(), "2025-09-13 08:00:00");
/// ```
pub fn resolve_timestamp(date_text: &str, time_text: &str) -> Option<NaiveDateTime> {
    let (clock, meridiem) = split_meridiem(time_text);

    let resolved = DateFields::parse(date_text).zip(parse_clock(clock)).and_then(
        |(fields, time)| {
            DATE_STRATEGIES
                .iter()
                .find_map(|(_, strategy)| strategy(&fields))
                .map(|date| date.and_time(time))
        },
    );

    if resolved.is_none() {
        debug!(date = date_text, time = time_text, "unresolvable timestamp");
    }

    resolved.map(|dt| apply_meridiem(dt, meridiem))
}
