//! # Time Normalization
//!
//! Time-valued leaves accept many spellings of an instant. [`parse_time`]
//! normalizes them all to `DateTime<Utc>`:
//!
//! | Input | Example |
//! |-------|---------|
//! | ISO 8601 | `2012-03-04T05:06:07.5Z` |
//! | Date and time | `1995-12-31 23:59:59`, `2012/03/04 05:06` |
//! | Month name | `1995-Dec-31 23:59:59`, `31-Dec-1995` |
//! | Day of year | `2012:124:21:08:12` |
//! | Compact | `20120304T050607` |
//! | Date only | `2012-03-04`, `2012/03/04` |
//! | Components | `(1998, 11, 14)`, `(2001, 1, 1, 12, 12, 12, 8899)` |
//! | chrono values | `NaiveDate`, `NaiveDateTime`, `DateTime<Tz>` |
//!
//! Times without an offset are taken as UTC.

use crate::attr::Attr;
use crate::error::{AttrError, Result};
use crate::kind::Time;
use crate::value::AttrValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%b-%d %H:%M:%S%.f",
    "%Y-%b-%d %H:%M:%S",
    "%d-%b-%Y %H:%M:%S%.f",
    "%d-%b-%Y %H:%M:%S",
    "%Y:%j:%H:%M:%S%.f",
    "%Y:%j:%H:%M:%S",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M%S",
    "%Y%m%d_%H%M%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%Y-%b-%d", "%d-%b-%Y"];

/// Anything [`parse_time`] can normalize.
pub trait IntoTime {
    fn into_time(self) -> Result<DateTime<Utc>>;
}

impl IntoTime for &str {
    fn into_time(self) -> Result<DateTime<Utc>> {
        parse_time_str(self)
    }
}

impl IntoTime for &String {
    fn into_time(self) -> Result<DateTime<Utc>> {
        parse_time_str(self)
    }
}

impl IntoTime for String {
    fn into_time(self) -> Result<DateTime<Utc>> {
        parse_time_str(&self)
    }
}

impl<Tz: TimeZone> IntoTime for DateTime<Tz> {
    fn into_time(self) -> Result<DateTime<Utc>> {
        Ok(self.with_timezone(&Utc))
    }
}

impl IntoTime for NaiveDateTime {
    fn into_time(self) -> Result<DateTime<Utc>> {
        Ok(self.and_utc())
    }
}

impl IntoTime for NaiveDate {
    fn into_time(self) -> Result<DateTime<Utc>> {
        Ok(self.and_time(NaiveTime::MIN).and_utc())
    }
}

impl IntoTime for (i32, u32, u32) {
    fn into_time(self) -> Result<DateTime<Utc>> {
        from_components(self.0, self.1, self.2, 0, 0, 0, 0)
    }
}

impl IntoTime for (i32, u32, u32, u32, u32, u32) {
    fn into_time(self) -> Result<DateTime<Utc>> {
        from_components(self.0, self.1, self.2, self.3, self.4, self.5, 0)
    }
}

/// The seventh component is microseconds.
impl IntoTime for (i32, u32, u32, u32, u32, u32, u32) {
    fn into_time(self) -> Result<DateTime<Utc>> {
        from_components(self.0, self.1, self.2, self.3, self.4, self.5, self.6)
    }
}

/// Normalizes `input` to a UTC instant.
///
/// # Examples
/// ```
/// use attrquery::time::parse_time;
///
/// let t = parse_time("1995-Dec-31 23:59:59").unwrap();
/// assert_eq!(t, parse_time((1995, 12, 31, 23, 59, 59)).unwrap());
/// assert_eq!(t, parse_time("1995-12-31T23:59:59Z").unwrap());
/// ```
pub fn parse_time(input: impl IntoTime) -> Result<DateTime<Utc>> {
    input.into_time()
}

fn parse_time_str(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(input) {
        return Ok(t.with_timezone(&Utc));
    }

    // A trailing `Z` means UTC, which is what offset-less times are taken as.
    let naive = input.strip_suffix('Z').unwrap_or(input);

    for format in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(t.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(naive, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc());
        }
    }

    Err(AttrError::TimeParse(input.to_string()))
}

fn from_components(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micro: u32,
) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_micro_opt(hour, minute, second, micro))
        .map(|t| t.and_utc())
        .ok_or_else(|| {
            AttrError::TimeParse(format!(
                "({}, {}, {}, {}, {}, {}, {})",
                year, month, day, hour, minute, second, micro
            ))
        })
}

impl Time {
    /// Leaf for the closed interval `[start, end]`.
    ///
    /// Fails with [`AttrError::InvalidRange`] if `start` is after `end`.
    pub fn range(start: impl IntoTime, end: impl IntoTime) -> Result<Attr> {
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        if start > end {
            return Err(AttrError::InvalidRange {
                start: AttrValue::Time(start).to_string(),
                end: AttrValue::Time(end).to_string(),
            });
        }
        Ok(Time::new(AttrValue::TimeRange { start, end }))
    }

    /// Leaf for a single instant.
    pub fn at(t: impl IntoTime) -> Result<Attr> {
        Ok(Time::new(parse_time(t)?))
    }
}
