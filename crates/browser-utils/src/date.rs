//! Date formatting from epoch milliseconds, and day differences.
//!
//! Timestamps are rendered in an explicit IANA timezone (`chrono-tz`) so the
//! output never depends on the host's local zone.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Output templates. Selectors 0-5 pick a fixed template; anything else
/// (or no selector at all) is [`DateFormat::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `MM{sep}DD` (selector 0)
    MonthDay,
    /// `hh{sep}mm` (selector 1)
    HourMinute,
    /// `YYYY{sep}MM{sep}DD` (selector 2)
    Date,
    /// `YYYY{sep}MM{sep}DD hh:mm` (selector 3)
    DateTimeMinutes,
    /// `MM{sep}DD hh:mm` (selector 4)
    MonthDayTime,
    /// `YYYY年MM月DD日` (selector 5, ignores `sep`)
    YearMonthDayCjk,
    /// `YYYY{sep}MM{sep}DD hh:mm:ss`
    #[default]
    Full,
}

impl DateFormat {
    /// Map a numeric selector to a template. Unknown selectors fall back to
    /// [`DateFormat::Full`].
    pub fn from_selector(selector: u8) -> Self {
        match selector {
            0 => DateFormat::MonthDay,
            1 => DateFormat::HourMinute,
            2 => DateFormat::Date,
            3 => DateFormat::DateTimeMinutes,
            4 => DateFormat::MonthDayTime,
            5 => DateFormat::YearMonthDayCjk,
            _ => DateFormat::Full,
        }
    }

    /// Like [`DateFormat::from_selector`], with a missing selector meaning
    /// [`DateFormat::Full`].
    pub fn from_optional(selector: Option<u8>) -> Self {
        selector.map(Self::from_selector).unwrap_or_default()
    }

    fn render<T: Datelike + Timelike>(self, dt: &T, sep: &str) -> String {
        let (y, mo, d) = (dt.year(), dt.month(), dt.day());
        let (h, mi, s) = (dt.hour(), dt.minute(), dt.second());
        match self {
            DateFormat::MonthDay => format!("{mo:02}{sep}{d:02}"),
            DateFormat::HourMinute => format!("{h:02}{sep}{mi:02}"),
            DateFormat::Date => format!("{y}{sep}{mo:02}{sep}{d:02}"),
            DateFormat::DateTimeMinutes => format!("{y}{sep}{mo:02}{sep}{d:02} {h:02}:{mi:02}"),
            DateFormat::MonthDayTime => format!("{mo:02}{sep}{d:02} {h:02}:{mi:02}"),
            DateFormat::YearMonthDayCjk => format!("{y}年{mo:02}月{d:02}日"),
            DateFormat::Full => {
                format!("{y}{sep}{mo:02}{sep}{d:02} {h:02}:{mi:02}:{s:02}")
            }
        }
    }
}

/// Format an epoch-millisecond timestamp given as text.
///
/// The timestamp is read like JavaScript's `parseInt`: leading whitespace,
/// an optional sign, then the longest run of digits (hex after `0x`).
/// Anything after that run is ignored, so `"1.5e3"` reads as `1`. If no
/// digits are found, or the value lies outside the representable date
/// range, `input` is returned unchanged.
///
/// # Examples
///
/// ```
/// use browser_utils::{format_date, DateFormat};
///
/// let tz = chrono_tz::UTC;
/// assert_eq!(format_date("0", DateFormat::Date, "-", &tz), "1970-01-01");
/// assert_eq!(format_date("0ms", DateFormat::Date, "-", &tz), "1970-01-01");
/// assert_eq!(format_date("yesterday", DateFormat::Date, "-", &tz), "yesterday");
/// ```
pub fn format_date(input: &str, format: DateFormat, sep: &str, tz: &Tz) -> String {
    let Some(millis) = parse_int_prefix(input) else {
        return input.to_string();
    };
    format_millis(millis, format, sep, tz).unwrap_or_else(|| input.to_string())
}

/// Format an epoch-millisecond timestamp. `None` if out of range.
pub fn format_millis(millis: i64, format: DateFormat, sep: &str, tz: &Tz) -> Option<String> {
    let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
    let local = utc.with_timezone(tz);
    Some(format.render(&local, sep))
}

/// Integer prefix of `s` in `parseInt` style. `None` when there are no
/// digits or the value does not fit in an `i64`.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Whole days between local midnight of `date` and `now`, in either
/// direction.
///
/// `date` is dash-separated `Y-M-D` (zero padding optional) and is read in
/// `now`'s timezone. The distance is absolute and truncated, so a date ten
/// and a half days away counts as 10 whether it is past or future.
/// Returns `None` if `date` does not name a real calendar day.
///
/// ```
/// use browser_utils::date_diff_days;
/// use chrono::TimeZone;
///
/// let now = chrono_tz::UTC.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
/// assert_eq!(date_diff_days("2024-03-01", now), Some(9));
/// assert_eq!(date_diff_days("2024-03-20", now), Some(9));
/// ```
pub fn date_diff_days(date: &str, now: DateTime<Tz>) -> Option<i64> {
    let day = parse_dashed_date(date)?;
    let midnight = now
        .timezone()
        .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    let distance = (now - midnight).num_milliseconds().abs();
    Some(distance / MILLIS_PER_DAY)
}

/// [`date_diff_days`] measured against the current clock in `tz`.
pub fn date_diff_now(date: &str, tz: &Tz) -> Option<i64> {
    date_diff_days(date, Utc::now().with_timezone(tz))
}

fn parse_dashed_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.trim().split('-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
