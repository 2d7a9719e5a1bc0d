//! Date parsing and rendering helpers.
//!
//! Patterns use the tokens `yyyy`, `MM`, `dd`, `HH`, `mm` and `ss`; every
//! other character is literal.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone,
    Timelike, Weekday,
};
use chrono_tz::Tz;

use crate::config::DateConfig;

/// Fallback layouts tried after RFC 3339 and the configured formats.
const COMMON_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Layouts that carry their own offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Translates a token pattern into a chrono format string.
pub(crate) fn to_strftime(pattern: &str) -> String {
    const TOKENS: [(&str, &str); 6] = [
        ("yyyy", "%Y"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'scan;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Renders `dt` with a token pattern. Each token is substituted once, at its
/// first occurrence.
pub(crate) fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String {
    let fields = [
        ("yyyy", dt.year(), 4),
        ("MM", dt.month() as i32, 2),
        ("dd", dt.day() as i32, 2),
        ("HH", dt.hour() as i32, 2),
        ("mm", dt.minute() as i32, 2),
        ("ss", dt.second() as i32, 2),
    ];

    let mut result: Cow<'_, str> = Cow::Borrowed(pattern);
    let mut buf = String::with_capacity(4);
    for (token, value, width) in fields {
        if result.contains(token) {
            buf.clear();
            let _ = write!(buf, "{value:0width$}");
            result = Cow::Owned(result.replacen(token, &buf, 1));
        }
    }
    result.into_owned()
}

/// Parses a date string.
///
/// Tries RFC 3339, then each configured pattern, then a set of common
/// layouts. Values without an offset are read in the configured default
/// zone; date-only values are taken at midnight.
pub(crate) fn parse_datetime(s: &str, config: &DateConfig) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    let configured = config.formats.iter().map(|f| Cow::Owned(to_strftime(f)));
    let common = COMMON_FORMATS.iter().map(|f| Cow::Borrowed(*f));

    for format in configured.chain(common) {
        let naive = NaiveDateTime::parse_from_str(s, &format).ok().or_else(|| {
            NaiveDate::parse_from_str(s, &format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });
        if let Some(naive) = naive {
            return localize(&naive, config.default_timezone);
        }
    }

    None
}

/// Places a wall-clock time in `tz`. Ambiguous times take the earlier
/// instant. Times skipped by a forward shift are read with the offset in
/// force before the shift, landing after the gap.
fn localize(naive: &NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt.fixed_offset());
    }
    let before = naive.checked_sub_signed(TimeDelta::days(1))?;
    let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
    let dt = offset.from_local_datetime(naive).single()?;
    Some(dt.with_timezone(&tz).fixed_offset())
}

/// Whole years from `birth` to `now`, counted on the calendar in `birth`'s
/// offset. The year only counts once its month and day have been reached.
pub(crate) fn calendar_age(birth: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> i32 {
    let now = now.with_timezone(birth.offset());
    let mut age = now.year() - birth.year();
    if (now.month(), now.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub(crate) const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `M/D/YYYY`, as shown in bound messages.
pub(crate) fn locale_date(dt: &DateTime<FixedOffset>) -> String {
    format!("{}/{}/{}", dt.month(), dt.day(), dt.year())
}
