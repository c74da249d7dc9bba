use serde_json::Value;
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Simple "YYYY-MM" utility with ordering, used for the `month` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8, // 1..=12
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Self {
        assert!((1..=12).contains(&month), "Month must be 1..=12");
        Self { year, month }
    }

    pub fn from_date(d: Date) -> Self {
        Self {
            year: d.year().clamp(0, u16::MAX as i32) as u16,
            month: d.month() as u8,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// Legacy export format: "Wed Oct 10 20:19:24 +0000 2018"
const LEGACY_FMT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] \
     [offset_hour sign:mandatory][offset_minute] [year]"
);
const DATETIME_FMT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_FMT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a raw `created_at`-like value into a UTC instant.
///
/// Accepts RFC 3339, the legacy `Wed Oct 10 20:19:24 +0000 2018` form,
/// `YYYY-MM-DD[ HH:MM:SS]` (assumed UTC), and unix epoch seconds or
/// milliseconds. Anything else is the null-timestamp marker (`None`); a bad
/// value never fails the batch.
pub fn parse_timestamp(v: &Value) -> Option<OffsetDateTime> {
    match v {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                from_epoch(i)
            } else {
                n.as_f64().and_then(|f| from_epoch(f as i64))
            }
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<OffsetDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt.to_offset(UtcOffset::UTC));
    }
    if let Ok(dt) = OffsetDateTime::parse(s, LEGACY_FMT) {
        return Some(dt.to_offset(UtcOffset::UTC));
    }
    if let Ok(dt) = PrimitiveDateTime::parse(s, DATETIME_FMT) {
        return Some(dt.assume_utc());
    }
    if let Ok(d) = Date::parse(s, DATE_FMT) {
        return Some(d.midnight().assume_utc());
    }
    // Stringified epoch, seen in re-exported archives.
    s.parse::<i64>().ok().and_then(from_epoch)
}

fn from_epoch(raw: i64) -> Option<OffsetDateTime> {
    // Heuristic: values past ~5138 CE in seconds are millisecond epochs.
    let secs = if raw.unsigned_abs() >= 100_000_000_000 { raw / 1000 } else { raw };
    OffsetDateTime::from_unix_timestamp(secs).ok()
}

/// Full English day name ("Monday").
pub fn weekday_name(dt: OffsetDateTime) -> String {
    dt.weekday().to_string()
}

/// Account tier for a timestamp against the two inclusive cutover dates.
/// The middle tier is inclusive at both cutover instants; a null timestamp
/// falls through both comparisons and lands in the last tier.
pub fn tier_label(
    ts: Option<OffsetDateTime>,
    upgraded_start: Date,
    post_upgrade_start: Date,
) -> &'static str {
    let lo = upgraded_start.midnight().assume_utc();
    let hi = post_upgrade_start.midnight().assume_utc();
    match ts {
        Some(t) if t < lo => "pre_upgrade",
        Some(t) if t <= hi => "upgraded",
        _ => "post_upgrade",
    }
}
