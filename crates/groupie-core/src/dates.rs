//! Best-effort parsing of the free-form date strings found in the feeds.
//!
//! Feed dates are display strings first. Parsing only exists so that sorts can
//! order what they can; anything unparseable keeps its raw text and sorts
//! after every parsed date.

use chrono::{DateTime, NaiveDate, Utc};

/// Date-only layouts tried after ISO and RFC 3339, each with the exact shape
/// the input must have before chrono sees it. chrono alone is lenient about
/// padding, signs and leading whitespace.
const DAY_LAYOUTS: &[(&str, fn(&str) -> bool)] = &[
    ("%d/%m/%Y", day_month_year),
    ("%d %b %Y", day_mon_year),
    ("%B %d, %Y", month_day_year),
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Try each known layout in order and return the first that parses.
///
/// Order: `YYYY-MM-DD`, RFC 3339, `DD/MM/YYYY`, `DD Mon YYYY`,
/// `Month D, YYYY`. Date-only layouts resolve to midnight UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if shaped(s, "0000-00-00") {
        if let Some(dt) = parse_day(s, "%Y-%m-%d") {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    DAY_LAYOUTS
        .iter()
        .filter(|(_, fits)| fits(s))
        .find_map(|(layout, _)| parse_day(s, layout))
}

/// Byte-for-byte shape check: `0` is an ASCII digit, `a` an ASCII letter,
/// anything else must match literally.
fn shaped(s: &str, pattern: &str) -> bool {
    s.len() == pattern.len()
        && s.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'0' => c.is_ascii_digit(),
            b'a' => c.is_ascii_alphabetic(),
            _ => c == p,
        })
}

fn day_month_year(s: &str) -> bool {
    shaped(s, "00/00/0000")
}

fn day_mon_year(s: &str) -> bool {
    shaped(s, "00 aaa 0000")
}

/// `Month D, YYYY`: full month name, one or two day digits, four-digit year.
fn month_day_year(s: &str) -> bool {
    let mut parts = s.split(' ');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Some(day) = day.strip_suffix(',') else {
        return false;
    };
    MONTHS.iter().any(|m| m.eq_ignore_ascii_case(month))
        && (1..=2).contains(&day.len())
        && day.bytes().all(|c| c.is_ascii_digit())
        && shaped(year, "0000")
}

fn parse_day(s: &str, layout: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(s, layout)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Sort key for a date string.
///
/// Parsed dates order before raw ones; parsed dates compare by instant and raw
/// strings compare lexicographically. Variant order carries the first rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateKey {
    Parsed(DateTime<Utc>),
    Raw(String),
}

impl DateKey {
    pub fn new(s: &str) -> Self {
        match parse_date(s) {
            Some(dt) => DateKey::Parsed(dt),
            None => DateKey::Raw(s.to_string()),
        }
    }
}
