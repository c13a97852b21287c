//! Value coercion.
//!
//! Total converters from raw [`CellValue`]s to emptiness, integers, floats and
//! calendar dates. Nothing here fails loudly: every conversion reports
//! failure as `None`, and the rules turn that into a cell message.

use avc_core::CellValue;
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Output format for dates accepted by [`parse_date`].
pub const DATE_FORMAT: &str = "%d-%m-%Y";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap());

static WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s*").unwrap()
});

static TIME_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<date>.+?)(?:[T ](?P<clock>\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)(?:\s?(?P<meridiem>(?i:[ap]\.?m\.?)))?(?:\s?(?:Z|UTC|GMT|[+-]\d{2}(?::?\d{2})?))?)?$",
    )
    .unwrap()
});

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<a>\d{1,4})(?P<s1>[-/. ])(?P<b>\d{1,2})(?P<s2>[-/. ])(?P<c>\d{1,4})$").unwrap()
});

static COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<y>\d{4})(?P<m>\d{2})(?P<d>\d{2})$").unwrap());

// The year is always set off by a separator, so a bare "2024" is never
// split into a day and a two-digit year.
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<d>\d{1,2})[-/. ]?(?P<mon>[A-Za-z]+)\.?(?:,\s*|[-/. ]+)(?P<y>\d{4}|\d{2})$")
        .unwrap()
});

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<mon>[A-Za-z]+)\.?[-/. ]?(?P<d>\d{1,2})(?:,\s*|[-/. ]+)(?P<y>\d{4}|\d{2})$")
        .unwrap()
});

static YEAR_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<y>\d{4})[-/. ](?P<mon>[A-Za-z]+)\.?[-/. ](?P<d>\d{1,2})$").unwrap()
});

/// Accepted times of day; `%.f` also matches an absent fraction.
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M", "%I:%M:%S%.f %p", "%I:%M %p"];

/// Returns true if the value counts as empty.
///
/// Empty means a null cell or text that is blank after trimming. The literal
/// `"0"` and any casing of `"N/A"` are deliberate values and are not empty.
pub fn is_empty(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => true,
        CellValue::Text(s) => s.trim().is_empty(),
    }
}

/// Parses a whole number.
///
/// A single trailing `".0"` is tolerated (spreadsheets often render integers
/// that way); any other fractional representation is rejected. Values outside
/// the `i64` range (more than 19 digits) fail like any other non-integer.
pub fn to_integer(value: &CellValue) -> Option<i64> {
    let s = non_empty_text(value)?;
    let s = s.strip_suffix(".0").unwrap_or(s);
    if s.contains('.') {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Parses a decimal number.
pub fn to_float(value: &CellValue) -> Option<f64> {
    non_empty_text(value)?.parse::<f64>().ok()
}

/// Parses a float and truncates it toward zero.
///
/// Non-finite values have no integer code and fail.
pub fn to_truncated_integer(value: &CellValue) -> Option<i64> {
    to_float(value)
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

/// Parses a human-written calendar date, day first, and formats it as
/// `dd-mm-YYYY`.
///
/// Accepted shapes include ISO dates, day-first numeric dates with `-`, `/`,
/// `.` or space separators, compact `YYYYMMDD`, and month names
/// (`15 March 2024`, `Mar 15, 2024`). Any of them may carry a time of day,
/// 24-hour or with `AM`/`PM`, and a trailing `Z` or `+HH:MM` offset; the
/// offset does not shift the date.
///
/// Impossible dates such as `31-02-2024`, numeric dates that only make sense
/// month first, and month-year values without a day (`March 2024`) are
/// rejected.
pub fn parse_date(value: &CellValue) -> Option<String> {
    let s = non_empty_text(value)?;
    let s = WHITESPACE.replace_all(s, " ");
    let s = ORDINAL.replace_all(&s, "$1");
    let s = WEEKDAY.replace(&s, "");

    let caps = TIME_SUFFIX.captures(s.trim())?;
    if let Some(clock) = caps.name("clock") {
        parse_time(clock.as_str(), caps.name("meridiem").map(|m| m.as_str()))?;
    }

    let date = parse_date_part(caps.name("date")?.as_str().trim())?;
    Some(date.format(DATE_FORMAT).to_string())
}

fn parse_time(clock: &str, meridiem: Option<&str>) -> Option<NaiveTime> {
    let text = match meridiem {
        Some(m) => format!("{} {}", clock, m.replace('.', "").to_uppercase()),
        None => clock.to_string(),
    };
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&text, format).ok())
}

fn parse_date_part(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = COMPACT.captures(s) {
        return ymd(&caps["y"], &caps["m"], &caps["d"]);
    }

    if let Some(caps) = NUMERIC.captures(s) {
        if caps["s1"] != caps["s2"] {
            return None;
        }
        let (a, b, c) = (&caps["a"], &caps["b"], &caps["c"]);
        return match (a.len(), c.len()) {
            // Year first: YYYY-MM-DD
            (4, 1..=2) => ymd(a, b, c),
            // Day first: DD-MM-YYYY / DD-MM-YY
            (1..=2, 4) | (1..=2, 2) => ymd(c, b, a),
            _ => None,
        };
    }

    [&YEAR_MONTH_DAY, &DAY_MONTH_YEAR, &MONTH_DAY_YEAR]
        .into_iter()
        .find_map(|pattern| pattern.captures(s))
        .and_then(|caps| named_date(&caps["y"], &caps["mon"], &caps["d"]))
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(expand_year(year)?, month.parse().ok()?, day.parse().ok()?)
}

/// Month names, full or abbreviated, are resolved by chrono's `%B`.
fn named_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let text = format!("{} {} {}", day, month, expand_year(year)?);
    NaiveDate::parse_from_str(&text, "%d %B %Y").ok()
}

/// Two-digit years resolve to the century that keeps them within 50 years
/// of the current year.
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    match year.len() {
        4 => Some(value),
        2 => {
            let current = Utc::now().year();
            let candidate = current - current % 100 + value;
            if candidate > current + 50 {
                Some(candidate - 100)
            } else if candidate <= current - 50 {
                Some(candidate + 100)
            } else {
                Some(candidate)
            }
        }
        _ => None,
    }
}

fn non_empty_text(value: &CellValue) -> Option<&str> {
    match value {
        CellValue::Text(s) if !s.trim().is_empty() => Some(s.trim()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&CellValue::Empty));
        assert!(is_empty(&CellValue::from(f64::NAN)));
        assert!(is_empty(&text("")));
        assert!(is_empty(&text("   \t ")));

        assert!(!is_empty(&text("0")));
        assert!(!is_empty(&text("N/A")));
        assert!(!is_empty(&text("n/a")));
        assert!(!is_empty(&text("N/a")));
        assert!(!is_empty(&text("nan")));
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer(&text("97000")), Some(97000));
        assert_eq!(to_integer(&text(" 97000 ")), Some(97000));
        assert_eq!(to_integer(&text("97000.0")), Some(97000));
        assert_eq!(to_integer(&text("97000.5")), None);
        assert_eq!(to_integer(&text("97000.00")), None);
        assert_eq!(to_integer(&text("-12")), Some(-12));
        assert_eq!(to_integer(&text("abc")), None);
        assert_eq!(to_integer(&text(".0")), None);
        assert_eq!(to_integer(&CellValue::Empty), None);
    }

    #[test]
    fn test_to_integer_outside_i64_range() {
        assert_eq!(
            to_integer(&text("9223372036854775807")),
            Some(i64::MAX)
        );
        assert_eq!(to_integer(&text("9223372036854775808")), None);
        assert_eq!(to_integer(&text("12345678901234567890")), None);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&text("12.5")), Some(12.5));
        assert_eq!(to_float(&text(" -3 ")), Some(-3.0));
        assert_eq!(to_float(&text("1e3")), Some(1000.0));
        assert_eq!(to_float(&text("abc")), None);
        assert_eq!(to_float(&text("  ")), None);
    }

    #[test]
    fn test_to_truncated_integer() {
        assert_eq!(to_truncated_integer(&text("2.9")), Some(2));
        assert_eq!(to_truncated_integer(&text("-0.5")), Some(0));
        assert_eq!(to_truncated_integer(&text("1")), Some(1));
        assert_eq!(to_truncated_integer(&text("inf")), None);
        assert_eq!(to_truncated_integer(&text("x")), None);
    }

    #[test]
    fn test_parse_date_iso_and_day_first() {
        assert_eq!(parse_date(&text("2024-03-15")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("15/03/2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("15.03.2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("05/03/2024")).as_deref(), Some("05-03-2024"));
        assert_eq!(parse_date(&text("5-3-2024")).as_deref(), Some("05-03-2024"));
        assert_eq!(parse_date(&text("20240315")).as_deref(), Some("15-03-2024"));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(
            parse_date(&text("2024-03-15 00:00:00")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(
            parse_date(&text("2024-03-15T13:45")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(parse_date(&text("2024-03-15 25:00:00")), None);
    }

    #[test]
    fn test_parse_date_with_meridiem_and_offset() {
        assert_eq!(
            parse_date(&text("15/03/2024 10:30 PM")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(
            parse_date(&text("15 March 2024 9:05:10 am")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(
            parse_date(&text("2024-03-15T10:30:00Z")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(
            parse_date(&text("2024-03-15 10:30:00+03:00")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(
            parse_date(&text("2024-03-15T10:30:00.250-05:00")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(parse_date(&text("15/03/2024 13:30 PM")), None);
    }

    #[test]
    fn test_parse_date_month_names() {
        assert_eq!(parse_date(&text("15 March 2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("15-Mar-2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("March 15, 2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("Mar 15 2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(parse_date(&text("15th March 2024")).as_deref(), Some("15-03-2024"));
        assert_eq!(
            parse_date(&text("Friday, 15 March 2024")).as_deref(),
            Some("15-03-2024")
        );
        assert_eq!(parse_date(&text("2024 Sep 01")).as_deref(), Some("01-09-2024"));
    }

    #[test]
    fn test_parse_date_rejects_invalid() {
        assert_eq!(parse_date(&text("31-02-2024")), None);
        assert_eq!(parse_date(&text("03/15/2024")), None);
        assert_eq!(parse_date(&text("15/03-2024")), None);
        assert_eq!(parse_date(&text("not a date")), None);
        assert_eq!(parse_date(&text("15 Foo 2024")), None);
        assert_eq!(parse_date(&text("15 Sept 2024")), None);
        assert_eq!(parse_date(&CellValue::Empty), None);
    }

    #[test]
    fn test_parse_date_rejects_month_and_year_without_day() {
        assert_eq!(parse_date(&text("March 2024")), None);
        assert_eq!(parse_date(&text("Mar 1999")), None);
        assert_eq!(parse_date(&text("March 2031")), None);
        assert_eq!(parse_date(&text("2024 March")), None);

        assert_eq!(parse_date(&text("March 20, 2031")).as_deref(), Some("20-03-2031"));
        assert_eq!(parse_date(&text("Mar 19 99")).as_deref(), Some("19-03-1999"));
    }

    #[test]
    fn test_parse_date_is_idempotent() {
        let once = parse_date(&text("2024-03-15")).unwrap();
        let twice = parse_date(&CellValue::from(once.as_str())).unwrap();
        assert_eq!(once, twice);
    }
}
