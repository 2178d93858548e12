//! Calendar date rule.

use chrono::{DateTime, NaiveDate};

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

fn is_calendar_date(value: &str) -> bool {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
}

crate::rule! {
    /// Value must be a real calendar date.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY` and RFC 3339
    /// timestamps. Impossible dates such as February 30th fail.
    pub Date = "date";
    check(value) { is_calendar_date(value) }
}
