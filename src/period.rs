//! Chart-axis period formatting.
//!
//! Two input shapes are accepted and format identically:
//!
//! - `MM'YYYY` (time-series display form, e.g. `03'2022`)
//! - `YYYY-MM` (survey id form, e.g. `2022-03`)
//!
//! Anything unparseable is logged at `warn` and returned verbatim so a bad
//! axis label never breaks a chart.

use tracing::warn;

use crate::domain::Locale;

const SHORT_MONTHS_UK: [&str; 12] = [
    "Січ", "Лют", "Бер", "Кві", "Тра", "Чер", "Лип", "Сер", "Вер", "Жов", "Лис", "Гру",
];
const SHORT_MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FULL_MONTHS_UK: [&str; 12] = [
    "Січень", "Лютий", "Березень", "Квітень", "Травень", "Червень",
    "Липень", "Серпень", "Вересень", "Жовтень", "Листопад", "Грудень",
];
const FULL_MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Abbreviated month names, January first.
pub fn short_month_names(locale: Locale) -> &'static [&'static str; 12] {
    match locale {
        Locale::Uk => &SHORT_MONTHS_UK,
        Locale::En => &SHORT_MONTHS_EN,
    }
}

/// Full month names, January first.
pub fn full_month_names(locale: Locale) -> &'static [&'static str; 12] {
    match locale {
        Locale::Uk => &FULL_MONTHS_UK,
        Locale::En => &FULL_MONTHS_EN,
    }
}

/// `"03'2022"` / `"2022-03"` -> `"Бер'2022"` (uk) or `"Mar'2022"` (en).
pub fn format_chart_period(period: &str, locale: Locale) -> String {
    match split_period(period) {
        Some((index, year)) => format!("{}'{year}", short_month_names(locale)[index]),
        None => period.to_string(),
    }
}

/// `"03'2022"` / `"2022-03"` -> `"Березень 2022"` (uk) or `"March 2022"` (en).
pub fn format_full_period(period: &str, locale: Locale) -> String {
    match split_period(period) {
        Some((index, year)) => format!("{} {year}", full_month_names(locale)[index]),
        None => period.to_string(),
    }
}

/// Zero-based month index and the year text.
fn split_period(period: &str) -> Option<(usize, &str)> {
    let (month, year) = if period.contains('-') {
        let mut parts = period.split('-');
        let year = parts.next().unwrap_or_default();
        (parts.next().unwrap_or_default(), year)
    } else if period.contains('\'') {
        let mut parts = period.split('\'');
        let month = parts.next().unwrap_or_default();
        (month, parts.next().unwrap_or_default())
    } else {
        warn!(period, "unknown period format");
        return None;
    };

    match leading_int(month) {
        Some(m) if (1..=12).contains(&m) => Some(((m - 1) as usize, year)),
        parsed => {
            warn!(period, ?parsed, "invalid month in period");
            None
        }
    }
}

/// Integer prefix of `s` after leading whitespace, with an optional sign.
/// Trailing garbage is ignored; no digits at all yields `None`.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
