//! Years-of-experience estimation

use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static YEARS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s+years?").expect("Invalid years regex")
});

static MONTHS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s+months?").expect("Invalid months regex")
});

static DATE_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+\s+\d{4}").expect("Invalid date regex")
});

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Total experience in (possibly fractional) years.
///
/// Explicit `N years` / `N months` phrases are summed. When the text holds at
/// least two `<Month> <Year>` tokens, the span between the first two counts
/// too, but only if it is larger than the sum.
pub fn extract_experience(text: &str) -> f64 {
    let years: f64 = YEARS_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .sum();
    let months: f64 = MONTHS_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .map(|m| m / 12.0)
        .sum();
    let mut total = years + months;

    let tokens: Vec<&str> = DATE_TOKEN_REGEX.find_iter(text).take(2).map(|m| m.as_str()).collect();
    if let [start, end] = tokens.as_slice() {
        match (parse_month_year(start), parse_month_year(end)) {
            (Some(start), Some(end)) => {
                let span = (end - start).num_days().div_euclid(365) as f64;
                total = total.max(span);
            }
            _ => debug!("Ignoring unparseable date range '{}' - '{}'", start, end),
        }
    }

    total
}

/// Parse `MonthName YYYY` (full English month name, any case) to the first of that month.
pub fn parse_month_year(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split_whitespace();
    let month_name = parts.next()?.to_lowercase();
    let year_part = parts.next()?;
    if parts.next().is_some() || year_part.len() != 4 {
        return None;
    }

    let month = MONTH_NAMES.iter().position(|name| *name == month_name)? as u32 + 1;
    let year: i32 = year_part.parse().ok()?;
    if year < 1 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)
}
