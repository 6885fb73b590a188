//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an FCFA amount with thousands separators.
///
/// Usage in templates: `{{ price|fcfa }}` renders `1 500 FCFA`.
#[askama::filter_fn]
pub fn fcfa(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_fcfa(&value.to_string()))
}

/// Insert non-breaking thin groupings every three digits, keeping any
/// leading sign.
fn format_fcfa(raw: &str) -> String {
    let (sign, digits) = raw
        .strip_prefix('-')
        .map_or(("", raw), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped} FCFA")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fcfa_groups_thousands() {
        assert_eq!(format_fcfa("500"), "500 FCFA");
        assert_eq!(format_fcfa("1500"), "1 500 FCFA");
        assert_eq!(format_fcfa("1234567"), "1 234 567 FCFA");
    }

    #[test]
    fn test_format_fcfa_negative() {
        assert_eq!(format_fcfa("-2500"), "-2 500 FCFA");
    }
}
