//! Display formatting shared by list, detail and filter views.

use crate::model::booth::ListType;
use chrono::NaiveDate;

/// Compact dollar amount used for monthly sales.
///
/// `0` (or NaN) -> `$0`, `1_250_000` -> `$1.3M`, `52_400` -> `$52K`,
/// `750` -> `$750`.
pub fn format_currency(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        return "$0".to_string();
    }
    if value >= 1_000_000.0 {
        let tenths = (value / 100_000.0).round() / 10.0;
        return format!("${tenths:.1}M");
    }
    if value >= 1_000.0 {
        return format!("${}K", (value / 1_000.0).round());
    }
    format!("${value}")
}

/// Label of a minimum-revenue filter option.
pub fn revenue_threshold_label(threshold: f64) -> String {
    if threshold == 0.0 {
        "Any".to_string()
    } else {
        format!("≥ {}", format_currency(threshold))
    }
}

/// `Feb 12 - Feb 15` for two ISO dates; `None` if either is missing or
/// unparsable.
pub fn date_range(start: &str, end: &str) -> Option<String> {
    let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").ok()?;
    Some(format!(
        "{} - {}",
        start.format("%b %-d"),
        end.format("%b %-d")
    ))
}

/// `"<Rep> - <List>"` for a rep's list, `"<List>"` for a shared one.
pub fn list_title(rep_name: Option<&str>, list_type: ListType) -> String {
    match rep_name {
        Some(name) => format!("{name} - {}", list_type.label()),
        None => list_type.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{date_range, format_currency, list_title, revenue_threshold_label};
    use crate::model::booth::ListType;

    #[test]
    fn currency_thresholds() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(f64::NAN), "$0");
        assert_eq!(format_currency(750.0), "$750");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(12.5), "$12.5");
        assert_eq!(format_currency(1_000.0), "$1K");
        assert_eq!(format_currency(52_400.0), "$52K");
        assert_eq!(format_currency(999_499.0), "$999K");
        assert_eq!(format_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_currency(1_250_000.0), "$1.3M");
        assert_eq!(format_currency(12_340_000.0), "$12.3M");
    }

    #[test]
    fn threshold_labels() {
        assert_eq!(revenue_threshold_label(0.0), "Any");
        assert_eq!(revenue_threshold_label(50_000.0), "≥ $50K");
        assert_eq!(revenue_threshold_label(1_000_000.0), "≥ $1.0M");
    }

    #[test]
    fn date_ranges_need_both_dates() {
        assert_eq!(
            date_range("2026-02-12", "2026-02-15").as_deref(),
            Some("Feb 12 - Feb 15")
        );
        assert_eq!(
            date_range("2026-03-03", "2026-03-06").as_deref(),
            Some("Mar 3 - Mar 6")
        );
        assert_eq!(date_range("", "2026-02-15"), None);
        assert_eq!(date_range("soon", "later"), None);
    }

    #[test]
    fn titles() {
        assert_eq!(list_title(Some("Drew"), ListType::HitList), "Drew - Hit List");
        assert_eq!(list_title(None, ListType::CurrentOpps), "Current Opps");
    }
}
