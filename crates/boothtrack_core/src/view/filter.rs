//! Booth list search, filters and sort orders.
//!
//! # Invariants
//! - Filtering never reorders; sorting is stable.
//! - `[No …]` sentinel filter values select records with an empty field.
//! - Validated filters only carry catalog values, in catalog spelling.

use crate::model::booth::{Booth, LeadStatus};
use crate::model::catalog::{
    NO_PLATFORM, NO_PROTECTION, NO_RETURNS, PLATFORMS, PROTECTION_PROVIDERS, RETURNS_PROVIDERS,
    REVENUE_THRESHOLDS,
};
use crate::view::format::revenue_threshold_label;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Booth numbers that do not start with a positive integer sort here.
const UNNUMBERED_BOOTH: u64 = 99_999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Numeric booth number ascending.
    #[default]
    Booth,
    /// Estimated monthly sales descending.
    Value,
    /// Company name, case-insensitive.
    Name,
}

impl SortBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "booth" => Some(Self::Booth),
            "value" | "sales" => Some(Self::Value),
            "name" | "company" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Active filter panel selections. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub platform: Option<String>,
    pub protection: Option<String>,
    pub returns: Option<String>,
    /// `0` disables the revenue filter.
    pub min_revenue: f64,
    pub status: Option<LeadStatus>,
}

/// Filter value outside the panel's option lists.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    UnknownOption { field: &'static str, value: String },
    UnknownThreshold(f64),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOption { field, value } => {
                write!(f, "`{value}` is not a {field} filter option")
            }
            Self::UnknownThreshold(value) => {
                write!(f, "{value} is not a minimum revenue option")
            }
        }
    }
}

impl Error for FilterError {}

impl Filters {
    /// Checks every selection against the catalogs, matching case-insensitively,
    /// and rewrites values to their catalog spelling.
    pub fn validated(self) -> Result<Self, FilterError> {
        if !REVENUE_THRESHOLDS.contains(&self.min_revenue) {
            return Err(FilterError::UnknownThreshold(self.min_revenue));
        }
        Ok(Self {
            platform: canonical("platform", PLATFORMS, self.platform)?,
            protection: canonical("protection", PROTECTION_PROVIDERS, self.protection)?,
            returns: canonical("returns", RETURNS_PROVIDERS, self.returns)?,
            ..self
        })
    }

    pub fn active_count(&self) -> usize {
        self.chips().len()
    }

    /// One label per active filter, in panel order.
    pub fn chips(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if let Some(platform) = &self.platform {
            chips.push(platform.clone());
        }
        if let Some(protection) = &self.protection {
            chips.push(protection.clone());
        }
        if let Some(returns) = &self.returns {
            chips.push(returns.clone());
        }
        if self.min_revenue > 0.0 {
            chips.push(revenue_threshold_label(self.min_revenue));
        }
        if let Some(status) = self.status {
            chips.push(status.label().to_string());
        }
        chips
    }

    pub fn matches(&self, booth: &Booth) -> bool {
        let platform_ok = match self.platform.as_deref() {
            None => true,
            Some(NO_PLATFORM) => booth.platform.is_empty(),
            Some(platform) => booth.platform == platform,
        };
        platform_ok
            && provider_matches(self.protection.as_deref(), NO_PROTECTION, &booth.protection)
            && provider_matches(self.returns.as_deref(), NO_RETURNS, &booth.returns)
            && (self.min_revenue <= 0.0 || booth.estimated_monthly_sales >= self.min_revenue)
            && self.status.map_or(true, |status| booth.status == status)
    }
}

fn canonical(
    field: &'static str,
    options: &[&str],
    selected: Option<String>,
) -> Result<Option<String>, FilterError> {
    let Some(selected) = selected else {
        return Ok(None);
    };
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(selected.trim()))
        .map(|option| Some(option.to_string()))
        .ok_or(FilterError::UnknownOption {
            field,
            value: selected,
        })
}

fn provider_matches(selected: Option<&str>, sentinel: &str, value: &str) -> bool {
    match selected {
        None => true,
        Some(selected) if selected == sentinel => value.is_empty(),
        Some(selected) => value.to_lowercase().contains(&selected.to_lowercase()),
    }
}

/// Case-insensitive substring match on company, booth number or domain.
pub fn matches_search(booth: &Booth, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [&booth.company_name, &booth.booth_number, &booth.domain]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Applies search and filters, then sorts.
pub fn filter_and_sort<'a>(
    booths: &'a [Booth],
    query: &str,
    filters: &Filters,
    sort: SortBy,
) -> Vec<&'a Booth> {
    let mut visible: Vec<&Booth> = booths
        .iter()
        .filter(|booth| matches_search(booth, query) && filters.matches(booth))
        .collect();

    match sort {
        SortBy::Booth => visible.sort_by_key(|booth| booth_sort_key(&booth.booth_number)),
        SortBy::Value => visible.sort_by(|a, b| {
            b.estimated_monthly_sales
                .partial_cmp(&a.estimated_monthly_sales)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Name => visible.sort_by(|a, b| {
            a.company_name
                .to_lowercase()
                .cmp(&b.company_name.to_lowercase())
        }),
    }
    visible
}

/// Leading integer of a booth number; missing or zero sorts last.
pub fn booth_sort_key(booth_number: &str) -> u64 {
    let digits: String = booth_number
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => UNNUMBERED_BOOTH,
        Ok(number) => number,
    }
}

#[cfg(test)]
mod tests {
    use super::{booth_sort_key, filter_and_sort, FilterError, Filters, SortBy};
    use crate::model::booth::{Booth, LeadStatus, ListType};

    fn booth(name: &str, number: &str, sales: f64) -> Booth {
        let mut booth = Booth::new("expo", None, ListType::Master, name);
        booth.booth_number = number.to_string();
        booth.estimated_monthly_sales = sales;
        booth
    }

    fn names(booths: &[&Booth]) -> Vec<String> {
        booths.iter().map(|b| b.company_name.clone()).collect()
    }

    #[test]
    fn booth_numbers_sort_numerically_with_unnumbered_last() {
        assert_eq!(booth_sort_key("101A"), 101);
        assert_eq!(booth_sort_key(" 7"), 7);
        assert_eq!(booth_sort_key("Hall B"), 99_999);
        assert_eq!(booth_sort_key("0"), 99_999);

        let booths = vec![
            booth("Tent", "", 0.0),
            booth("Big", "1200", 0.0),
            booth("Small", "95", 0.0),
        ];
        let sorted = filter_and_sort(&booths, "", &Filters::default(), SortBy::Booth);
        assert_eq!(names(&sorted), vec!["Small", "Big", "Tent"]);
    }

    #[test]
    fn value_sort_is_descending_and_name_sort_ignores_case() {
        let booths = vec![
            booth("beta", "1", 10.0),
            booth("Alpha", "2", 30.0),
            booth("gamma", "3", 20.0),
        ];
        let by_value = filter_and_sort(&booths, "", &Filters::default(), SortBy::Value);
        assert_eq!(names(&by_value), vec!["Alpha", "gamma", "beta"]);

        let by_name = filter_and_sort(&booths, "", &Filters::default(), SortBy::Name);
        assert_eq!(names(&by_name), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn search_covers_company_booth_and_domain() {
        let mut acme = booth("Acme", "101", 0.0);
        acme.domain = "acme.com".to_string();
        let booths = vec![acme, booth("Globex", "202", 0.0)];

        let hits = filter_and_sort(&booths, "ACME.C", &Filters::default(), SortBy::Booth);
        assert_eq!(names(&hits), vec!["Acme"]);
        let hits = filter_and_sort(&booths, "202", &Filters::default(), SortBy::Booth);
        assert_eq!(names(&hits), vec!["Globex"]);
    }

    #[test]
    fn sentinel_filters_select_empty_fields() {
        let mut protected = booth("Protected", "1", 0.0);
        protected.protection = "Route, Extend".to_string();
        protected.platform = "Shopify".to_string();
        let bare = booth("Bare", "2", 0.0);
        let booths = vec![protected, bare];

        let filters = Filters {
            protection: Some("[No Protection]".to_string()),
            ..Filters::default()
        };
        assert_eq!(names(&filter_and_sort(&booths, "", &filters, SortBy::Booth)), vec!["Bare"]);

        let filters = Filters {
            protection: Some("extend".to_string()),
            platform: Some("Shopify".to_string()),
            ..Filters::default()
        };
        assert_eq!(
            names(&filter_and_sort(&booths, "", &filters, SortBy::Booth)),
            vec!["Protected"]
        );
    }

    #[test]
    fn revenue_and_status_filters_and_chips() {
        let mut demo = booth("Demo", "1", 150_000.0);
        demo.status = LeadStatus::DemoBooked;
        let booths = vec![demo, booth("Small", "2", 10_000.0)];

        let filters = Filters {
            min_revenue: 100_000.0,
            status: Some(LeadStatus::DemoBooked),
            ..Filters::default()
        };
        assert_eq!(names(&filter_and_sort(&booths, "", &filters, SortBy::Booth)), vec!["Demo"]);
        assert_eq!(filters.chips(), vec!["≥ $100K", "Demo Booked"]);
        assert_eq!(filters.active_count(), 2);
        assert_eq!(Filters::default().active_count(), 0);
    }

    #[test]
    fn validated_filters_use_catalog_spelling() {
        let filters = Filters {
            platform: Some("shopify plus".to_string()),
            protection: Some(" route ".to_string()),
            returns: Some("[no returns]".to_string()),
            min_revenue: 50_000.0,
            status: None,
        }
        .validated()
        .unwrap();
        assert_eq!(filters.platform.as_deref(), Some("Shopify Plus"));
        assert_eq!(filters.protection.as_deref(), Some("Route"));
        assert_eq!(filters.returns.as_deref(), Some("[No Returns]"));
        assert_eq!(Filters::default().validated().unwrap(), Filters::default());
    }

    #[test]
    fn unknown_filter_values_are_rejected() {
        let filters = Filters {
            platform: Some("Wix".to_string()),
            ..Filters::default()
        };
        assert_eq!(
            filters.validated(),
            Err(FilterError::UnknownOption {
                field: "platform",
                value: "Wix".to_string(),
            })
        );

        let filters = Filters {
            returns: Some("Route".to_string()),
            ..Filters::default()
        };
        assert!(matches!(
            filters.validated(),
            Err(FilterError::UnknownOption { field: "returns", .. })
        ));

        let filters = Filters {
            min_revenue: 75_000.0,
            ..Filters::default()
        };
        assert_eq!(filters.validated(), Err(FilterError::UnknownThreshold(75_000.0)));
    }
}
