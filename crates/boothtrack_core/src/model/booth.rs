//! Booth (lead) domain model.
//!
//! # Responsibility
//! - Define the canonical company record shown on every list view.
//! - Own status/list-type vocabularies and record-level validation.
//!
//! # Invariants
//! - `id` is stable and never reused; a claimed copy gets a fresh id.
//! - A `hit_list` record always belongs to one rep; shared lists have none.
//! - `company_name` is never empty for a persisted record.

use crate::model::catalog::{AOV_OPTIONS, NOT_APPLICABLE, ORDER_OPTIONS};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for booth records.
pub type BoothId = Uuid;

/// Visit outcome recorded by a rep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    NotVisited,
    FollowUp,
    DemoBooked,
    Dq,
}

impl LeadStatus {
    /// All statuses in display order.
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::NotVisited,
        LeadStatus::FollowUp,
        LeadStatus::DemoBooked,
        LeadStatus::Dq,
    ];

    /// Stable storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotVisited => "not_visited",
            Self::FollowUp => "follow_up",
            Self::DemoBooked => "demo_booked",
            Self::Dq => "dq",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotVisited => "Not Visited",
            Self::FollowUp => "Follow Up",
            Self::DemoBooked => "Demo Booked",
            Self::Dq => "DQ",
        }
    }

    /// Parses a storage value or a label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "not_visited" => Some(Self::NotVisited),
            "follow_up" => Some(Self::FollowUp),
            "demo_booked" | "demo" => Some(Self::DemoBooked),
            "dq" => Some(Self::Dq),
            _ => None,
        }
    }
}

/// Named record category a booth belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    #[default]
    HitList,
    Master,
    Customers,
    CurrentOpps,
}

impl ListType {
    pub const ALL: [ListType; 4] = [
        ListType::HitList,
        ListType::Master,
        ListType::Customers,
        ListType::CurrentOpps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HitList => "hit_list",
            Self::Master => "master",
            Self::Customers => "customers",
            Self::CurrentOpps => "current_opps",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HitList => "Hit List",
            Self::Master => "Master",
            Self::Customers => "Customers",
            Self::CurrentOpps => "Current Opps",
        }
    }

    /// Parses a storage value, label, or the short `opps` alias.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "hit_list" | "hitlist" => Some(Self::HitList),
            "master" => Some(Self::Master),
            "customers" => Some(Self::Customers),
            "current_opps" | "opps" => Some(Self::CurrentOpps),
            _ => None,
        }
    }

    /// Personal lists belong to exactly one rep.
    pub fn is_personal(self) -> bool {
        matches!(self, Self::HitList)
    }
}

/// Record-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoothValidationError {
    EmptyCompanyName,
    MissingRep(ListType),
    UnexpectedRep(ListType),
    UnknownOrdersOption(String),
    UnknownAovOption(String),
    InvalidCardData,
}

impl Display for BoothValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCompanyName => write!(f, "company name cannot be empty"),
            Self::MissingRep(list) => write!(f, "{} records require a rep", list.label()),
            Self::UnexpectedRep(list) => {
                write!(f, "{} is a shared list and cannot belong to a rep", list.label())
            }
            Self::UnknownOrdersOption(value) => write!(f, "unknown orders/mo option `{value}`"),
            Self::UnknownAovOption(value) => write!(f, "unknown AOV option `{value}`"),
            Self::InvalidCardData => write!(f, "business card must be an image data URL"),
        }
    }
}

impl Error for BoothValidationError {}

/// Company record associated with a show and a list type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booth {
    pub id: BoothId,
    pub show_id: String,
    pub rep_id: Option<String>,
    pub list_type: ListType,
    pub company_name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub booth_number: String,
    #[serde(default)]
    pub estimated_monthly_sales: f64,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub protection: String,
    #[serde(default)]
    pub returns: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub contact_name: String,
    pub orders_per_month: String,
    pub aov: String,
    /// `data:image/...;base64,` URL of the captured card.
    #[serde(default)]
    pub business_card_data: Option<String>,
    /// External CRM owner id imported with customer/opportunity lists.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Set on a claimed copy; points at the shared record it came from.
    #[serde(default)]
    pub source_booth_id: Option<BoothId>,
    /// Set on the shared record by the most recent claim.
    #[serde(default)]
    pub claimed_by: Option<String>,
    #[serde(default)]
    pub claimed_at: Option<i64>,
    /// Unix epoch milliseconds of the last write.
    #[serde(default)]
    pub updated_at: i64,
}

impl Booth {
    /// Creates a fresh, unvisited record with a generated id.
    pub fn new(
        show_id: impl Into<String>,
        rep_id: Option<String>,
        list_type: ListType,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            show_id: show_id.into(),
            rep_id,
            list_type,
            company_name: company_name.into(),
            domain: String::new(),
            booth_number: String::new(),
            estimated_monthly_sales: 0.0,
            platform: String::new(),
            protection: String::new(),
            returns: String::new(),
            status: LeadStatus::NotVisited,
            notes: String::new(),
            contact_name: String::new(),
            orders_per_month: NOT_APPLICABLE.to_string(),
            aov: NOT_APPLICABLE.to_string(),
            business_card_data: None,
            owner_id: None,
            source_booth_id: None,
            claimed_by: None,
            claimed_at: None,
            updated_at: 0,
        }
    }

    /// Validates record invariants before persistence.
    pub fn validate(&self) -> Result<(), BoothValidationError> {
        if self.company_name.trim().is_empty() {
            return Err(BoothValidationError::EmptyCompanyName);
        }
        validate_rep_for_list(self.list_type, self.rep_id.as_deref())?;
        if !ORDER_OPTIONS.contains(&self.orders_per_month.as_str()) {
            return Err(BoothValidationError::UnknownOrdersOption(
                self.orders_per_month.clone(),
            ));
        }
        if !AOV_OPTIONS.contains(&self.aov.as_str()) {
            return Err(BoothValidationError::UnknownAovOption(self.aov.clone()));
        }
        if let Some(card) = self.business_card_data.as_deref() {
            if !card.starts_with("data:image/") {
                return Err(BoothValidationError::InvalidCardData);
            }
        }
        Ok(())
    }

    pub fn is_claimed_copy(&self) -> bool {
        self.source_booth_id.is_some()
    }

    pub fn has_card(&self) -> bool {
        self.business_card_data.is_some()
    }
}

/// Checks that a rep assignment fits the list type.
pub fn validate_rep_for_list(
    list_type: ListType,
    rep_id: Option<&str>,
) -> Result<(), BoothValidationError> {
    let has_rep = rep_id.is_some_and(|id| !id.trim().is_empty());
    if list_type.is_personal() && !has_rep {
        return Err(BoothValidationError::MissingRep(list_type));
    }
    if !list_type.is_personal() && has_rep {
        return Err(BoothValidationError::UnexpectedRep(list_type));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Booth, BoothValidationError, LeadStatus, ListType};

    #[test]
    fn new_booth_starts_unvisited_with_na_pickers() {
        let booth = Booth::new("expo", Some("drew".to_string()), ListType::HitList, "Acme");
        assert_eq!(booth.status, LeadStatus::NotVisited);
        assert_eq!(booth.orders_per_month, "N/A");
        assert_eq!(booth.aov, "N/A");
        booth.validate().unwrap();
    }

    #[test]
    fn rep_assignment_must_match_list_kind() {
        let personal = Booth::new("expo", None, ListType::HitList, "Acme");
        assert_eq!(
            personal.validate().unwrap_err(),
            BoothValidationError::MissingRep(ListType::HitList)
        );

        let shared = Booth::new("expo", Some("drew".to_string()), ListType::Master, "Acme");
        assert_eq!(
            shared.validate().unwrap_err(),
            BoothValidationError::UnexpectedRep(ListType::Master)
        );
    }

    #[test]
    fn status_and_list_parse_labels_and_storage_values() {
        assert_eq!(LeadStatus::parse("Demo Booked"), Some(LeadStatus::DemoBooked));
        assert_eq!(LeadStatus::parse("follow_up"), Some(LeadStatus::FollowUp));
        assert_eq!(ListType::parse("opps"), Some(ListType::CurrentOpps));
        assert_eq!(ListType::parse("Hit List"), Some(ListType::HitList));
        assert_eq!(ListType::parse("unknown"), None);
    }

    #[test]
    fn card_data_must_be_image_data_url() {
        let mut booth = Booth::new("expo", None, ListType::Master, "Acme");
        booth.business_card_data = Some("https://example.com/card.jpg".to_string());
        assert_eq!(
            booth.validate().unwrap_err(),
            BoothValidationError::InvalidCardData
        );
    }
}
