//! Contact person linked to a company by domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for person records.
pub type PersonId = Uuid;

/// Contact record imported from a people list.
///
/// People are not foreign-keyed to booths; they are joined on the
/// normalized company domain at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub show_id: String,
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Stored normalized (see `normalize_domain`).
    pub company_domain: String,
    #[serde(default)]
    pub updated_at: i64,
}

impl Person {
    pub fn new(
        show_id: impl Into<String>,
        full_name: impl Into<String>,
        company_domain: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            show_id: show_id.into(),
            full_name: full_name.into(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            company_domain: super::ident::normalize_domain(company_domain),
            updated_at: 0,
        }
    }
}
