//! Show (trade event) metadata.

use serde::{Deserialize, Serialize};

/// Trade-show event that booths are attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Slug identifier, e.g. `expowest2026`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// `YYYY-MM-DD`, or empty when unknown.
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM-DD`, or empty when unknown.
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub exhibitor_list: String,
}

impl Show {
    /// Creates a show with only name/location known.
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            start_date: String::new(),
            end_date: String::new(),
            website: String::new(),
            exhibitor_list: String::new(),
        }
    }
}
