//! Sales rep model.

use serde::{Deserialize, Serialize};

/// Internal sales person working a show floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rep {
    /// Slug identifier, e.g. `drew`.
    pub id: String,
    pub name: String,
    /// Owner id of this rep in the external CRM; links imported
    /// customer/opportunity owners back to a rep.
    #[serde(default)]
    pub crm_owner_id: Option<String>,
}

impl Rep {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            crm_owner_id: None,
        }
    }

    /// First letter of the name, used as avatar text.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
