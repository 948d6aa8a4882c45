//! Per-target import field schemas and header synonym tables.

use crate::model::booth::ListType;

/// Importable field of a booth or person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    CompanyName,
    BoothNumber,
    Domain,
    EstimatedMonthlySales,
    Platform,
    Protection,
    Returns,
    OwnerId,
    FullName,
    CompanyDomain,
    Title,
    Email,
    Phone,
}

impl FieldKey {
    /// Stable key used by `--map key=header` overrides.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::BoothNumber => "boothNumber",
            Self::Domain => "domain",
            Self::EstimatedMonthlySales => "estimatedMonthlySales",
            Self::Platform => "platform",
            Self::Protection => "protection",
            Self::Returns => "returns",
            Self::OwnerId => "ownerId",
            Self::FullName => "fullName",
            Self::CompanyDomain => "companyDomain",
            Self::Title => "title",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::BoothNumber => "Booth Number",
            Self::Domain => "Domain",
            Self::EstimatedMonthlySales => "Est. Monthly Sales",
            Self::Platform => "Platform",
            Self::Protection => "Protection",
            Self::Returns => "Returns",
            Self::OwnerId => "CRM Owner ID",
            Self::FullName => "Full Name",
            Self::CompanyDomain => "Company Domain",
            Self::Title => "Title",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// Lowercase substrings that identify this field in a header.
    ///
    /// Order matters only for readability: a header matches when it
    /// contains any entry.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::CompanyName => &["company name", "company", "name", "merchant"],
            Self::BoothNumber => &["booth", "booth#", "booth number", "booth #"],
            Self::Domain => &["domain", "website", "url", "company domain"],
            Self::EstimatedMonthlySales => &[
                "est monthly sales",
                "estimated monthly sales",
                "monthly sales",
                "revenue",
                "gmv",
            ],
            Self::Platform => &["platform", "ecommerce platform", "cart"],
            Self::Protection => &[
                "protection",
                "competitor",
                "competitor tracking",
                "shipping protection",
            ],
            Self::Returns => &["returns", "return provider", "returns provider"],
            Self::OwnerId => &[
                "owner id",
                "crm owner",
                "hubspot owner",
                "account owner",
                "owner",
            ],
            Self::FullName => &["full name", "contact name", "contact", "person", "name"],
            Self::CompanyDomain => &["company domain", "domain", "website", "url"],
            Self::Title => &["job title", "title", "role", "position"],
            Self::Email => &["email", "e-mail"],
            Self::Phone => &["phone", "mobile", "cell"],
        }
    }

    /// Parses a key (`ownerId`, `owner_id`, `owner-id`) case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        ALL_FIELDS
            .iter()
            .copied()
            .find(|key| key.as_str().to_lowercase() == normalized)
    }
}

const ALL_FIELDS: &[FieldKey] = &[
    FieldKey::CompanyName,
    FieldKey::BoothNumber,
    FieldKey::Domain,
    FieldKey::EstimatedMonthlySales,
    FieldKey::Platform,
    FieldKey::Protection,
    FieldKey::Returns,
    FieldKey::OwnerId,
    FieldKey::FullName,
    FieldKey::CompanyDomain,
    FieldKey::Title,
    FieldKey::Email,
    FieldKey::Phone,
];

/// One schema slot shown in the column mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub required: bool,
}

impl FieldSpec {
    const fn required(key: FieldKey) -> Self {
        Self {
            key,
            required: true,
        }
    }

    const fn optional(key: FieldKey) -> Self {
        Self {
            key,
            required: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.key.label()
    }
}

/// What an import writes: one booth list, or a show's people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportTarget {
    Booths(ListType),
    People,
}

impl ImportTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "people" | "contacts" => Some(Self::People),
            other => ListType::parse(other).map(Self::Booths),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Booths(list_type) => list_type.label(),
            Self::People => "People",
        }
    }

    pub fn schema(self) -> &'static [FieldSpec] {
        schema_for(self)
    }
}

const PROSPECT_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required(FieldKey::CompanyName),
    FieldSpec::optional(FieldKey::BoothNumber),
    FieldSpec::optional(FieldKey::Domain),
    FieldSpec::optional(FieldKey::EstimatedMonthlySales),
    FieldSpec::optional(FieldKey::Platform),
    FieldSpec::optional(FieldKey::Protection),
    FieldSpec::optional(FieldKey::Returns),
];

const CUSTOMER_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required(FieldKey::CompanyName),
    FieldSpec::required(FieldKey::Domain),
    FieldSpec::optional(FieldKey::OwnerId),
    FieldSpec::optional(FieldKey::BoothNumber),
    FieldSpec::optional(FieldKey::EstimatedMonthlySales),
    FieldSpec::optional(FieldKey::Platform),
    FieldSpec::optional(FieldKey::Protection),
    FieldSpec::optional(FieldKey::Returns),
];

const OPPORTUNITY_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required(FieldKey::CompanyName),
    FieldSpec::required(FieldKey::OwnerId),
    FieldSpec::optional(FieldKey::Domain),
    FieldSpec::optional(FieldKey::BoothNumber),
    FieldSpec::optional(FieldKey::EstimatedMonthlySales),
    FieldSpec::optional(FieldKey::Platform),
];

const PEOPLE_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required(FieldKey::FullName),
    FieldSpec::required(FieldKey::CompanyDomain),
    FieldSpec::optional(FieldKey::Title),
    FieldSpec::optional(FieldKey::Email),
    FieldSpec::optional(FieldKey::Phone),
];

/// Ordered field schema for an import target.
pub fn schema_for(target: ImportTarget) -> &'static [FieldSpec] {
    match target {
        ImportTarget::Booths(ListType::HitList | ListType::Master) => PROSPECT_SCHEMA,
        ImportTarget::Booths(ListType::Customers) => CUSTOMER_SCHEMA,
        ImportTarget::Booths(ListType::CurrentOpps) => OPPORTUNITY_SCHEMA,
        ImportTarget::People => PEOPLE_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::{schema_for, FieldKey, ImportTarget};
    use crate::model::booth::ListType;

    #[test]
    fn every_schema_has_exactly_one_leading_required_name_field() {
        for target in [
            ImportTarget::Booths(ListType::HitList),
            ImportTarget::Booths(ListType::Master),
            ImportTarget::Booths(ListType::Customers),
            ImportTarget::Booths(ListType::CurrentOpps),
            ImportTarget::People,
        ] {
            let schema = schema_for(target);
            assert!(schema[0].required, "{} leads with a required field", target.label());
        }
    }

    #[test]
    fn field_keys_parse_loosely() {
        assert_eq!(FieldKey::parse("ownerId"), Some(FieldKey::OwnerId));
        assert_eq!(FieldKey::parse("owner_id"), Some(FieldKey::OwnerId));
        assert_eq!(FieldKey::parse("Company-Name"), Some(FieldKey::CompanyName));
        assert_eq!(FieldKey::parse("nope"), None);
    }

    #[test]
    fn targets_parse_people_and_lists() {
        assert_eq!(ImportTarget::parse("people"), Some(ImportTarget::People));
        assert_eq!(
            ImportTarget::parse("customers"),
            Some(ImportTarget::Booths(ListType::Customers))
        );
    }
}
