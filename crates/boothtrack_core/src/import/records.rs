//! Record construction from a mapped delimited table.

use crate::import::delimited::DelimitedTable;
use crate::import::mapping::ColumnMapping;
use crate::import::schema::FieldKey;
use crate::import::ImportResult;
use crate::model::booth::{validate_rep_for_list, Booth, ListType};
use crate::model::ident::normalize_domain;
use crate::model::person::Person;
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid leading number regex")
});

/// Parses a sales cell such as `$1,250,000` or `250000 USD`.
///
/// Currency symbols, thousands separators and whitespace are stripped; the
/// longest numeric prefix is used. Anything unparsable becomes `0`.
pub fn parse_sales(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    LEADING_NUMBER_RE
        .find(&cleaned)
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Builds fresh booth records for one `(show, rep, list)` import.
///
/// Rows missing any required value are skipped. Every record starts
/// unvisited with picker fields at `N/A`.
pub fn build_booths(
    table: &DelimitedTable,
    mapping: &ColumnMapping,
    show_id: &str,
    rep_id: Option<&str>,
    list_type: ListType,
) -> ImportResult<Vec<Booth>> {
    mapping.validate()?;
    validate_rep_for_list(list_type, rep_id)?;

    let mut booths = Vec::new();
    for row in &table.rows {
        let cells = RowCells { row, mapping };
        if !cells.has_required() {
            continue;
        }

        let mut booth = Booth::new(
            show_id,
            rep_id.map(str::to_string),
            list_type,
            cells.text(FieldKey::CompanyName),
        );
        booth.booth_number = cells.text(FieldKey::BoothNumber);
        booth.domain = cells.text(FieldKey::Domain);
        booth.estimated_monthly_sales = cells
            .raw(FieldKey::EstimatedMonthlySales)
            .map(parse_sales)
            .unwrap_or(0.0);
        booth.platform = cells.text(FieldKey::Platform);
        booth.protection = cells.text(FieldKey::Protection);
        booth.returns = cells.text(FieldKey::Returns);
        let owner = cells.text(FieldKey::OwnerId);
        booth.owner_id = (!owner.is_empty()).then_some(owner);
        booths.push(booth);
    }
    Ok(booths)
}

/// Builds people records for one show's contact import.
pub fn build_people(
    table: &DelimitedTable,
    mapping: &ColumnMapping,
    show_id: &str,
) -> ImportResult<Vec<Person>> {
    mapping.validate()?;

    let mut people = Vec::new();
    for row in &table.rows {
        let cells = RowCells { row, mapping };
        if !cells.has_required() {
            continue;
        }

        let mut person = Person::new(
            show_id,
            cells.text(FieldKey::FullName),
            &cells.text(FieldKey::CompanyDomain),
        );
        person.title = cells.text(FieldKey::Title);
        person.email = cells.text(FieldKey::Email);
        person.phone = cells.text(FieldKey::Phone);
        people.push(person);
    }
    Ok(people)
}

struct RowCells<'a> {
    row: &'a [String],
    mapping: &'a ColumnMapping,
}

impl RowCells<'_> {
    fn raw(&self, key: FieldKey) -> Option<&str> {
        self.mapping
            .get(key)
            .and_then(|index| self.row.get(index))
            .map(|cell| cell.trim())
    }

    fn text(&self, key: FieldKey) -> String {
        self.raw(key).unwrap_or_default().to_string()
    }

    /// Domains count as present only when something survives normalization.
    fn has_required(&self) -> bool {
        self.mapping
            .schema()
            .iter()
            .filter(|spec| spec.required)
            .all(|spec| match (spec.key, self.raw(spec.key)) {
                (FieldKey::CompanyDomain, Some(value)) => !normalize_domain(value).is_empty(),
                (_, Some(value)) => !value.is_empty(),
                (_, None) => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{build_booths, build_people, parse_sales};
    use crate::import::delimited::parse_delimited;
    use crate::import::mapping::ColumnMapping;
    use crate::import::schema::{schema_for, ImportTarget};
    use crate::model::booth::{LeadStatus, ListType};

    #[test]
    fn sales_cells_strip_currency_and_separators() {
        assert_eq!(parse_sales("$1,250,000"), 1_250_000.0);
        assert_eq!(parse_sales(" 42.5 "), 42.5);
        assert_eq!(parse_sales("250000 USD"), 250_000.0);
        assert_eq!(parse_sales("n/a"), 0.0);
        assert_eq!(parse_sales(""), 0.0);
    }

    #[test]
    fn booths_skip_rows_without_company() {
        let table = parse_delimited(
            "Company\tBooth\tRevenue\nAcme\t101\t$5,000\n\t102\t9\nGlobex\t\tabc",
        )
        .unwrap();
        let schema = schema_for(ImportTarget::Booths(ListType::HitList));
        let mapping = ColumnMapping::auto_detect(&table.headers, schema);

        let booths = build_booths(&table, &mapping, "expo", Some("drew"), ListType::HitList).unwrap();
        assert_eq!(booths.len(), 2);
        assert_eq!(booths[0].company_name, "Acme");
        assert_eq!(booths[0].booth_number, "101");
        assert_eq!(booths[0].estimated_monthly_sales, 5_000.0);
        assert_eq!(booths[0].status, LeadStatus::NotVisited);
        assert_eq!(booths[0].rep_id.as_deref(), Some("drew"));
        assert_eq!(booths[1].company_name, "Globex");
        assert_eq!(booths[1].estimated_monthly_sales, 0.0);
        assert_ne!(booths[0].id, booths[1].id);
    }

    #[test]
    fn opportunity_rows_carry_owner_ids() {
        let table = parse_delimited("Company,Owner ID,Domain\nAcme,77,acme.com\nGlobex,,globex.com").unwrap();
        let schema = schema_for(ImportTarget::Booths(ListType::CurrentOpps));
        let mapping = ColumnMapping::auto_detect(&table.headers, schema);

        let booths = build_booths(&table, &mapping, "expo", None, ListType::CurrentOpps).unwrap();
        assert_eq!(booths.len(), 1);
        assert_eq!(booths[0].owner_id.as_deref(), Some("77"));
        assert_eq!(booths[0].domain, "acme.com");
    }

    #[test]
    fn people_domains_are_normalized() {
        let table = parse_delimited(
            "Full Name\tJob Title\tCompany Domain\tEmail\nAda Lovelace\tCTO\thttps://www.Acme.com/about\tada@acme.com",
        )
        .unwrap();
        let mapping = ColumnMapping::auto_detect(&table.headers, schema_for(ImportTarget::People));

        let people = build_people(&table, &mapping, "expo").unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].full_name, "Ada Lovelace");
        assert_eq!(people[0].title, "CTO");
        assert_eq!(people[0].company_domain, "acme.com");
        assert_eq!(people[0].email, "ada@acme.com");
    }

    #[test]
    fn people_rows_with_empty_normalized_domain_are_skipped() {
        let table = parse_delimited(
            "Full Name\tCompany Domain\nAda\thttps://\nBob\twww.\nCy\tcy.io",
        )
        .unwrap();
        let mapping = ColumnMapping::auto_detect(&table.headers, schema_for(ImportTarget::People));

        let people = build_people(&table, &mapping, "expo").unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].full_name, "Cy");
        assert_eq!(people[0].company_domain, "cy.io");
    }
}
