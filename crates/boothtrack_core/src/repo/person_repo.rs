//! Person repository contract and SQLite implementation.
//!
//! # Invariants
//! - `company_domain` is stored normalized, so lookups are exact matches.
//! - `replace_people` swaps a show's whole contact set at once.

use crate::model::ident::normalize_domain;
use crate::model::person::Person;
use crate::repo::sqlite_store::SqliteStore;
use crate::repo::{now_epoch_ms, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Row};
use uuid::Uuid;

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    show_id,
    full_name,
    title,
    email,
    phone,
    company_domain,
    updated_at
FROM people";

/// Repository interface for contact people.
pub trait PersonRepository {
    /// Lists one show's people ordered by name.
    fn list_people(&self, show_id: &str) -> RepoResult<Vec<Person>>;
    /// Lists one show's people whose company domain matches `domain`
    /// after normalization. An empty domain matches nobody.
    fn people_for_domain(&self, show_id: &str, domain: &str) -> RepoResult<Vec<Person>>;
    /// Replaces every person of `show_id`; returns the number removed.
    fn replace_people(&self, show_id: &str, people: &[Person]) -> RepoResult<usize>;
}

impl PersonRepository for SqliteStore<'_> {
    fn list_people(&self, show_id: &str) -> RepoResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE show_id = ?1
             ORDER BY full_name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([show_id])?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }
        Ok(people)
    }

    fn people_for_domain(&self, show_id: &str, domain: &str) -> RepoResult<Vec<Person>> {
        let normalized = normalize_domain(domain);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE show_id = ?1
               AND company_domain = ?2
             ORDER BY full_name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![show_id, normalized])?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }
        Ok(people)
    }

    fn replace_people(&self, show_id: &str, people: &[Person]) -> RepoResult<usize> {
        for person in people {
            validate_person(person, show_id)?;
        }

        let now = now_epoch_ms();
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM people WHERE show_id = ?1;", [show_id])?;
        for person in people {
            tx.execute(
                "INSERT INTO people (
                    id,
                    show_id,
                    full_name,
                    title,
                    email,
                    phone,
                    company_domain,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    person.id.to_string(),
                    person.show_id,
                    person.full_name,
                    person.title,
                    person.email,
                    person.phone,
                    normalize_domain(&person.company_domain),
                    now,
                ],
            )?;
        }
        tx.commit()?;

        info!(
            "event=people_replace module=repo status=ok backend=sqlite removed={removed} inserted={}",
            people.len()
        );
        Ok(removed)
    }
}

pub(crate) fn validate_person(person: &Person, show_id: &str) -> RepoResult<()> {
    if person.full_name.trim().is_empty() {
        return Err(RepoError::InvalidData(
            "person full name cannot be empty".to_string(),
        ));
    }
    if person.show_id != show_id {
        return Err(RepoError::InvalidData(format!(
            "person {} belongs to show `{}`, not `{show_id}`",
            person.id, person.show_id
        )));
    }
    Ok(())
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in people.id"))
    })?;

    Ok(Person {
        id,
        show_id: row.get("show_id")?,
        full_name: row.get("full_name")?,
        title: row.get("title")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company_domain: row.get("company_domain")?,
        updated_at: row.get("updated_at")?,
    })
}
