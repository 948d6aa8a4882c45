//! Booth repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist booth records for every list type.
//! - Own list replacement used by spreadsheet re-imports.
//!
//! # Invariants
//! - Write paths call `Booth::validate()` before SQL mutations.
//! - `save_booths` is an upsert: known ids are replaced, new ids are added.
//! - `replace_list` removes every record of one `(show, rep, list)` key and
//!   writes the new batch atomically.
//! - Listing order is `company_name` (case-insensitive), then `id`.

use crate::model::booth::{Booth, BoothId, LeadStatus, ListType};
use crate::repo::sqlite_store::SqliteStore;
use crate::repo::{now_epoch_ms, RepoError, RepoResult};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const BOOTH_SELECT_SQL: &str = "SELECT
    id,
    show_id,
    rep_id,
    list_type,
    company_name,
    domain,
    booth_number,
    estimated_monthly_sales,
    platform,
    protection,
    returns,
    status,
    notes,
    contact_name,
    orders_per_month,
    aov,
    business_card_data,
    owner_id,
    source_booth_id,
    claimed_by,
    claimed_at,
    updated_at
FROM booths";

const BOOTH_UPSERT_SQL: &str = "INSERT INTO booths (
    id,
    show_id,
    rep_id,
    list_type,
    company_name,
    domain,
    booth_number,
    estimated_monthly_sales,
    platform,
    protection,
    returns,
    status,
    notes,
    contact_name,
    orders_per_month,
    aov,
    business_card_data,
    owner_id,
    source_booth_id,
    claimed_by,
    claimed_at,
    updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
ON CONFLICT(id) DO UPDATE SET
    show_id = excluded.show_id,
    rep_id = excluded.rep_id,
    list_type = excluded.list_type,
    company_name = excluded.company_name,
    domain = excluded.domain,
    booth_number = excluded.booth_number,
    estimated_monthly_sales = excluded.estimated_monthly_sales,
    platform = excluded.platform,
    protection = excluded.protection,
    returns = excluded.returns,
    status = excluded.status,
    notes = excluded.notes,
    contact_name = excluded.contact_name,
    orders_per_month = excluded.orders_per_month,
    aov = excluded.aov,
    business_card_data = excluded.business_card_data,
    owner_id = excluded.owner_id,
    source_booth_id = excluded.source_booth_id,
    claimed_by = excluded.claimed_by,
    claimed_at = excluded.claimed_at,
    updated_at = excluded.updated_at;";

/// Filter for booth listing. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoothQuery {
    pub show_id: String,
    pub rep_id: Option<String>,
    pub list_type: Option<ListType>,
}

impl BoothQuery {
    /// Every booth of one show, across reps and list types.
    pub fn show(show_id: impl Into<String>) -> Self {
        Self {
            show_id: show_id.into(),
            ..Self::default()
        }
    }

    pub fn with_rep(mut self, rep_id: Option<String>) -> Self {
        self.rep_id = rep_id;
        self
    }

    pub fn with_list(mut self, list_type: ListType) -> Self {
        self.list_type = Some(list_type);
        self
    }

    /// Returns whether `booth` satisfies this query.
    pub fn matches(&self, booth: &Booth) -> bool {
        booth.show_id == self.show_id
            && self
                .rep_id
                .as_deref()
                .map_or(true, |rep| booth.rep_id.as_deref() == Some(rep))
            && self.list_type.map_or(true, |list| booth.list_type == list)
    }
}

/// Repository interface for booth records.
pub trait BoothRepository {
    fn list_booths(&self, query: &BoothQuery) -> RepoResult<Vec<Booth>>;
    fn get_booth(&self, id: BoothId) -> RepoResult<Option<Booth>>;
    /// Validates and upserts one booth, stamping `updated_at`.
    fn save_booth(&self, booth: &Booth) -> RepoResult<()>;
    /// Validates and upserts a batch; nothing is written if any record is invalid.
    fn save_booths(&self, booths: &[Booth]) -> RepoResult<()>;
    fn delete_booth(&self, id: BoothId) -> RepoResult<()>;
    /// Deletes every booth of one `(show, rep, list)` key; returns the count.
    fn delete_booths_for_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
    ) -> RepoResult<usize>;
    /// Replaces one `(show, rep, list)` key with `booths`; returns the number
    /// of records removed.
    fn replace_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
        booths: &[Booth],
    ) -> RepoResult<usize>;
}

impl BoothRepository for SqliteStore<'_> {
    fn list_booths(&self, query: &BoothQuery) -> RepoResult<Vec<Booth>> {
        let mut sql = format!("{BOOTH_SELECT_SQL} WHERE show_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(query.show_id.clone())];

        if let Some(rep_id) = query.rep_id.as_ref() {
            sql.push_str(" AND rep_id = ?");
            bind_values.push(Value::Text(rep_id.clone()));
        }

        if let Some(list_type) = query.list_type {
            sql.push_str(" AND list_type = ?");
            bind_values.push(Value::Text(list_type.as_str().to_string()));
        }

        sql.push_str(" ORDER BY company_name COLLATE NOCASE ASC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut booths = Vec::new();
        while let Some(row) = rows.next()? {
            booths.push(parse_booth_row(row)?);
        }
        Ok(booths)
    }

    fn get_booth(&self, id: BoothId) -> RepoResult<Option<Booth>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOTH_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_booth_row(row)?));
        }
        Ok(None)
    }

    fn save_booth(&self, booth: &Booth) -> RepoResult<()> {
        booth.validate()?;
        upsert_booth(self.conn, booth, now_epoch_ms())
    }

    fn save_booths(&self, booths: &[Booth]) -> RepoResult<()> {
        for booth in booths {
            booth.validate()?;
        }

        let now = now_epoch_ms();
        let tx = self.conn.unchecked_transaction()?;
        for booth in booths {
            upsert_booth(&tx, booth, now)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_booth(&self, id: BoothId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM booths WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "booth",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn delete_booths_for_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
    ) -> RepoResult<usize> {
        delete_list(self.conn, show_id, rep_id, list_type)
    }

    fn replace_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
        booths: &[Booth],
    ) -> RepoResult<usize> {
        for booth in booths {
            booth.validate()?;
            ensure_list_key(booth, show_id, rep_id, list_type)?;
        }

        let now = now_epoch_ms();
        let tx = self.conn.unchecked_transaction()?;
        let removed = delete_list(&tx, show_id, rep_id, list_type)?;
        for booth in booths {
            upsert_booth(&tx, booth, now)?;
        }
        tx.commit()?;

        info!(
            "event=list_replace module=repo status=ok backend=sqlite list_type={} removed={} inserted={}",
            list_type.as_str(),
            removed,
            booths.len()
        );
        Ok(removed)
    }
}

/// Rejects batch records that do not belong to the list being replaced.
pub(crate) fn ensure_list_key(
    booth: &Booth,
    show_id: &str,
    rep_id: Option<&str>,
    list_type: ListType,
) -> RepoResult<()> {
    if booth.show_id != show_id || booth.rep_id.as_deref() != rep_id || booth.list_type != list_type
    {
        return Err(RepoError::InvalidData(format!(
            "booth {} does not belong to list {show_id}/{}/{}",
            booth.id,
            rep_id.unwrap_or("shared"),
            list_type.as_str()
        )));
    }
    Ok(())
}

fn delete_list(
    conn: &Connection,
    show_id: &str,
    rep_id: Option<&str>,
    list_type: ListType,
) -> RepoResult<usize> {
    let removed = conn.execute(
        "DELETE FROM booths
         WHERE show_id = ?1
           AND rep_id IS ?2
           AND list_type = ?3;",
        params![show_id, rep_id, list_type.as_str()],
    )?;
    Ok(removed)
}

fn upsert_booth(conn: &Connection, booth: &Booth, updated_at: i64) -> RepoResult<()> {
    conn.execute(
        BOOTH_UPSERT_SQL,
        params![
            booth.id.to_string(),
            booth.show_id,
            booth.rep_id,
            booth.list_type.as_str(),
            booth.company_name,
            booth.domain,
            booth.booth_number,
            booth.estimated_monthly_sales,
            booth.platform,
            booth.protection,
            booth.returns,
            booth.status.as_str(),
            booth.notes,
            booth.contact_name,
            booth.orders_per_month,
            booth.aov,
            booth.business_card_data,
            booth.owner_id,
            booth.source_booth_id.map(|id| id.to_string()),
            booth.claimed_by,
            booth.claimed_at,
            updated_at,
        ],
    )?;
    Ok(())
}

fn parse_booth_row(row: &Row<'_>) -> RepoResult<Booth> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "booths.id")?;

    let list_text: String = row.get("list_type")?;
    let list_type = ListType::parse(&list_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid list type `{list_text}` in booths.list_type"))
    })?;

    let status_text: String = row.get("status")?;
    let status = LeadStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in booths.status"))
    })?;

    let source_booth_id = match row.get::<_, Option<String>>("source_booth_id")? {
        Some(value) => Some(parse_uuid(&value, "booths.source_booth_id")?),
        None => None,
    };

    Ok(Booth {
        id,
        show_id: row.get("show_id")?,
        rep_id: row.get("rep_id")?,
        list_type,
        company_name: row.get("company_name")?,
        domain: row.get("domain")?,
        booth_number: row.get("booth_number")?,
        estimated_monthly_sales: row.get("estimated_monthly_sales")?,
        platform: row.get("platform")?,
        protection: row.get("protection")?,
        returns: row.get("returns")?,
        status,
        notes: row.get("notes")?,
        contact_name: row.get("contact_name")?,
        orders_per_month: row.get("orders_per_month")?,
        aov: row.get("aov")?,
        business_card_data: row.get("business_card_data")?,
        owner_id: row.get("owner_id")?,
        source_booth_id,
        claimed_by: row.get("claimed_by")?,
        claimed_at: row.get("claimed_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
