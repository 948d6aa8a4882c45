//! Rep repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing is ordered by `name` (case-insensitive), then `id`.
//! - Deleting a rep removes the rep's own booths (hit lists).

use crate::model::rep::Rep;
use crate::repo::sqlite_store::SqliteStore;
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, OptionalExtension, Row};

/// Repository interface for reps.
pub trait RepRepository {
    fn list_reps(&self) -> RepoResult<Vec<Rep>>;
    fn get_rep(&self, id: &str) -> RepoResult<Option<Rep>>;
    /// Inserts or replaces one rep by id.
    fn save_rep(&self, rep: &Rep) -> RepoResult<()>;
    /// Deletes one rep together with the booths assigned to it.
    fn delete_rep(&self, id: &str) -> RepoResult<()>;
    /// Resolves an external CRM owner id to the rep carrying it.
    fn find_rep_by_crm_owner(&self, crm_owner_id: &str) -> RepoResult<Option<Rep>>;
}

impl RepRepository for SqliteStore<'_> {
    fn list_reps(&self) -> RepoResult<Vec<Rep>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, crm_owner_id
             FROM reps
             ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut reps = Vec::new();
        while let Some(row) = rows.next()? {
            reps.push(parse_rep_row(row)?);
        }
        Ok(reps)
    }

    fn get_rep(&self, id: &str) -> RepoResult<Option<Rep>> {
        let rep = self
            .conn
            .query_row(
                "SELECT id, name, crm_owner_id FROM reps WHERE id = ?1;",
                [id],
                parse_rep_row,
            )
            .optional()?;
        Ok(rep)
    }

    fn save_rep(&self, rep: &Rep) -> RepoResult<()> {
        if rep.id.trim().is_empty() || rep.name.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "rep id and name cannot be empty".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO reps (id, name, crm_owner_id) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                crm_owner_id = excluded.crm_owner_id;",
            params![rep.id, rep.name, rep.crm_owner_id],
        )?;
        Ok(())
    }

    fn delete_rep(&self, id: &str) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM reps WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "rep",
                id: id.to_string(),
            });
        }
        let booths = tx.execute("DELETE FROM booths WHERE rep_id = ?1;", [id])?;
        tx.commit()?;

        info!("event=rep_delete module=repo status=ok backend=sqlite booths_removed={booths}");
        Ok(())
    }

    fn find_rep_by_crm_owner(&self, crm_owner_id: &str) -> RepoResult<Option<Rep>> {
        let trimmed = crm_owner_id.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let rep = self
            .conn
            .query_row(
                "SELECT id, name, crm_owner_id
                 FROM reps
                 WHERE crm_owner_id = ?1
                 ORDER BY id ASC
                 LIMIT 1;",
                [trimmed],
                parse_rep_row,
            )
            .optional()?;
        Ok(rep)
    }
}

fn parse_rep_row(row: &Row<'_>) -> rusqlite::Result<Rep> {
    Ok(Rep {
        id: row.get("id")?,
        name: row.get("name")?,
        crm_owner_id: row.get("crm_owner_id")?,
    })
}
