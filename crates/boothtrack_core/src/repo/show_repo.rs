//! Show repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing is ordered by `start_date ASC, name ASC` (undated shows first).
//! - Deleting a show removes its booths and people.

use crate::model::show::Show;
use crate::repo::sqlite_store::SqliteStore;
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, OptionalExtension, Row};

const SHOW_SELECT_SQL: &str = "SELECT
    id,
    name,
    location,
    start_date,
    end_date,
    website,
    exhibitor_list
FROM shows";

/// Repository interface for show metadata.
pub trait ShowRepository {
    fn list_shows(&self) -> RepoResult<Vec<Show>>;
    fn get_show(&self, id: &str) -> RepoResult<Option<Show>>;
    /// Inserts or replaces one show by id.
    fn save_show(&self, show: &Show) -> RepoResult<()>;
    /// Deletes one show together with its booths and people.
    fn delete_show(&self, id: &str) -> RepoResult<()>;
}

impl ShowRepository for SqliteStore<'_> {
    fn list_shows(&self) -> RepoResult<Vec<Show>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SHOW_SELECT_SQL} ORDER BY start_date ASC, name COLLATE NOCASE ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut shows = Vec::new();
        while let Some(row) = rows.next()? {
            shows.push(parse_show_row(row)?);
        }
        Ok(shows)
    }

    fn get_show(&self, id: &str) -> RepoResult<Option<Show>> {
        let show = self
            .conn
            .query_row(
                &format!("{SHOW_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_show_row,
            )
            .optional()?;
        Ok(show)
    }

    fn save_show(&self, show: &Show) -> RepoResult<()> {
        if show.id.trim().is_empty() || show.name.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "show id and name cannot be empty".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO shows (
                id,
                name,
                location,
                start_date,
                end_date,
                website,
                exhibitor_list
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                location = excluded.location,
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                website = excluded.website,
                exhibitor_list = excluded.exhibitor_list;",
            params![
                show.id,
                show.name,
                show.location,
                show.start_date,
                show.end_date,
                show.website,
                show.exhibitor_list,
            ],
        )?;
        Ok(())
    }

    fn delete_show(&self, id: &str) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM shows WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "show",
                id: id.to_string(),
            });
        }
        let booths = tx.execute("DELETE FROM booths WHERE show_id = ?1;", [id])?;
        let people = tx.execute("DELETE FROM people WHERE show_id = ?1;", [id])?;
        tx.commit()?;

        info!(
            "event=show_delete module=repo status=ok backend=sqlite booths_removed={booths} people_removed={people}"
        );
        Ok(())
    }
}

fn parse_show_row(row: &Row<'_>) -> rusqlite::Result<Show> {
    Ok(Show {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        website: row.get("website")?,
        exhibitor_list: row.get("exhibitor_list")?,
    })
}
