//! Persistence contracts and storage backends.
//!
//! # Responsibility
//! - Define use-case oriented data access traits per entity.
//! - Provide a row-oriented SQLite backend and a JSON key-value backend
//!   with identical observable behavior.
//!
//! # Invariants
//! - Booth writes call `Booth::validate()` before touching storage.
//! - Every write stamps `updated_at` with the current epoch milliseconds.
//! - Concurrent writers are not coordinated; the last write wins.

use crate::db::DbError;
use crate::model::booth::BoothValidationError;
use crate::model::catalog::{default_reps, default_shows};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod booth_repo;
pub mod kv_store;
pub mod person_repo;
pub mod rep_repo;
pub mod show_repo;
pub mod sqlite_store;

pub use booth_repo::{BoothQuery, BoothRepository};
pub use kv_store::KvStore;
pub use person_repo::PersonRepository;
pub use rep_repo::RepRepository;
pub use show_repo::ShowRepository;
pub use sqlite_store::SqliteStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by both storage backends.
#[derive(Debug)]
pub enum RepoError {
    Validation(BoothValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: String },
    InvalidData(String),
    Io(std::io::Error),
    Serialization(serde_json::Error),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Io(err) => write!(f, "storage io error: {err}"),
            Self::Serialization(err) => write!(f, "storage serialization error: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "store requires table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotFound { .. }
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<BoothValidationError> for RepoError {
    fn from(value: BoothValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Full persistence surface required by services.
pub trait Store: ShowRepository + RepRepository + BoothRepository + PersonRepository {}

impl<T> Store for T where T: ShowRepository + RepRepository + BoothRepository + PersonRepository {}

/// Seeds default shows and reps into empty collections.
///
/// Returns `true` when anything was inserted.
pub fn seed_defaults<S: Store>(store: &S) -> RepoResult<bool> {
    let mut seeded = false;

    if store.list_shows()?.is_empty() {
        for show in default_shows() {
            store.save_show(&show)?;
        }
        seeded = true;
    }

    if store.list_reps()?.is_empty() {
        for rep in default_reps() {
            store.save_rep(&rep)?;
        }
        seeded = true;
    }

    if seeded {
        info!("event=seed_defaults module=repo status=ok");
    }
    Ok(seeded)
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
