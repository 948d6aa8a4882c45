//! Core domain logic for boothtrack, a trade-show lead tracker.
//! Every invariant about shows, reps, booths and imports lives here; the
//! CLI only parses arguments and renders view models.

pub mod config;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{AppConfig, ConfigError, StorageBackend};
pub use db::{open_db, open_db_in_memory, DbError};
pub use import::{ImportError, ImportTarget};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::booth::{Booth, BoothId, BoothValidationError, LeadStatus, ListType};
pub use model::person::Person;
pub use model::rep::Rep;
pub use model::show::Show;
pub use repo::{seed_defaults, KvStore, RepoError, RepoResult, SqliteStore, Store};
pub use service::{
    AdminService, ImportRequest, ImportService, LeadService, ReportService, ServiceError,
    ServiceResult,
};
pub use view::AppState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
