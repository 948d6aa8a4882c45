//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the CLI decoupled from storage backends.
//!
//! Services borrow a [`Store`](crate::repo::Store) so several of them can
//! share one backend within a single command.

use crate::import::ImportError;
use crate::model::booth::{BoothId, BoothValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod admin_service;
pub mod import_service;
pub mod lead_service;
pub mod report_service;

pub use admin_service::AdminService;
pub use import_service::{ImportRequest, ImportService, ImportSummary, PendingImport};
pub use lead_service::LeadService;
pub use report_service::{DashboardStats, RepStats, ReportService, EXPORT_HEADERS};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for every use-case in this module.
#[derive(Debug)]
pub enum ServiceError {
    /// Target entity does not exist.
    NotFound { entity: &'static str, id: String },
    /// A rep with the same slug id already exists.
    RepAlreadyExists(String),
    /// Free-form user input rejected before touching storage.
    InvalidInput(String),
    /// Picker value outside its catalog.
    UnknownOption { field: &'static str, value: String },
    /// Claims only copy records out of shared lists.
    NotClaimable(BoothId),
    /// Business card is not an image.
    InvalidCard(String),
    /// CSV writer failure.
    Export(String),
    Validation(BoothValidationError),
    Import(ImportError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::RepAlreadyExists(id) => write!(f, "rep `{id}` already exists"),
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::UnknownOption { field, value } => {
                write!(f, "`{value}` is not a valid {field} option")
            }
            Self::NotClaimable(id) => {
                write!(f, "booth {id} is on a personal list and cannot be claimed")
            }
            Self::InvalidCard(message) => write!(f, "invalid business card: {message}"),
            Self::Export(message) => write!(f, "export failed: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "import failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<BoothValidationError> for ServiceError {
    fn from(value: BoothValidationError) -> Self {
        Self::Validation(value)
    }
}

pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> ServiceError {
    ServiceError::NotFound {
        entity,
        id: id.to_string(),
    }
}
