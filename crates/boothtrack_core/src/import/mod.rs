//! Spreadsheet import pipeline.
//!
//! # Responsibility
//! - Turn pasted/uploaded/fetched delimited text into a header + row table.
//! - Map spreadsheet columns onto a per-list field schema.
//! - Build booth or person records from mapped rows.
//!
//! # Invariants
//! - Column auto-detection is a first-match heuristic with no scoring.
//! - Required fields must be mapped before any record is built.
//!
//! Persistence (list replacement) is orchestrated by `ImportService`.

use crate::model::booth::BoothValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod delimited;
pub mod mapping;
pub mod records;
pub mod schema;
pub mod sheet;

pub use delimited::{parse_delimited, DelimitedTable};
pub use mapping::ColumnMapping;
pub use records::{build_booths, build_people, parse_sales};
pub use schema::{schema_for, FieldKey, FieldSpec, ImportTarget};
pub use sheet::{
    resolve_export_url, sheet_id_from_url, HttpSheetFetcher, SheetFetcher, DEFAULT_EXPORT_TEMPLATE,
};

pub type ImportResult<T> = Result<T, ImportError>;

/// Import failures; each one aborts only the current import attempt.
#[derive(Debug)]
pub enum ImportError {
    /// Input has no header row or no data rows.
    NoData,
    Parse(csv::Error),
    /// Required schema fields left unmapped (labels, schema order).
    MissingRequired(Vec<&'static str>),
    /// Field key is not part of the target schema.
    UnknownField(String),
    /// `--map` override names a header that is not in the sheet.
    UnknownHeader(String),
    ColumnOutOfRange {
        field: FieldKey,
        index: usize,
        columns: usize,
    },
    /// Rep selection does not fit the target list (personal vs shared).
    InvalidTarget(BoothValidationError),
    /// Every row lacked a required value.
    NoValidRows,
    InvalidSheetUrl(String),
    Fetch(String),
    Http(reqwest::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => write!(f, "no data found: need a header row and at least one data row"),
            Self::Parse(err) => write!(f, "could not parse delimited text: {err}"),
            Self::MissingRequired(labels) => {
                write!(f, "required fields are not mapped: {}", labels.join(", "))
            }
            Self::UnknownField(value) => write!(f, "unknown import field `{value}`"),
            Self::UnknownHeader(value) => write!(f, "no column named `{value}`"),
            Self::ColumnOutOfRange {
                field,
                index,
                columns,
            } => write!(
                f,
                "column {index} for {} is out of range (sheet has {columns} columns)",
                field.label()
            ),
            Self::InvalidTarget(err) => write!(f, "{err}"),
            Self::NoValidRows => write!(f, "no valid data found"),
            Self::InvalidSheetUrl(value) => write!(f, "invalid spreadsheet URL `{value}`"),
            Self::Fetch(message) => write!(f, "could not fetch sheet: {message}"),
            Self::Http(err) => write!(f, "could not fetch sheet: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Http(err) => Some(err),
            Self::InvalidTarget(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<BoothValidationError> for ImportError {
    fn from(value: BoothValidationError) -> Self {
        Self::InvalidTarget(value)
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}
