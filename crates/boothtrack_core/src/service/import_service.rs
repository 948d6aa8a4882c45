//! Spreadsheet import use-cases.
//!
//! # Responsibility
//! - Parse sheet text into a pending import with an auto-detected mapping.
//! - Confirm a pending import by replacing the target list wholesale.
//!
//! # Invariants
//! - Nothing is written until every required field is mapped and at least
//!   one row carries all required values.
//! - Re-importing a `(show, rep, list)` key replaces its records; other
//!   keys are untouched.

use crate::import::{
    build_booths, build_people, parse_delimited, resolve_export_url, ColumnMapping,
    DelimitedTable, ImportError, ImportResult, ImportTarget, SheetFetcher,
};
use crate::model::booth::validate_rep_for_list;
use crate::repo::Store;
use crate::service::{not_found, ServiceError, ServiceResult};
use log::info;

/// Parsed sheet awaiting mapping confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImport {
    pub target: ImportTarget,
    pub table: DelimitedTable,
    pub mapping: ColumnMapping,
}

impl PendingImport {
    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    /// Applies one `field=header` override to the detected mapping.
    pub fn override_column(&mut self, field: &str, header: &str) -> ImportResult<()> {
        self.mapping
            .set_by_header(field, header, &self.table.headers)
    }
}

/// Where a confirmed import lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub show_id: String,
    /// Required for hit lists, absent for shared lists and people.
    pub rep_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub target: ImportTarget,
    pub imported: usize,
    /// Records removed from the replaced list.
    pub replaced: usize,
}

pub struct ImportService<'s, S: Store> {
    store: &'s S,
}

impl<'s, S: Store> ImportService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Parses pasted/uploaded text and auto-detects the column mapping.
    pub fn preview(&self, text: &str, target: ImportTarget) -> ServiceResult<PendingImport> {
        let table = parse_delimited(text)?;
        let mapping = ColumnMapping::auto_detect(&table.headers, target.schema());
        info!(
            "event=import_preview module=service status=ok target={} columns={} rows={}",
            target.label(),
            table.column_count(),
            table.rows.len()
        );
        Ok(PendingImport {
            target,
            table,
            mapping,
        })
    }

    /// Downloads a shared sheet and previews it.
    pub fn fetch_sheet(
        &self,
        url: &str,
        export_template: &str,
        fetcher: &dyn SheetFetcher,
        target: ImportTarget,
    ) -> ServiceResult<PendingImport> {
        let export_url = resolve_export_url(url, export_template)?;
        let text = fetcher.fetch_text(&export_url)?;
        self.preview(&text, target)
    }

    /// Writes a pending import, replacing the target list.
    pub fn confirm(
        &self,
        pending: &PendingImport,
        request: &ImportRequest,
    ) -> ServiceResult<ImportSummary> {
        pending.mapping.validate()?;
        if self.store.get_show(&request.show_id)?.is_none() {
            return Err(not_found("show", &request.show_id));
        }

        let rep_id = request.rep_id.as_deref();
        let (imported, replaced) = match pending.target {
            ImportTarget::Booths(list_type) => {
                validate_rep_for_list(list_type, rep_id)?;
                if let Some(rep_id) = rep_id {
                    if self.store.get_rep(rep_id)?.is_none() {
                        return Err(not_found("rep", rep_id));
                    }
                }

                let booths = build_booths(
                    &pending.table,
                    &pending.mapping,
                    &request.show_id,
                    rep_id,
                    list_type,
                )?;
                if booths.is_empty() {
                    return Err(ImportError::NoValidRows.into());
                }
                let replaced =
                    self.store
                        .replace_list(&request.show_id, rep_id, list_type, &booths)?;
                (booths.len(), replaced)
            }
            ImportTarget::People => {
                if rep_id.is_some() {
                    return Err(ServiceError::InvalidInput(
                        "people are shared per show and cannot be imported for a rep".to_string(),
                    ));
                }

                let people = build_people(&pending.table, &pending.mapping, &request.show_id)?;
                if people.is_empty() {
                    return Err(ImportError::NoValidRows.into());
                }
                let replaced = self.store.replace_people(&request.show_id, &people)?;
                (people.len(), replaced)
            }
        };

        info!(
            "event=import_confirm module=service status=ok target={} imported={imported} replaced={replaced}",
            pending.target.label()
        );
        Ok(ImportSummary {
            target: pending.target,
            imported,
            replaced,
        })
    }
}
