//! Spreadsheet column to schema field mapping.
//!
//! # Invariants
//! - Auto-detection walks the schema in order; for each field the first
//!   header (in sheet order) containing any synonym wins.
//! - One column may feed several fields; nothing is "consumed".
//! - Every mapped index is within the header width.

use crate::import::schema::{FieldKey, FieldSpec};
use crate::import::{ImportError, ImportResult};
use std::collections::BTreeMap;

/// Field-to-column assignment for one pending import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    schema: &'static [FieldSpec],
    columns: BTreeMap<FieldKey, usize>,
    header_count: usize,
}

impl ColumnMapping {
    /// Empty mapping: every field skipped.
    pub fn empty(schema: &'static [FieldSpec], header_count: usize) -> Self {
        Self {
            schema,
            columns: BTreeMap::new(),
            header_count,
        }
    }

    /// Guesses columns from header names via case-insensitive substring
    /// matching against each field's synonyms. Unmatched fields stay skipped.
    pub fn auto_detect(headers: &[String], schema: &'static [FieldSpec]) -> Self {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let mut mapping = Self::empty(schema, headers.len());

        for spec in schema {
            let synonyms = spec.key.synonyms();
            let found = lowered
                .iter()
                .position(|header| synonyms.iter().any(|synonym| header.contains(synonym)));
            if let Some(index) = found {
                mapping.columns.insert(spec.key, index);
            }
        }
        mapping
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        self.schema
    }

    pub fn get(&self, key: FieldKey) -> Option<usize> {
        self.columns.get(&key).copied()
    }

    /// Assigns (`Some`) or skips (`None`) a column for `key`.
    pub fn set(&mut self, key: FieldKey, column: Option<usize>) -> ImportResult<()> {
        if !self.schema.iter().any(|spec| spec.key == key) {
            return Err(ImportError::UnknownField(key.as_str().to_string()));
        }
        match column {
            Some(index) if index >= self.header_count => Err(ImportError::ColumnOutOfRange {
                field: key,
                index,
                columns: self.header_count,
            }),
            Some(index) => {
                self.columns.insert(key, index);
                Ok(())
            }
            None => {
                self.columns.remove(&key);
                Ok(())
            }
        }
    }

    /// Applies a `field=header` override. An empty header skips the field.
    pub fn set_by_header(&mut self, field: &str, header: &str, headers: &[String]) -> ImportResult<()> {
        let key = FieldKey::parse(field).ok_or_else(|| ImportError::UnknownField(field.to_string()))?;
        let header = header.trim();
        if header.is_empty() {
            return self.set(key, None);
        }
        let index = headers
            .iter()
            .position(|candidate| candidate.trim().eq_ignore_ascii_case(header))
            .ok_or_else(|| ImportError::UnknownHeader(header.to_string()))?;
        self.set(key, Some(index))
    }

    /// Labels of required fields still skipped, in schema order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.schema
            .iter()
            .filter(|spec| spec.required && !self.columns.contains_key(&spec.key))
            .map(FieldSpec::label)
            .collect()
    }

    /// Gate for confirmation: every required field must be mapped.
    pub fn validate(&self) -> ImportResult<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingRequired(missing))
        }
    }

    /// Mapped `(field, column)` pairs in schema order.
    pub fn assignments(&self) -> Vec<(FieldSpec, Option<usize>)> {
        self.schema
            .iter()
            .map(|spec| (*spec, self.get(spec.key)))
            .collect()
    }
}
