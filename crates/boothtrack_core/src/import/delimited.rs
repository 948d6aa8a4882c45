//! Quote-aware tab/comma text parsing.
//!
//! # Invariants
//! - Delimiter is detected from the header line: comma only when the header
//!   has commas and no tab, tab otherwise (a single column is never split).
//! - Cells are trimmed; rows are padded to the header width. Non-empty cells
//!   past the header width are dropped with a warning.
//! - Blank rows are dropped.

use crate::import::{ImportError, ImportResult};
use csv::{ReaderBuilder, Trim};
use log::warn;

/// Parsed spreadsheet: one header row plus data rows of equal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: u8,
}

impl DelimitedTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Parses pasted or downloaded sheet text.
///
/// # Errors
/// - `NoData` when the text has no header or no non-blank data row.
/// - `Parse` when the CSV reader rejects the input (e.g. invalid UTF-8).
pub fn parse_delimited(text: &str) -> ImportResult<DelimitedTable> {
    let trimmed = text.trim_matches(|c| c == '\n' || c == '\r' || c == ' ');
    let header_line = trimmed.lines().next().unwrap_or_default();
    if header_line.trim().is_empty() {
        return Err(ImportError::NoData);
    }
    let delimiter = detect_delimiter(header_line);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(trimmed.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(ImportError::NoData),
    };

    let width = headers.len();
    let mut rows = Vec::new();
    let mut overflowing_rows = 0usize;
    for record in records {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.iter().skip(width).any(|cell| !cell.is_empty()) {
            overflowing_rows += 1;
        }
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ImportError::NoData);
    }
    if overflowing_rows > 0 {
        warn!(
            "event=delimited_parse module=import status=truncated rows={overflowing_rows} columns={width}"
        );
    }

    Ok(DelimitedTable {
        headers,
        rows,
        delimiter,
    })
}

fn detect_delimiter(header_line: &str) -> u8 {
    if !header_line.contains('\t') && header_line.contains(',') {
        b','
    } else {
        b'\t'
    }
}

#[cfg(test)]
mod tests {
    use super::parse_delimited;
    use crate::import::ImportError;

    #[test]
    fn tab_delimited_paste_is_detected() {
        let table = parse_delimited("Company\tBooth\nAcme\t101\nGlobex\t202\n").unwrap();
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.headers, vec!["Company", "Booth"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Globex", "202"]);
    }

    #[test]
    fn comma_delimited_honors_quotes() {
        let text = "Company,Est Monthly Sales,Notes\n\"Acme, Inc.\",\"$1,200\",\"said \"\"hi\"\"\"\n";
        let table = parse_delimited(text).unwrap();
        assert_eq!(table.delimiter, b',');
        assert_eq!(table.rows[0][0], "Acme, Inc.");
        assert_eq!(table.rows[0][1], "$1,200");
        assert_eq!(table.rows[0][2], "said \"hi\"");
    }

    #[test]
    fn short_rows_are_padded_and_blank_rows_dropped() {
        let table = parse_delimited("A\tB\tC\n x \n\n\t\t\nlast\t2\t3").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["x", "", ""]);
        assert_eq!(table.rows[1], vec!["last", "2", "3"]);
    }

    #[test]
    fn header_only_input_has_no_data() {
        assert!(matches!(
            parse_delimited("Company\tBooth\n"),
            Err(ImportError::NoData)
        ));
        assert!(matches!(parse_delimited("   \n"), Err(ImportError::NoData)));
    }

    #[test]
    fn single_column_paste_keeps_commas_in_cells() {
        let table = parse_delimited("Company Name\nAcme, Inc.\nGlobex\n").unwrap();
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.headers, vec!["Company Name"]);
        assert_eq!(table.rows, vec![vec!["Acme, Inc."], vec!["Globex"]]);
    }

    #[test]
    fn cells_past_the_header_width_are_dropped() {
        let table = parse_delimited("Company\tBooth\nAcme\t1\textra\nGlobex\t2\t\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows, vec![vec!["Acme", "1"], vec!["Globex", "2"]]);
    }
}
