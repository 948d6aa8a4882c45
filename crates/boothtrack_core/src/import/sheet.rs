//! Published spreadsheet URL handling and download.

use crate::import::{ImportError, ImportResult};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static SHEET_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("valid sheet id regex"));

/// Tab-separated export of a shared Google Sheet; `{id}` is substituted.
pub const DEFAULT_EXPORT_TEMPLATE: &str =
    "https://docs.google.com/spreadsheets/d/{id}/export?format=tsv";

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Extracts the document id from a spreadsheet URL.
pub fn sheet_id_from_url(url: &str) -> Option<&str> {
    SHEET_ID_RE
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Turns a pasted sheet link into a downloadable export URL.
///
/// Links that are already published exports (`/pub?` or `output=`) are
/// used as-is; editor links are rewritten through `template`.
pub fn resolve_export_url(input: &str, template: &str) -> ImportResult<String> {
    let url = input.trim();
    if url.is_empty() {
        return Err(ImportError::InvalidSheetUrl(input.to_string()));
    }
    if url.starts_with("http") && (url.contains("/pub?") || url.contains("output=")) {
        return Ok(url.to_string());
    }
    let id = sheet_id_from_url(url).ok_or_else(|| ImportError::InvalidSheetUrl(url.to_string()))?;
    Ok(template.replace("{id}", id))
}

/// Downloads sheet text. Abstracted so imports can be tested offline.
pub trait SheetFetcher {
    fn fetch_text(&self, url: &str) -> ImportResult<String>;
}

/// Blocking HTTP fetcher.
pub struct HttpSheetFetcher {
    client: reqwest::blocking::Client,
}

impl HttpSheetFetcher {
    pub fn new() -> ImportResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("boothtrack/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl SheetFetcher for HttpSheetFetcher {
    fn fetch_text(&self, url: &str) -> ImportResult<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("event=sheet_fetch module=import status=error http_status={}", status.as_u16());
            return Err(ImportError::Fetch(format!(
                "server answered {status}; make sure the sheet is publicly accessible"
            )));
        }
        let text = response.text()?;
        info!("event=sheet_fetch module=import status=ok bytes={}", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_export_url, sheet_id_from_url, DEFAULT_EXPORT_TEMPLATE};
    use crate::import::ImportError;

    #[test]
    fn extracts_id_from_editor_links() {
        assert_eq!(
            sheet_id_from_url("https://docs.google.com/spreadsheets/d/1AbC-x_9/edit#gid=0"),
            Some("1AbC-x_9")
        );
        assert_eq!(sheet_id_from_url("https://example.com/file.csv"), None);
    }

    #[test]
    fn editor_links_become_tsv_exports() {
        let url = resolve_export_url(
            "https://docs.google.com/spreadsheets/d/abc123/edit?usp=sharing",
            DEFAULT_EXPORT_TEMPLATE,
        )
        .unwrap();
        assert_eq!(
            url,
            "https://docs.google.com/spreadsheets/d/abc123/export?format=tsv"
        );
    }

    #[test]
    fn published_links_are_kept() {
        let published = "https://docs.google.com/spreadsheets/d/e/2PACX/pub?output=tsv";
        assert_eq!(
            resolve_export_url(published, DEFAULT_EXPORT_TEMPLATE).unwrap(),
            published
        );
    }

    #[test]
    fn other_links_are_rejected() {
        assert!(matches!(
            resolve_export_url("https://example.com/sheet", DEFAULT_EXPORT_TEMPLATE),
            Err(ImportError::InvalidSheetUrl(_))
        ));
    }
}
