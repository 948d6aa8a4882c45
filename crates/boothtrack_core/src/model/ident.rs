//! Identifier and domain normalization helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9+.-]*://").expect("valid scheme regex"));

/// Lowercases a display name and collapses whitespace runs into `_`.
pub fn slugify(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim().to_lowercase().as_str(), "_")
        .into_owned()
}

/// Reduces a website/URL/domain cell to its bare host.
///
/// `https://www.Acme.com/shop/` -> `acme.com`
pub fn normalize_domain(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let without_scheme = SCHEME_RE.replace(lowered.as_str(), "");
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.trim_end_matches('.').to_string()
}
