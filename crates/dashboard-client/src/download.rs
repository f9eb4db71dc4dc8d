//! Contract download: filename derivation and saving to disk.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w]+").unwrap();
    // Matches both quoted and bare filename parameters.
    static ref DISPOSITION_FILENAME: Regex =
        Regex::new(r#"filename\s*=\s*(?:"([^"]+)"|([^;\s]+))"#).unwrap();
}

/// Collapse every run of non-word characters in a quote number to a
/// single hyphen, so "Q-123/ABC" becomes "Q-123-ABC".
pub fn sanitize_quote_number(raw: &str) -> String {
    NON_WORD
        .replace_all(raw, "-")
        .trim_matches('-')
        .to_string()
}

/// Default filename when upstream supplies none:
/// `contract-<number>-<UTC timestamp>.pdf`.
pub fn default_filename(quote_number: &str, now: DateTime<Utc>) -> String {
    format!(
        "contract-{}-{}.pdf",
        sanitize_quote_number(quote_number),
        now.format("%Y%m%d%H%M%S")
    )
}

/// Filename from a `Content-Disposition` header, when present. Takes
/// precedence over the derived default.
pub fn disposition_filename(header: &str) -> Option<String> {
    DISPOSITION_FILENAME.captures(header).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// A fetched contract PDF plus the name it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedContract {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DownloadedContract {
    /// Resolve the filename: header value first, derived default
    /// otherwise.
    pub fn named(
        bytes: Vec<u8>,
        disposition: Option<&str>,
        quote_number: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let filename = disposition
            .and_then(disposition_filename)
            .unwrap_or_else(|| default_filename(quote_number, now));
        Self { filename, bytes }
    }

    /// Write the PDF into `dir` and return the final path.
    pub async fn save_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}
