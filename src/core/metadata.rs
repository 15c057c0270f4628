//! Per-file display metadata.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::core::categorize::directory_key;
use crate::core::errors::{IndexError, Result};
use crate::core::file_utils::to_slash_path;
use crate::core::history::HistoryProvider;
use crate::core::locator::FileLocator;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// One published PDF as shown on the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub filename: String,
    /// Percent-encoded link to the published file, relative to the page
    pub href: String,
    /// Human-readable size, e.g. `1.5KB`
    pub size: String,
    pub size_bytes: u64,
    /// Filename marks a superseded revision (`-v<digit>`)
    pub is_old_version: bool,
    /// `YYYY-MM-DD` of the newest commit touching the original
    pub last_commit_date: Option<String>,
    pub github_history_url: String,
    /// Category key
    pub directory: String,
    /// Repository-relative original location, `/`-separated
    pub original_path: Option<String>,
}

/// Format a byte count with the largest unit that keeps the value below 1024.
///
/// Bytes are printed as integers, every other unit with one decimal. TB is
/// the last unit; larger sizes stay in TB.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{}{}", bytes, SIZE_UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && round_tenth(value) >= 1024.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", value, SIZE_UNITS[unit])
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether `filename` contains `-v` immediately followed by a digit.
pub fn is_old_version(filename: &str) -> bool {
    filename
        .as_bytes()
        .windows(3)
        .any(|w| w[0] == b'-' && w[1] == b'v' && w[2].is_ascii_digit())
}

/// Commit-history URL on GitHub for a repository-relative path.
pub fn history_url(github_repo: &str, branch: &str, path: &str) -> String {
    format!("https://github.com/{github_repo}/commits/{branch}/{path}")
}

/// Relative link to a file next to the page, with every character that is
/// not valid in a URL path segment percent-encoded.
pub fn relative_href(filename: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return filename.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(filename);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Builds [`FileRecord`]s from published files.
pub struct MetadataExtractor<'a, H: HistoryProvider> {
    locator: &'a FileLocator,
    history: &'a H,
    github_repo: &'a str,
    branch: &'a str,
}

impl<'a, H: HistoryProvider> MetadataExtractor<'a, H> {
    pub fn new(locator: &'a FileLocator, history: &'a H, github_repo: &'a str, branch: &'a str) -> Self {
        Self {
            locator,
            history,
            github_repo,
            branch,
        }
    }

    /// Describe the published file at `published`.
    ///
    /// Only reading the published file's size can fail; locating the original
    /// and reading its history degrade to defaults.
    pub fn extract(&self, published: &Path) -> Result<FileRecord> {
        let filename = published
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                IndexError::validation(format!("Not a file path: {}", published.display()))
            })?;

        let size_bytes = fs::metadata(published)
            .map_err(|e| {
                IndexError::io(format!("Failed to read metadata of {}", published.display()), e)
            })?
            .len();

        let original = self.locator.locate(&filename);
        if original.is_none() {
            warn!("Original location of {} not found; filing under fallback", filename);
        }

        let last_commit_date = original.and_then(|path| self.history.last_commit_date(path));
        let original_path = original.map(to_slash_path);
        let url_path = original_path.as_deref().unwrap_or(&filename);
        let github_history_url = history_url(self.github_repo, self.branch, url_path);
        let directory = directory_key(original);

        debug!(
            "{}: {} bytes, directory {}, last commit {:?}",
            filename, size_bytes, directory, last_commit_date
        );

        Ok(FileRecord {
            href: relative_href(&filename),
            size: format_size(size_bytes),
            size_bytes,
            is_old_version: is_old_version(&filename),
            last_commit_date,
            github_history_url,
            directory,
            original_path,
            filename,
        })
    }
}
