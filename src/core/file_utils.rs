//! Path helpers shared by the locator and the history lookup.
//!
//! Anything that leaves this module as a repository-relative path has been
//! canonicalized and checked against the canonical repository root.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::core::errors::{IndexError, Result};

/// Version-control metadata directories never searched for originals.
pub const VCS_DIR_NAMES: &[&str] = &[".git", ".hg", ".svn"];

/// Top-level `*.pdf` files of the published directory, sorted by file name.
pub fn list_published_pdfs(docs_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.pdf",
        glob::Pattern::escape(&docs_dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern).map_err(|e| {
        IndexError::validation(format!(
            "Invalid docs directory pattern {pattern}: {e}"
        ))
    })?;

    let mut pdfs = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => pdfs.push(path),
            Ok(path) => debug!("Skipping non-file entry {}", path.display()),
            Err(err) => warn!("Could not read docs entry: {}", err),
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

/// Resolve `path` (absolute, or relative to `canonical_root`) and return it
/// relative to the root, or `None` if it escapes the root or cannot be
/// resolved. `canonical_root` must already be canonical.
pub fn confine_to_root(canonical_root: &Path, path: &Path) -> Option<PathBuf> {
    let candidate = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    let resolved = match candidate.canonicalize() {
        Ok(resolved) => resolved,
        Err(err) => {
            debug!("Could not resolve {}: {}", candidate.display(), err);
            return None;
        }
    };

    match resolved.strip_prefix(canonical_root) {
        Ok(relative) if relative.as_os_str().is_empty() => None,
        Ok(relative) => Some(relative.to_path_buf()),
        Err(_) => {
            warn!(
                "Path resolves outside the repository root: {} -> {}",
                path.display(),
                resolved.display()
            );
            None
        }
    }
}

/// Render a relative path with `/` separators, as used in URLs and pathspecs.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
