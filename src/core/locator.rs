//! Finding where a published PDF originally lives in the repository.
//!
//! The repository is walked once, in file-name order, and every file whose
//! name matches a published PDF is indexed. Lookups are then plain map reads.
//! The output directory and VCS metadata directories are never searched, and
//! a symlink only counts when its target stays inside the root and outside
//! the output directory.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::file_utils::{confine_to_root, to_slash_path, VCS_DIR_NAMES};

/// Index from file name to candidate original locations.
#[derive(Debug, Default)]
pub struct FileLocator {
    candidates: HashMap<String, Vec<PathBuf>>,
}

impl FileLocator {
    /// Walk `repo_root`, skipping `output_dir`, and index every file named
    /// in `names`. Candidates are kept in traversal order.
    pub fn build<I, S>(repo_root: &Path, output_dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let wanted: HashSet<String> = names.into_iter().map(Into::into).collect();
        if wanted.is_empty() {
            return Self::default();
        }

        let root = match repo_root.canonicalize() {
            Ok(root) => root,
            Err(err) => {
                warn!(
                    "Cannot resolve repository root {}: {}; original locations unavailable",
                    repo_root.display(),
                    err
                );
                return Self::default();
            }
        };
        let excluded = output_dir.canonicalize().ok();

        let mut candidates: HashMap<String, Vec<PathBuf>> = HashMap::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry, excluded.as_deref()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry while searching originals: {}", err);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !wanted.contains(name.as_ref()) {
                continue;
            }

            let Some(resolved) = confine_to_root(&root, entry.path()) else {
                warn!(
                    "Ignoring candidate {} outside the repository root",
                    entry.path().display()
                );
                continue;
            };
            if excluded
                .as_deref()
                .is_some_and(|out| root.join(&resolved).starts_with(out))
            {
                debug!(
                    "Ignoring candidate {} that resolves into the output directory",
                    entry.path().display()
                );
                continue;
            }

            // Symlinks are recorded under their own location.
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            debug!("Candidate original for {}: {}", name, relative.display());
            candidates
                .entry(name.into_owned())
                .or_default()
                .push(relative.to_path_buf());
        }

        Self { candidates }
    }

    /// Repository-relative original path of `filename`.
    ///
    /// The first candidate in traversal order wins; when several exist the
    /// ambiguity is logged with every candidate.
    pub fn locate(&self, filename: &str) -> Option<&Path> {
        let found = self.candidates.get(filename)?;
        if found.len() > 1 {
            let listed: Vec<String> = found.iter().map(|p| to_slash_path(p)).collect();
            warn!(
                "Multiple originals found for {}: {}; using {}",
                filename,
                listed.join(", "),
                listed[0]
            );
        }
        found.first().map(PathBuf::as_path)
    }

    /// All candidates recorded for `filename`, in traversal order.
    pub fn candidates(&self, filename: &str) -> &[PathBuf] {
        self.candidates
            .get(filename)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn is_excluded_dir(entry: &DirEntry, output_dir: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if VCS_DIR_NAMES.contains(&name.as_ref()) {
        return true;
    }
    output_dir.is_some_and(|out| entry.path() == out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF-1.4").unwrap();
    }

    #[test]
    fn finds_original_outside_output_dir() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "docs/a.pdf");
        touch(root, "GeneralPhysics/a.pdf");

        let locator = FileLocator::build(root, &root.join("docs"), ["a.pdf"]);
        assert_eq!(
            locator.locate("a.pdf"),
            Some(Path::new("GeneralPhysics/a.pdf"))
        );
    }

    #[test]
    fn published_copy_alone_is_not_an_original() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "docs/b-v1.pdf");

        let locator = FileLocator::build(root, &root.join("docs"), ["b-v1.pdf"]);
        assert_eq!(locator.locate("b-v1.pdf"), None);
    }

    #[test]
    fn vcs_directories_are_skipped() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, ".git/objects/a.pdf");
        touch(root, ".hg/a.pdf");

        let locator = FileLocator::build(root, &root.join("docs"), ["a.pdf"]);
        assert_eq!(locator.locate("a.pdf"), None);
    }

    #[test]
    fn duplicates_resolve_in_file_name_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "Zeta/notes.pdf");
        touch(root, "Alpha/deep/notes.pdf");
        touch(root, "Beta/notes.pdf");

        let locator = FileLocator::build(root, &root.join("docs"), ["notes.pdf"]);
        assert_eq!(
            locator.locate("notes.pdf"),
            Some(Path::new("Alpha/deep/notes.pdf"))
        );
        assert_eq!(locator.candidates("notes.pdf").len(), 3);
    }

    #[test]
    fn root_level_original_is_found() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "syllabus.pdf");

        let locator = FileLocator::build(root, &root.join("docs"), ["syllabus.pdf"]);
        assert_eq!(locator.locate("syllabus.pdf"), Some(Path::new("syllabus.pdf")));
    }

    #[test]
    fn unrequested_names_are_not_indexed() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "GeneralPhysics/other.pdf");

        let locator = FileLocator::build(root, &root.join("docs"), ["a.pdf"]);
        assert!(locator.candidates("other.pdf").is_empty());
    }

    #[test]
    fn missing_root_yields_empty_locator() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("absent");

        let locator = FileLocator::build(&root, &root.join("docs"), ["a.pdf"]);
        assert_eq!(locator.locate("a.pdf"), None);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_escaping_the_root_are_ignored() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("repo");
        fs::create_dir_all(root.join("Linked")).unwrap();
        fs::write(outer.path().join("a.pdf"), b"x").unwrap();
        std::os::unix::fs::symlink(outer.path().join("a.pdf"), root.join("Linked").join("a.pdf"))
            .unwrap();

        let locator = FileLocator::build(&root, &root.join("docs"), ["a.pdf"]);
        assert_eq!(locator.locate("a.pdf"), None);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_recorded_under_their_own_directory() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "Shared/lecture.pdf");
        fs::create_dir_all(root.join("Mechanics")).unwrap();
        std::os::unix::fs::symlink(
            Path::new("..").join("Shared").join("lecture.pdf"),
            root.join("Mechanics").join("a.pdf"),
        )
        .unwrap();

        let locator = FileLocator::build(root, &root.join("docs"), ["a.pdf"]);
        assert_eq!(locator.locate("a.pdf"), Some(Path::new("Mechanics/a.pdf")));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_into_the_output_directory_are_ignored() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(root, "docs/b.pdf");
        fs::create_dir_all(root.join("Linked")).unwrap();
        std::os::unix::fs::symlink(
            Path::new("..").join("docs").join("b.pdf"),
            root.join("Linked").join("b.pdf"),
        )
        .unwrap();

        let locator = FileLocator::build(root, &root.join("docs"), ["b.pdf"]);
        assert_eq!(locator.locate("b.pdf"), None);
    }
}
