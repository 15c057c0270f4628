//! Last-modified dates from git history.
//!
//! Histories are read in-process with `git2`: commits are walked from `HEAD`
//! until one touches the requested path. Each walk has a deadline, and every
//! failure (no repository, path outside the root, no matching commit, timeout)
//! degrades to `None`.

use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{DiffOptions, Repository, Sort};
use tracing::{debug, warn};

use crate::core::file_utils::{confine_to_root, to_slash_path};

/// Source of last-commit dates for repository-relative paths.
pub trait HistoryProvider {
    /// Date (`YYYY-MM-DD`) of the most recent commit touching `relative_path`.
    fn last_commit_date(&self, relative_path: &Path) -> Option<String>;
}

/// Provider used when no history should be consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl HistoryProvider for NoHistory {
    fn last_commit_date(&self, _relative_path: &Path) -> Option<String> {
        None
    }
}

/// [`HistoryProvider`] backed by the git repository containing the root.
pub struct GitHistory {
    repo: Option<Repository>,
    repo_root: PathBuf,
    workdir: Option<PathBuf>,
    timeout: Duration,
}

impl GitHistory {
    /// Open the repository containing `root`. A missing repository is not an
    /// error; every lookup then returns `None`.
    pub fn open(root: &Path, timeout: Duration) -> Self {
        let repo_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        match Repository::discover(&repo_root) {
            Ok(repo) => {
                let workdir = repo.workdir().and_then(|path| path.canonicalize().ok());
                if workdir.is_none() {
                    warn!("Repository at {} has no working directory", repo_root.display());
                }
                Self {
                    repo: Some(repo),
                    repo_root,
                    workdir,
                    timeout,
                }
            }
            Err(err) => {
                warn!(
                    "No git repository found at {}: {}; commit dates unavailable",
                    repo_root.display(),
                    err.message()
                );
                Self {
                    repo: None,
                    repo_root,
                    workdir: None,
                    timeout,
                }
            }
        }
    }

    fn repo(&self) -> Option<&Repository> {
        self.repo.as_ref()
    }

    /// Confirm the path lies in the root and express it relative to the
    /// repository working directory. A symlink keeps its own location, so its
    /// history is the history of the link.
    fn pathspec_for(&self, relative_path: &Path) -> Option<String> {
        if !relative_path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }
        confine_to_root(&self.repo_root, relative_path)?;
        let absolute = self.repo_root.join(relative_path);
        let workdir = self.workdir.as_deref()?;
        let in_repo = absolute.strip_prefix(workdir).ok()?;
        Some(to_slash_path(in_repo))
    }

    fn newest_commit_touching(&self, pathspec: &str) -> Option<DateTime<FixedOffset>> {
        let repo = self.repo()?;
        let deadline = Instant::now() + self.timeout;

        let mut walker = repo.revwalk().ok()?;
        walker.set_sorting(Sort::TIME).ok()?;
        if walker.push_head().is_err() {
            debug!("Repository has no HEAD; no history for {}", pathspec);
            return None;
        }

        for oid in walker {
            if Instant::now() >= deadline {
                warn!(
                    "History lookup for {} exceeded {:?}; date unavailable",
                    pathspec, self.timeout
                );
                return None;
            }
            let oid = oid.ok()?;
            let commit = repo.find_commit(oid).ok()?;
            if commit_touches_path(repo, &commit, pathspec) {
                return Some(to_datetime(commit.time()));
            }
        }

        None
    }
}

impl HistoryProvider for GitHistory {
    fn last_commit_date(&self, relative_path: &Path) -> Option<String> {
        let Some(pathspec) = self.pathspec_for(relative_path) else {
            warn!(
                "Cannot confirm {} lies inside the repository; date unavailable",
                relative_path.display()
            );
            return None;
        };

        let date = self
            .newest_commit_touching(&pathspec)
            .map(|timestamp| timestamp.format("%Y-%m-%d").to_string());
        if date.is_none() {
            debug!("No commit history for {}", pathspec);
        }
        date
    }
}

fn commit_touches_path(repo: &Repository, commit: &git2::Commit<'_>, pathspec: &str) -> bool {
    let mut diff_opts = DiffOptions::new();
    diff_opts.pathspec(pathspec);
    diff_opts.disable_pathspec_match(true);

    let tree = match commit.tree() {
        Ok(tree) => tree,
        Err(_) => return false,
    };

    if commit.parent_count() == 0 {
        return repo
            .diff_tree_to_tree(None, Some(&tree), Some(&mut diff_opts))
            .map(|diff| diff.deltas().next().is_some())
            .unwrap_or(false);
    }

    // Like `git log`, a merge only counts when it differs from every parent.
    commit.parents().all(|parent| {
        parent
            .tree()
            .ok()
            .and_then(|parent_tree| {
                repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), Some(&mut diff_opts))
                    .ok()
            })
            .map(|diff| diff.deltas().next().is_some())
            .unwrap_or(false)
    })
}

fn to_datetime(time: git2::Time) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::from_timestamp(time.seconds(), 0)
        .unwrap_or_default()
        .with_timezone(&offset)
}
