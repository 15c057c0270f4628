//! The index build: locate, describe, categorize, render.
//!
//! ```text
//! docs/*.pdf ──► FileLocator ──► MetadataExtractor ──► categorize ──► IndexRenderer ──► docs/index.html
//!                    │                  │
//!               repository walk     git history
//! ```
//!
//! All inputs are checked and the template is compiled before any file is
//! examined, so a fatal error never leaves a partial page behind.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::categorize::{categorize, Category, CategoryCatalog};
use crate::core::config::{IndexPaths, PageConfig, DEFAULT_HISTORY_TIMEOUT};
use crate::core::errors::Result;
use crate::core::file_utils::list_published_pdfs;
use crate::core::history::{GitHistory, HistoryProvider};
use crate::core::locator::FileLocator;
use crate::core::metadata::{FileRecord, MetadataExtractor};
use crate::io::reports::IndexRenderer;

/// What a completed build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_file: PathBuf,
    pub file_count: usize,
    pub category_count: usize,
    /// Files whose original location could not be found
    pub unlocated: usize,
    /// Files without a commit date
    pub undated: usize,
}

/// One run of the index build.
#[derive(Debug, Clone)]
pub struct IndexPipeline {
    paths: IndexPaths,
    history_timeout: Duration,
}

impl IndexPipeline {
    pub fn new(paths: IndexPaths) -> Self {
        Self {
            paths,
            history_timeout: DEFAULT_HISTORY_TIMEOUT,
        }
    }

    pub fn with_history_timeout(mut self, timeout: Duration) -> Self {
        self.history_timeout = timeout;
        self
    }

    /// Run against the git repository containing the root.
    pub fn run(&self) -> Result<BuildSummary> {
        self.paths.ensure_inputs_exist()?;
        let history = GitHistory::open(&self.paths.repo_root, self.history_timeout);
        self.build(&history)
    }

    /// Run with an explicit history source.
    pub fn run_with_history<H: HistoryProvider>(&self, history: &H) -> Result<BuildSummary> {
        self.paths.ensure_inputs_exist()?;
        self.build(history)
    }

    fn build<H: HistoryProvider>(&self, history: &H) -> Result<BuildSummary> {
        let config = PageConfig::from_yaml_file(&self.paths.config_file)?.sanitized();
        let renderer = IndexRenderer::from_template_file(&self.paths.template_file)?;

        let categories = self.collect(&config, history)?;
        renderer.render_to_path(&config, &categories, &self.paths.output_file)?;

        let records = categories.iter().flat_map(|c| c.files.iter());
        let summary = BuildSummary {
            output_file: self.paths.output_file.clone(),
            file_count: records.clone().count(),
            category_count: categories.len(),
            unlocated: records.clone().filter(|f| f.original_path.is_none()).count(),
            undated: records.filter(|f| f.last_commit_date.is_none()).count(),
        };
        info!(
            "Indexed {} file(s) in {} categor{}",
            summary.file_count,
            summary.category_count,
            if summary.category_count == 1 { "y" } else { "ies" }
        );
        Ok(summary)
    }

    /// Locate, describe and categorize every published PDF.
    pub fn collect<H: HistoryProvider>(
        &self,
        config: &PageConfig,
        history: &H,
    ) -> Result<Vec<Category>> {
        let published = list_published_pdfs(&self.paths.docs_dir)?;
        debug!(
            "Found {} published PDF(s) in {}",
            published.len(),
            self.paths.docs_dir.display()
        );

        let names = published
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned());
        let locator = FileLocator::build(&self.paths.repo_root, &self.paths.docs_dir, names);

        let extractor =
            MetadataExtractor::new(&locator, history, &config.github_repo, &config.branch);
        let records = published
            .iter()
            .map(|path| extractor.extract(path))
            .collect::<Result<Vec<FileRecord>>>()?;

        let catalog = CategoryCatalog::builtin().with_overrides(&config.categories);
        Ok(categorize(records, &catalog))
    }
}
