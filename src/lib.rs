//! # pdf-index: index page generator for published lecture PDFs
//!
//! Builds the `index.html` of a static documentation site from the PDFs in
//! its published directory:
//!
//! - **Locate**: find each PDF's original location in the repository tree
//! - **Describe**: size, superseded-revision flag, last commit date, history link
//! - **Categorize**: group by original directory into ordered, named categories
//! - **Render**: fill a Handlebars template with the sanitized page config
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_index::{IndexPaths, IndexPipeline};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = IndexPipeline::new(IndexPaths::from_root(".")).run()?;
//!     println!("Indexed {} files", summary.file_count);
//!     Ok(())
//! }
//! ```

#![warn(unsafe_code)]
#![warn(clippy::all)]

pub mod core {
    //! Pipeline stages, configuration and error types.

    pub mod categorize;
    pub mod config;
    pub mod errors;
    pub mod file_utils;
    pub mod history;
    pub mod locator;
    pub mod metadata;
    pub mod pipeline;
    pub mod sanitize;
}

pub mod io {
    //! Page rendering.

    pub mod reports;
}

pub use crate::core::categorize::{categorize, Category, CategoryCatalog};
pub use crate::core::config::{IndexPaths, PageConfig};
pub use crate::core::errors::{IndexError, Result};
pub use crate::core::history::{GitHistory, HistoryProvider, NoHistory};
pub use crate::core::locator::FileLocator;
pub use crate::core::metadata::{format_size, is_old_version, FileRecord, MetadataExtractor};
pub use crate::core::pipeline::{BuildSummary, IndexPipeline};
pub use crate::core::sanitize::{sanitize_html, sanitize_style};
pub use crate::io::reports::IndexRenderer;
