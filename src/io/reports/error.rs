use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while compiling templates or writing the page.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    pub(super) fn read_template(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadTemplate {
            path: path.into(),
            source,
        }
    }
}
