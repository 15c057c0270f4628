//! Rendering the index page from a Handlebars template.

mod error;
mod generator;
mod helpers;
mod templates;

pub use error::ReportError;
pub use generator::IndexRenderer;
pub use templates::INDEX_TEMPLATE_NAME;
