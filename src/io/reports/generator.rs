//! Page rendering with template engine support.
//!
//! The template receives one context object:
//!
//! - `config`: the sanitized [`PageConfig`]; `welcome_message`, `footer` and
//!   `license` are safe to emit with triple braces
//! - `categories`: ordered list of categories, each with `key`, `name`,
//!   `description`, `order` and `files` (every file's metadata)
//! - `file_count`, `category_count`

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::info;

use super::error::ReportError;
use super::helpers::register_helpers;
use super::templates::{load_index_template, INDEX_TEMPLATE_NAME};
use crate::core::categorize::Category;
use crate::core::config::PageConfig;

/// Data handed to the page template.
#[derive(Debug, Serialize)]
struct PageContext<'a> {
    config: &'a PageConfig,
    categories: &'a [Category],
    file_count: usize,
    category_count: usize,
}

impl<'a> PageContext<'a> {
    fn new(config: &'a PageConfig, categories: &'a [Category]) -> Self {
        Self {
            config,
            categories,
            file_count: categories.iter().map(|c| c.files.len()).sum(),
            category_count: categories.len(),
        }
    }
}

#[derive(Debug)]
pub struct IndexRenderer {
    handlebars: Handlebars<'static>,
}

impl IndexRenderer {
    /// Compile the page template at `template_file` (plus sibling partials).
    pub fn from_template_file<P: AsRef<Path>>(template_file: P) -> Result<Self, ReportError> {
        let mut handlebars = Handlebars::new();
        register_helpers(&mut handlebars);
        load_index_template(&mut handlebars, template_file.as_ref())?;
        Ok(Self { handlebars })
    }

    /// Compile a page template given as a string.
    pub fn from_template_str(template: &str) -> Result<Self, ReportError> {
        let mut handlebars = Handlebars::new();
        register_helpers(&mut handlebars);
        handlebars.register_template_string(INDEX_TEMPLATE_NAME, template)?;
        Ok(Self { handlebars })
    }

    /// Render the page. `config` must already be sanitized.
    pub fn render(&self, config: &PageConfig, categories: &[Category]) -> Result<String, ReportError> {
        let context = PageContext::new(config, categories);
        Ok(self.handlebars.render(INDEX_TEMPLATE_NAME, &context)?)
    }

    /// Render the page and write it to `output_path`.
    pub fn render_to_path<P: AsRef<Path>>(
        &self,
        config: &PageConfig,
        categories: &[Category],
        output_path: P,
    ) -> Result<(), ReportError> {
        let output_path = output_path.as_ref();
        let html = self.render(config, categories)?;
        fs::write(output_path, html).map_err(|source| ReportError::WriteOutput {
            path: output_path.to_path_buf(),
            source,
        })?;
        info!("Wrote {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::FileRecord;
    use tempfile::tempdir;

    fn file(filename: &str, directory: &str, date: Option<&str>) -> FileRecord {
        FileRecord {
            filename: filename.to_string(),
            href: filename.to_string(),
            size: "1.5KB".to_string(),
            size_bytes: 1500,
            is_old_version: filename.contains("-v1"),
            last_commit_date: date.map(str::to_string),
            github_history_url: format!("https://github.com/o/r/commits/main/{filename}"),
            directory: directory.to_string(),
            original_path: None,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                key: "GeneralPhysics".to_string(),
                name: "General Physics".to_string(),
                description: "Course notes".to_string(),
                order: 1,
                files: vec![file("a.pdf", "GeneralPhysics", Some("2024-01-02"))],
            },
            Category {
                key: "Other".to_string(),
                name: "Other Resources".to_string(),
                description: "Misc".to_string(),
                order: 99,
                files: vec![file("b-v1.pdf", "Other", None)],
            },
        ]
    }

    const TEMPLATE: &str = "{{config.title}}|{{{config.welcome_message}}}|{{file_count}}/{{category_count}}\n\
{{#each categories}}[{{name}}:{{#each files}}{{filename}}({{size}}{{#if is_old_version}},old{{/if}}{{#if last_commit_date}},{{last_commit_date}}{{/if}}){{/each}}]{{/each}}";

    #[test]
    fn renders_categories_in_given_order() {
        let renderer = IndexRenderer::from_template_str(TEMPLATE).unwrap();
        let config = PageConfig {
            title: "Notes".to_string(),
            welcome_message: "<a href=\"https://x.org\">Hi</a>".to_string(),
            ..PageConfig::default()
        };

        let html = renderer.render(&config, &categories()).unwrap();
        assert_eq!(
            html,
            "Notes|<a href=\"https://x.org\">Hi</a>|2/2\n\
[General Physics:a.pdf(1.5KB,2024-01-02)][Other Resources:b-v1.pdf(1.5KB,old)]"
        );
    }

    #[test]
    fn double_braces_escape_plain_fields() {
        let renderer = IndexRenderer::from_template_str("{{config.title}}").unwrap();
        let config = PageConfig {
            title: "<b>Notes</b>".to_string(),
            ..PageConfig::default()
        };
        assert_eq!(
            renderer.render(&config, &[]).unwrap(),
            "&lt;b&gt;Notes&lt;/b&gt;"
        );
    }

    #[test]
    fn render_to_path_writes_file() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("index.html.hbs");
        std::fs::write(&template, "{{#each categories}}{{key}};{{/each}}").unwrap();
        let output = temp.path().join("index.html");

        let renderer = IndexRenderer::from_template_file(&template).unwrap();
        renderer
            .render_to_path(&PageConfig::default(), &categories(), &output)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "GeneralPhysics;Other;");
    }

    #[test]
    fn unwritable_output_names_the_target() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("missing-dir").join("index.html");

        let renderer = IndexRenderer::from_template_str("{{file_count}}").unwrap();
        let err = renderer
            .render_to_path(&PageConfig::default(), &categories(), &output)
            .unwrap_err();
        assert!(matches!(err, ReportError::WriteOutput { ref path, .. } if *path == output));
        assert!(!output.exists());
    }
}
