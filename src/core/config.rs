//! Page configuration and input locations.
//!
//! [`PageConfig`] is the YAML document site maintainers edit to change the
//! text and colors of the generated page. [`IndexPaths`] records where the
//! pipeline reads its inputs and writes its output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{IndexError, Result};
use crate::core::sanitize::{sanitize_html, sanitize_style};

/// Repository used for history links when the configuration names none.
pub const DEFAULT_GITHUB_REPO: &str = "misho104/LecturePublic";

/// Branch used for history links when the configuration names none.
pub const DEFAULT_BRANCH: &str = "main";

/// Default bound on a single history lookup, in seconds.
pub const DEFAULT_HISTORY_TIMEOUT_SECS: u64 = 5;

/// Default bound on a single history lookup.
pub const DEFAULT_HISTORY_TIMEOUT: Duration = Duration::from_secs(DEFAULT_HISTORY_TIMEOUT_SECS);

/// Site-wide display settings loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page title (plain text)
    pub title: String,
    /// Introductory paragraph; may contain links
    pub welcome_message: String,
    /// Footer text; may contain links
    pub footer: String,
    /// License notice; may contain links
    pub license: String,
    /// `owner/name` of the GitHub repository holding the sources
    pub github_repo: String,
    /// Branch used in history links
    pub branch: String,
    /// Inline style values
    pub style: StyleConfig,
    /// Per-directory category display overrides
    pub categories: BTreeMap<String, CategoryOverride>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Lecture Notes".to_string(),
            welcome_message: String::new(),
            footer: String::new(),
            license: String::new(),
            github_repo: DEFAULT_GITHUB_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            style: StyleConfig::default(),
            categories: BTreeMap::new(),
        }
    }
}

/// Optional color and font settings embedded in `style` attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
}

/// Display override for one directory key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOverride {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}

impl PageConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            IndexError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Validate fields that would produce broken links.
    pub fn validate(&self) -> Result<()> {
        let repo = self.github_repo.trim();
        let mut parts = repo.split('/');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !well_formed || repo.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
            return Err(IndexError::config_field(
                format!("github_repo must look like 'owner/name', got '{}'", self.github_repo),
                "github_repo",
            ));
        }

        if self.branch.trim().is_empty() {
            return Err(IndexError::config_field("branch must not be empty", "branch"));
        }

        Ok(())
    }

    /// Copy of this configuration with every embeddable field filtered.
    pub fn sanitized(&self) -> Self {
        let style = |value: &Option<String>| {
            value
                .as_deref()
                .map(sanitize_style)
                .filter(|v| !v.is_empty())
        };

        Self {
            title: self.title.clone(),
            welcome_message: sanitize_html(&self.welcome_message),
            footer: sanitize_html(&self.footer),
            license: sanitize_html(&self.license),
            github_repo: self.github_repo.trim().to_string(),
            branch: self.branch.trim().to_string(),
            style: StyleConfig {
                primary_color: style(&self.style.primary_color),
                background_color: style(&self.style.background_color),
                text_color: style(&self.style.text_color),
                font_family: style(&self.style.font_family),
            },
            categories: self.categories.clone(),
        }
    }
}

/// Where the pipeline reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    /// Repository root searched for original locations
    pub repo_root: PathBuf,
    /// Published directory holding the PDFs
    pub docs_dir: PathBuf,
    /// YAML page configuration
    pub config_file: PathBuf,
    /// Handlebars template
    pub template_file: PathBuf,
    /// Generated page
    pub output_file: PathBuf,
}

impl IndexPaths {
    /// Conventional layout below a repository root.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let docs_dir = root.join("docs");
        Self {
            repo_root: root.to_path_buf(),
            config_file: root.join(".github").join("page-config.yml"),
            template_file: root
                .join(".github")
                .join("templates")
                .join("index.html.hbs"),
            output_file: docs_dir.join("index.html"),
            docs_dir,
        }
    }

    /// Fail fast when a required input is absent.
    pub fn ensure_inputs_exist(&self) -> Result<()> {
        if !self.config_file.is_file() {
            return Err(IndexError::missing("Configuration file", &self.config_file));
        }
        if !self.template_file.is_file() {
            return Err(IndexError::missing("Template file", &self.template_file));
        }
        if !self.docs_dir.is_dir() {
            return Err(IndexError::missing("Docs directory", &self.docs_dir));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PageConfig::from_yaml_str("").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.github_repo, DEFAULT_GITHUB_REPO);
        assert_eq!(config.branch, "main");
    }

    #[test]
    fn partial_document_fills_missing_fields() {
        let config = PageConfig::from_yaml_str(
            r##"
title: Physics Lectures
style:
  primary_color: "#003366"
categories:
  QuantumMechanics:
    name: Quantum Mechanics
    order: 2
"##,
        )
        .unwrap();

        assert_eq!(config.title, "Physics Lectures");
        assert_eq!(config.github_repo, DEFAULT_GITHUB_REPO);
        assert_eq!(config.style.primary_color.as_deref(), Some("#003366"));
        let qm = &config.categories["QuantumMechanics"];
        assert_eq!(qm.name.as_deref(), Some("Quantum Mechanics"));
        assert_eq!(qm.order, Some(2));
        assert!(qm.description.is_none());
    }

    #[test]
    fn malformed_repo_is_rejected() {
        let err = PageConfig::from_yaml_str("github_repo: \"not a repo\"").unwrap_err();
        assert!(matches!(err, IndexError::Config { ref field, .. } if field.as_deref() == Some("github_repo")));

        let err = PageConfig::from_yaml_str("github_repo: a/b/c").unwrap_err();
        assert!(matches!(err, IndexError::Config { .. }));
    }

    #[test]
    fn invalid_yaml_is_a_serialization_error() {
        let err = PageConfig::from_yaml_str("title: [unterminated").unwrap_err();
        assert!(matches!(err, IndexError::Serialization { .. }));
    }

    #[test]
    fn sanitized_filters_html_and_style_fields() {
        let config = PageConfig {
            welcome_message: "<script>alert(1)</script>Welcome <a href=\"https://x.org\">here</a>"
                .to_string(),
            footer: "<a href=\"javascript:void(0)\">top</a>".to_string(),
            style: StyleConfig {
                primary_color: Some("red;}".to_string()),
                font_family: Some("();:".to_string()),
                ..StyleConfig::default()
            },
            ..PageConfig::default()
        };

        let clean = config.sanitized();
        assert_eq!(clean.welcome_message, "Welcome <a href=\"https://x.org\">here</a>");
        assert_eq!(clean.footer, "<a href=\"#\">top</a>");
        assert_eq!(clean.style.primary_color.as_deref(), Some("red"));
        assert_eq!(clean.style.font_family, None);
    }

    #[test]
    fn yaml_round_trip_through_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("page-config.yml");
        let config = PageConfig {
            title: "Notes".to_string(),
            ..PageConfig::default()
        };
        std::fs::write(&path, config.to_yaml_string().unwrap()).unwrap();

        assert_eq!(PageConfig::from_yaml_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let temp = tempdir().unwrap();
        let err = PageConfig::from_yaml_file(temp.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
    }

    #[test]
    fn ensure_inputs_exist_reports_first_missing_input() {
        let temp = tempdir().unwrap();
        let paths = IndexPaths::from_root(temp.path());

        let err = paths.ensure_inputs_exist().unwrap_err();
        assert!(err.to_string().starts_with("Configuration file not found"));

        std::fs::create_dir_all(paths.config_file.parent().unwrap()).unwrap();
        std::fs::write(&paths.config_file, "").unwrap();
        let err = paths.ensure_inputs_exist().unwrap_err();
        assert!(err.to_string().starts_with("Template file not found"));

        std::fs::create_dir_all(paths.template_file.parent().unwrap()).unwrap();
        std::fs::write(&paths.template_file, "").unwrap();
        let err = paths.ensure_inputs_exist().unwrap_err();
        assert!(err.to_string().starts_with("Docs directory not found"));

        std::fs::create_dir_all(&paths.docs_dir).unwrap();
        paths.ensure_inputs_exist().unwrap();
    }
}
