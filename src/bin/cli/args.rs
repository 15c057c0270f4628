//! CLI Argument Structures
//!
//! Every path has a default relative to the repository root, so running the
//! binary with no arguments from the root builds `docs/index.html`.

use clap::{Args, Parser, Subcommand};
use pdf_index::core::config::DEFAULT_HISTORY_TIMEOUT_SECS;
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Index page generator for published lecture PDFs
#[derive(Parser)]
#[command(name = "pdf-index")]
#[command(version = VERSION)]
#[command(about = "Generate the HTML index page of a published PDF site")]
#[command(long_about = "
Scan the published docs directory for PDFs, find where each one lives in the
repository, read its last commit date from git, group the files by their
original directory and render the index page from a Handlebars template.

Common Usage:

  # Build docs/index.html from the repository root
  pdf-index

  # Same, with explicit paths
  pdf-index generate --root . --docs-dir docs --output docs/index.html

  # Show the configuration format
  pdf-index print-default-config

  # Check a configuration file
  pdf-index validate-config .github/page-config.yml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options for the implicit `generate` run
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index page (default when no subcommand is given)
    Generate(GenerateArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a page configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Repository root searched for original file locations
    #[arg(long, env = "PDF_INDEX_ROOT")]
    pub root: Option<PathBuf>,

    /// Published directory containing the PDFs [default: <root>/docs]
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Page configuration [default: <root>/.github/page-config.yml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Handlebars template [default: <root>/.github/templates/index.html.hbs]
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Generated page [default: <docs-dir>/index.html]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Upper bound for each git history lookup, in seconds
    #[arg(long, default_value_t = DEFAULT_HISTORY_TIMEOUT_SECS)]
    pub history_timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    pub config: PathBuf,
}
