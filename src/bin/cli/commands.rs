//! Command execution for the pdf-index CLI.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::debug;

use pdf_index::core::config::{IndexPaths, PageConfig};
use pdf_index::IndexPipeline;

use crate::cli::args::{GenerateArgs, ValidateConfigArgs};

/// Resolve the input and output locations from CLI arguments.
pub fn resolve_paths(args: &GenerateArgs) -> IndexPaths {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut paths = IndexPaths::from_root(&root);

    if let Some(docs_dir) = &args.docs_dir {
        paths.docs_dir = docs_dir.clone();
        paths.output_file = docs_dir.join("index.html");
    }
    if let Some(config) = &args.config {
        paths.config_file = config.clone();
    }
    if let Some(template) = &args.template {
        paths.template_file = template.clone();
    }
    if let Some(output) = &args.output {
        paths.output_file = output.clone();
    }

    paths
}

/// Build the index page.
pub fn generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let paths = resolve_paths(&args);
    debug!("Resolved paths: {:?}", paths);

    let summary = IndexPipeline::new(paths)
        .with_history_timeout(Duration::from_secs(args.history_timeout_secs))
        .run()
        .context("Failed to generate index page")?;

    println!(
        "{} {}",
        "Successfully generated:".bright_green().bold(),
        summary.output_file.display()
    );
    println!(
        "   {} file(s) in {} categor{}",
        summary.file_count,
        summary.category_count,
        if summary.category_count == 1 { "y" } else { "ies" }
    );
    if summary.unlocated > 0 || summary.undated > 0 {
        println!(
            "   {}",
            format!(
                "{} without original location, {} without commit date",
                summary.unlocated, summary.undated
            )
            .yellow()
        );
    }

    Ok(())
}

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    // Unstyled: the output is saved as a config file.
    println!("# Default pdf-index page configuration");
    println!("# Save this to .github/page-config.yml and customize as needed");
    println!();

    let yaml_output = PageConfig::default().to_yaml_string()?;
    println!("{}", yaml_output);

    Ok(())
}

/// Validate a page configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );

    let config = PageConfig::from_yaml_file(&args.config)
        .with_context(|| format!("Configuration validation failed: {}", args.config.display()))?;

    println!("{}", "Configuration file is valid!".bright_green().bold());
    println!("   Title:      {}", config.title);
    println!("   Repository: {} ({})", config.github_repo, config.branch);
    println!("   Categories: {} override(s)", config.categories.len());

    let sanitized = config.sanitized();
    if sanitized != config {
        println!(
            "   {}",
            "Some values contain markup or style characters that will be filtered on the page"
                .yellow()
        );
    }

    Ok(())
}
