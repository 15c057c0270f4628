//! pdf-index CLI - builds the index page of a published PDF site.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => cli::generate_command(args)?,
        Commands::PrintDefaultConfig => cli::print_default_config()?,
        Commands::ValidateConfig(args) => cli::validate_config(args)?,
    }

    Ok(())
}
