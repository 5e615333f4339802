// forensic/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug forensic check ... to see every evaluated rule
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            document,
            project_dir,
            rules,
            format,
            check,
        } => commands::check::execute(document, project_dir, rules, format, check).await,
        Commands::Validate { project_dir } => commands::validate::execute(project_dir),
        Commands::Rules { project_dir } => commands::rules::execute(project_dir),
        Commands::Export {
            project_dir,
            output,
        } => commands::export::execute(project_dir, output),
    }
}
