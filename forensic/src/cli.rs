// forensic/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forensic")]
#[command(about = "Checks legal documents against statutory compliance rules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ⚖️  Evaluates a document against the project's rules
    Check {
        /// Plain-text document to evaluate
        document: PathBuf,

        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Evaluate only these rule ids (repeatable). Default: every rule
        #[arg(long = "rule", short)]
        rules: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with error if the document is not compliant
        #[arg(long)]
        check: bool,
    },

    /// ✅ Loads and validates every rule definition
    Validate {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📚 Lists the registered rules
    Rules {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 💾 Exports the validated rule set as JSON
    Export {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },
}
