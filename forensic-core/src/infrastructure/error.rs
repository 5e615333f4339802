// forensic-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(forensic::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    #[diagnostic(
        code(forensic::infra::walk),
        help("Check that every rule path exists and is readable.")
    )]
    Walk(#[from] walkdir::Error),

    // --- CONFIG / RULE FILES ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(forensic::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml(#[from] serde_yaml::Error),

    #[error("Rule file '{path}' could not be read: {reason}")]
    #[diagnostic(
        code(forensic::infra::rule_file),
        help("A rule file holds one rule definition or a list of them, in JSON or YAML.")
    )]
    RuleFile { path: String, reason: String },

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(forensic::infra::config_missing))]
    ConfigNotFound(String),
}
