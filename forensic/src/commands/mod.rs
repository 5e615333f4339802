// forensic/src/commands/mod.rs

pub mod check;
pub mod export;
pub mod rules;
pub mod validate;

use anyhow::Context;
use std::path::Path;

use forensic_core::ComplianceEngine;
use forensic_core::application::{RegistrationSummary, build_engine};
use forensic_core::domain::ProjectConfig;
use forensic_core::infrastructure::DirectoryRuleSource;
use forensic_core::infrastructure::config::load_or_default;

/// Config, then rule files, then the engine. Shared by every subcommand.
pub(crate) fn load_engine(
    project_dir: &Path,
) -> anyhow::Result<(ProjectConfig, ComplianceEngine, RegistrationSummary)> {
    let config = load_or_default(project_dir)
        .with_context(|| format!("Failed to load project configuration in {:?}", project_dir))?;

    let source = DirectoryRuleSource::from_config(project_dir, &config);
    let (engine, summary) = build_engine(&source, config.engine.clone())
        .with_context(|| format!("Failed to load rules for project '{}'", config.name))?;

    Ok((config, engine, summary))
}
