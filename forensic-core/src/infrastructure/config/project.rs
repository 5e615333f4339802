// forensic-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["forensic.yaml", "forensic.yml"];

pub const ENV_RULE_PATHS: &str = "FORENSIC_RULE_PATHS";
pub const ENV_CONTEXT_RADIUS: &str = "FORENSIC_CONTEXT_RADIUS";

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    check_config(&config)?;

    Ok(config)
}

/// Falls back to the defaults (plus environment overrides) when the project
/// has no configuration file. Any other failure is still an error.
pub fn load_or_default(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    match load_project_config(project_dir) {
        Err(InfrastructureError::ConfigNotFound(reason)) => {
            info!("No project configuration, using defaults ({})", reason);
            let mut config = ProjectConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            Ok(config)
        }
        other => other,
    }
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn check_config(config: &ProjectConfig) -> Result<(), InfrastructureError> {
    if config.rule_paths.iter().all(|p| p.trim().is_empty()) {
        return Err(InfrastructureError::ConfigError(format!(
            "project '{}' declares no rule paths",
            config.name
        )));
    }
    Ok(())
}

fn apply_env_overrides(config: &mut ProjectConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(ENV_RULE_PATHS) {
        let paths: Vec<String> = val
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if !paths.is_empty() {
            info!(old = ?config.rule_paths, new = ?paths, "Overriding rule paths via ENV");
            config.rule_paths = paths;
        }
    }

    if let Some(val) = lookup(ENV_CONTEXT_RADIUS) {
        match val.trim().parse::<usize>() {
            Ok(radius) => {
                info!(old = config.engine.context_radius, new = radius, "Overriding context radius via ENV");
                config.engine.context_radius = radius;
            }
            Err(_) => warn!("⚠️  Ignoring {}='{}': not a sentence count", ENV_CONTEXT_RADIUS, val),
        }
    }
}
