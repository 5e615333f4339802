// forensic-core/src/domain/configuration.rs

use serde::{Deserialize, Serialize};

use crate::domain::evidence::DEFAULT_CONTEXT_RADIUS;
use crate::domain::rules::Severity;

/// Tunables of the evaluation engine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sentences kept on each side of a match in the evidence context.
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,

    /// Failure severity that files a non-compliant rule under critical failures.
    #[serde(default = "default_critical_severity")]
    pub critical_severity: Severity,

    #[serde(default = "default_record_history")]
    pub record_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            context_radius: default_context_radius(),
            critical_severity: default_critical_severity(),
            record_history: default_record_history(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(rename = "rule-paths", default = "default_rule_paths")]
    pub rule_paths: Vec<String>,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            rule_paths: default_rule_paths(),
            engine: EngineConfig::default(),
        }
    }
}

fn default_context_radius() -> usize {
    DEFAULT_CONTEXT_RADIUS
}
fn default_critical_severity() -> Severity {
    Severity::Critical
}
fn default_record_history() -> bool {
    true
}
fn default_name() -> String {
    "forensic".to_string()
}
fn default_rule_paths() -> Vec<String> {
    vec!["rules".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() -> anyhow::Result<()> {
        let config: ProjectConfig = serde_yaml::from_str("name: traffic\nengine:\n  context_radius: 2\n")?;
        assert_eq!(config.name, "traffic");
        assert_eq!(config.rule_paths, vec!["rules"]);
        assert_eq!(config.engine.context_radius, 2);
        assert_eq!(config.engine.critical_severity, Severity::Critical);
        assert!(config.engine.record_history);
        Ok(())
    }
}
