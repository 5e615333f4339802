// forensic-core/src/infrastructure/loader.rs

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::configuration::ProjectConfig;
use crate::error::ForensicError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::RuleSource;

const RULE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Reads rule definitions from JSON and YAML files under a set of directories.
///
/// A file holds a single definition, a list of definitions, or a map with a
/// `rules` list. Files are read in path order so ids registered twice resolve
/// the same way on every run. Definitions are not validated here.
#[derive(Debug, Clone)]
pub struct DirectoryRuleSource {
    paths: Vec<PathBuf>,
}

impl DirectoryRuleSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Rule paths of the project configuration, resolved against the project directory.
    pub fn from_config(project_dir: &Path, config: &ProjectConfig) -> Self {
        Self::new(config.rule_paths.iter().map(|p| project_dir.join(p)).collect())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>, InfrastructureError> {
        let mut files = Vec::new();

        for root in &self.paths {
            if !root.exists() {
                warn!("⚠️  Rule path {:?} does not exist, skipping", root);
                continue;
            }

            let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
            for entry in walker {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type().is_file() && is_rule_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        }

        Ok(files)
    }

    fn parse_file(path: &Path) -> Result<Vec<Value>, InfrastructureError> {
        let content = fs::read_to_string(path)?;
        let rule_file_error = |reason: String| InfrastructureError::RuleFile {
            path: path.display().to_string(),
            reason,
        };

        let document: Value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| rule_file_error(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| rule_file_error(e.to_string()))?
        };

        Ok(match document {
            Value::Array(items) => items,
            Value::Object(mut map) if !map.contains_key("id") && map.contains_key("rules") => {
                match map.remove("rules") {
                    Some(Value::Array(items)) => items,
                    _ => return Err(rule_file_error("'rules' must be a list".to_string())),
                }
            }
            Value::Null => vec![],
            other => vec![other],
        })
    }
}

impl RuleSource for DirectoryRuleSource {
    fn load(&self) -> Result<Vec<Value>, ForensicError> {
        let mut definitions = Vec::new();
        let files = self.collect_files()?;

        for file in &files {
            let parsed = Self::parse_file(file)?;
            debug!(file = ?file, definitions = parsed.len(), "Rule file parsed");
            definitions.extend(parsed);
        }

        info!(
            files = files.len(),
            definitions = definitions.len(),
            "📚 Rule definitions loaded"
        );
        Ok(definitions)
    }

    fn describe(&self) -> String {
        let paths: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
        paths.join(", ")
    }
}

fn is_rule_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RULE_EXTENSIONS.contains(&ext))
}
