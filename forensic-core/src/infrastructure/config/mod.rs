// forensic-core/src/infrastructure/config/mod.rs

pub mod project;

pub use crate::domain::configuration::{EngineConfig, ProjectConfig};
pub use project::{load_or_default, load_project_config};
