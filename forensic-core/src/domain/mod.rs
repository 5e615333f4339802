// forensic-core/src/domain/mod.rs

pub mod configuration;
pub mod error;
pub mod evaluation;
pub mod evidence;
pub mod rules;
pub mod text;

// Re-exports for shorter imports elsewhere
pub use configuration::{EngineConfig, ProjectConfig};
pub use error::DomainError;
