// forensic-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod fs;
pub mod loader;

pub use loader::DirectoryRuleSource;
