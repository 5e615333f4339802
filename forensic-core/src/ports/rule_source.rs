// forensic-core/src/ports/rule_source.rs

// What the engine needs to be populated: a batch of rule definitions, still
// loosely typed. Where they come from (files, a database, a request body)
// is the adapter's business. Parsing and validation stay in the registry.

use crate::error::ForensicError;

pub trait RuleSource: Send + Sync {
    fn load(&self) -> Result<Vec<serde_json::Value>, ForensicError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}
