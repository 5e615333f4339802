// forensic-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Rule validation failed for '{rule_id}': {reason}")]
    #[diagnostic(
        code(forensic::domain::rule_validation),
        help("A rule needs an id, a source, a kind, a condition tree and both outcomes.")
    )]
    RuleValidation { rule_id: String, reason: String },

    #[error("Rule '{rule_id}' is not registered")]
    #[diagnostic(
        code(forensic::domain::unknown_rule),
        help("Known rules: {known}")
    )]
    UnknownRule { rule_id: String, known: String },

    #[error("Rule set serialization error: {0}")]
    #[diagnostic(
        code(forensic::domain::serialization),
        help("The payload must be a JSON array of rule definitions.")
    )]
    Serialization(String),
}

impl DomainError {
    pub fn unknown_rule(rule_id: &str, known: &[String]) -> Self {
        let known = if known.is_empty() {
            "(none)".to_string()
        } else {
            known.join(", ")
        };
        Self::UnknownRule {
            rule_id: rule_id.to_string(),
            known,
        }
    }
}
