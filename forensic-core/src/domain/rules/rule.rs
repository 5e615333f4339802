// forensic-core/src/domain/rules/rule.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::error::DomainError;
use crate::domain::rules::condition::Condition;
use crate::domain::rules::severity::{RuleKind, Severity};

/// What the caller is told when a rule's condition holds (or does not).
/// Polarity is per rule: a trigger-style rule may label its success as an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Outcome {
    #[validate(length(min = 1, message = "Outcome result label cannot be empty"))]
    pub result: String,

    #[validate(length(min = 1, message = "Outcome message cannot be empty"))]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
}

impl Outcome {
    pub fn new(result: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            message: message.into(),
            severity: None,
            consequence: None,
            remedy: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_consequence(mut self, consequence: impl Into<String>) -> Self {
        self.consequence = Some(consequence.into());
        self
    }

    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remedy = Some(remedy.into());
        self
    }
}

/// A registered rule. Immutable once it enters the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Rule {
    #[validate(custom(function = "validate_not_blank"))]
    pub id: String,

    /// Provenance label (statute, section...). Opaque to the engine.
    #[validate(custom(function = "validate_not_blank"))]
    pub source: String,

    pub kind: RuleKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_condition"))]
    pub condition: Condition,

    #[validate(nested)]
    #[serde(alias = "onSuccess")]
    pub on_success: Outcome,

    #[validate(nested)]
    #[serde(alias = "onFailure")]
    pub on_failure: Outcome,
}

impl Rule {
    /// Runs structural validation, returning the rule untouched when it passes.
    pub fn validated(self) -> Result<Self, DomainError> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(DomainError::RuleValidation {
                rule_id: display_id(Some(&self.id)),
                reason: errors.to_string(),
            }),
        }
    }

    /// Parses and validates one loosely-typed rule definition.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        let rule_id = display_id(value.get("id").and_then(|id| id.as_str()));

        let rule: Rule =
            serde_json::from_value(value).map_err(|e| DomainError::RuleValidation {
                rule_id,
                reason: e.to_string(),
            })?;

        rule.validated()
    }

    /// Severity that decides critical bucketing when the rule is not satisfied.
    pub fn failure_severity(&self) -> Option<Severity> {
        self.on_failure.severity
    }
}

fn display_id(id: Option<&str>) -> String {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => "<unnamed>".to_string(),
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("value cannot be blank".into()));
    }
    Ok(())
}

fn validate_condition(condition: &Condition) -> Result<(), ValidationError> {
    condition
        .check_structure()
        .map_err(|reason| ValidationError::new("condition_structure").with_message(reason.into()))
}
