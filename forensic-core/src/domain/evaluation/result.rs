// forensic-core/src/domain/evaluation/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::evidence::Evidence;
use crate::domain::rules::{Outcome, RuleKind, Severity};

/// The outcome descriptor picked for a verdict, plus how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOutcome {
    pub result: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
    pub details: String,
}

impl ResolvedOutcome {
    pub fn resolve(descriptor: &Outcome, details: String) -> Self {
        Self {
            result: descriptor.result.clone(),
            message: descriptor.message.clone(),
            severity: descriptor.severity,
            consequence: descriptor.consequence.clone(),
            remedy: descriptor.remedy.clone(),
            details,
        }
    }
}

/// Verdict of one rule against one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub rule_id: String,
    pub source: String,
    pub kind: RuleKind,
    /// Whether the rule's condition tree was satisfied.
    pub compliant: bool,
    #[serde(default)]
    pub vacuously_true: bool,
    pub evidence: Vec<Evidence>,
    pub missing: Vec<String>,
    pub outcome: ResolvedOutcome,
    pub duration_ms: f64,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalFailure {
    pub rule_id: String,
    pub source: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub rule_id: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub detail: String,
}

/// Placeholder for a requested rule that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleError {
    pub rule_id: String,
    pub message: String,
    /// Rules registered at the time of the request, for diagnostics.
    pub known_rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleReport {
    Evaluated(EvaluationResult),
    Error(RuleError),
}

impl RuleReport {
    pub fn rule_id(&self) -> &str {
        match self {
            Self::Evaluated(result) => &result.rule_id,
            Self::Error(error) => &error.rule_id,
        }
    }

    pub fn as_evaluation(&self) -> Option<&EvaluationResult> {
        match self {
            Self::Evaluated(result) => Some(result),
            Self::Error(_) => None,
        }
    }
}

/// Verdict of a rule set against one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_rules: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub errors: usize,
    /// False as soon as one evaluated rule is non-compliant. Errors do not count.
    pub overall_compliant: bool,
    pub critical_failures: Vec<CriticalFailure>,
    pub warnings: Vec<Warning>,
    pub results: Vec<RuleReport>,
    pub evaluated_at: DateTime<Utc>,
    pub duration_ms: f64,
}

impl AggregateResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn evaluations(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.results.iter().filter_map(RuleReport::as_evaluation)
    }

    pub fn result_for(&self, rule_id: &str) -> Option<&RuleReport> {
        self.results.iter().find(|r| r.rule_id() == rule_id)
    }
}
