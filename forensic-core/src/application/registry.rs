// forensic-core/src/application/registry.rs
//
// Rule storage keyed by identifier. Registration validates every rule and
// never lets one bad definition stop the rest of a batch.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::rules::Rule;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationFailure {
    /// Position of the rule in the submitted batch.
    pub index: usize,
    pub rule_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrationSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<RegistrationFailure>,
}

impl RegistrationSummary {
    fn record(&mut self, index: usize, result: Result<(), DomainError>) {
        self.total += 1;
        match result {
            Ok(()) => self.successful += 1,
            Err(err) => {
                self.failed += 1;
                let (rule_id, reason) = match err {
                    DomainError::RuleValidation { rule_id, reason } => (Some(rule_id), reason),
                    other => (None, other.to_string()),
                };
                self.errors.push(RegistrationFailure {
                    index,
                    rule_id,
                    reason,
                });
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Arc<Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores the rule, replacing any rule with the same id.
    pub fn try_register(&mut self, rule: Rule) -> Result<(), DomainError> {
        let rule = rule.validated()?;

        if self.rules.contains_key(&rule.id) {
            debug!(rule_id = %rule.id, "Replacing previously registered rule");
        }
        self.rules.insert(rule.id.clone(), Arc::new(rule));
        Ok(())
    }

    /// Same as `try_register`, logging the reason instead of returning it.
    pub fn register(&mut self, rule: Rule) -> bool {
        match self.try_register(rule) {
            Ok(()) => true,
            Err(e) => {
                warn!("⚠️  Rule rejected: {}", e);
                false
            }
        }
    }

    pub fn register_many(&mut self, rules: impl IntoIterator<Item = Rule>) -> RegistrationSummary {
        let mut summary = RegistrationSummary::default();
        for (index, rule) in rules.into_iter().enumerate() {
            let result = self.try_register(rule);
            if let Err(e) = &result {
                warn!("⚠️  Rule rejected: {}", e);
            }
            summary.record(index, result);
        }

        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Rule batch registered"
        );
        summary
    }

    /// Parses each loosely-typed definition, then registers it.
    pub fn register_values(
        &mut self,
        values: impl IntoIterator<Item = serde_json::Value>,
    ) -> RegistrationSummary {
        let mut summary = RegistrationSummary::default();
        for (index, value) in values.into_iter().enumerate() {
            let result = Rule::from_value(value).and_then(|rule| self.try_register(rule));
            if let Err(e) = &result {
                warn!("⚠️  Rule rejected: {}", e);
            }
            summary.record(index, result);
        }

        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Rule definitions registered"
        );
        summary
    }

    /// Serializes the whole rule set as a JSON array, ordered by id.
    pub fn export(&self) -> Result<String, DomainError> {
        let rules: Vec<&Rule> = self.rules.values().map(Arc::as_ref).collect();
        serde_json::to_string_pretty(&rules).map_err(|e| DomainError::Serialization(e.to_string()))
    }

    /// Loads an exported rule set. Entries are validated one by one; a payload
    /// that is not a JSON array is rejected as a whole and nothing is imported.
    #[instrument(skip(self, payload), fields(payload.len = payload.len()))]
    pub fn import(&mut self, payload: &str) -> Result<RegistrationSummary, DomainError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(payload)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(self.register_values(values))
    }

    pub fn get(&self, id: &str) -> Option<Arc<Rule>> {
        self.rules.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}
