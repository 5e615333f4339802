// forensic-core/src/application/engine.rs

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::application::aggregator::Aggregator;
use crate::application::history::{EvaluationHistory, HistoryEntry, HistoryStatistics};
use crate::application::registry::{RegistrationSummary, RuleRegistry};
use crate::domain::configuration::EngineConfig;
use crate::domain::error::DomainError;
use crate::domain::evaluation::{
    AggregateResult, ConditionEvaluator, EvaluationResult, ResolvedOutcome, RuleError, RuleReport,
};
use crate::domain::evidence::EvidenceExtractor;
use crate::domain::rules::Rule;
use crate::domain::text::PreparedDocument;

/// Entry point of the library: owns the rule set and the evaluation history.
///
/// Registration takes `&mut self`; once the rule set is loaded the engine can
/// be shared behind an `Arc` and evaluated from many tasks at once.
#[derive(Debug)]
pub struct ComplianceEngine {
    config: EngineConfig,
    registry: RuleRegistry,
    evaluator: ConditionEvaluator,
    aggregator: Aggregator,
    history: EvaluationHistory,
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ComplianceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            evaluator: ConditionEvaluator::new(EvidenceExtractor::new(config.context_radius)),
            aggregator: Aggregator::new(config.critical_severity),
            registry: RuleRegistry::new(),
            history: EvaluationHistory::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    // --- REGISTRATION ---

    pub fn register(&mut self, rule: Rule) -> bool {
        self.registry.register(rule)
    }

    pub fn try_register(&mut self, rule: Rule) -> Result<(), DomainError> {
        self.registry.try_register(rule)
    }

    pub fn register_many(&mut self, rules: impl IntoIterator<Item = Rule>) -> RegistrationSummary {
        self.registry.register_many(rules)
    }

    pub fn register_values(
        &mut self,
        values: impl IntoIterator<Item = serde_json::Value>,
    ) -> RegistrationSummary {
        self.registry.register_values(values)
    }

    pub fn export_rules(&self) -> Result<String, DomainError> {
        self.registry.export()
    }

    #[instrument(skip(self, payload), fields(payload.len = payload.len()))]
    pub fn import_rules(&mut self, payload: &str) -> Result<RegistrationSummary, DomainError> {
        self.registry.import(payload)
    }

    pub fn rule(&self, id: &str) -> Option<Arc<Rule>> {
        self.registry.get(id)
    }

    pub fn rule_ids(&self) -> Vec<String> {
        self.registry.ids()
    }

    // --- EVALUATION ---

    /// Evaluates one rule. An unknown id is an error on this path only;
    /// multi-rule evaluation reports it as data instead.
    pub fn evaluate(&self, rule_id: &str, text: &str) -> Result<EvaluationResult, DomainError> {
        let rule = self
            .registry
            .get(rule_id)
            .ok_or_else(|| DomainError::unknown_rule(rule_id, &self.registry.ids()))?;

        let document = PreparedDocument::new(text);
        Ok(self.evaluate_rule(&rule, &document))
    }

    /// Evaluates an already-resolved rule against an already-prepared document.
    pub fn evaluate_rule(&self, rule: &Rule, document: &PreparedDocument) -> EvaluationResult {
        let start = Instant::now();
        let outcome = self.evaluator.evaluate(&rule.condition, document);

        let descriptor = if outcome.satisfied {
            &rule.on_success
        } else {
            &rule.on_failure
        };

        let result = EvaluationResult {
            rule_id: rule.id.clone(),
            source: rule.source.clone(),
            kind: rule.kind,
            compliant: outcome.satisfied,
            vacuously_true: outcome.vacuously_true,
            evidence: outcome.evidence,
            missing: outcome.missing,
            outcome: ResolvedOutcome::resolve(descriptor, outcome.details),
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
            timestamp: Utc::now(),
        };

        debug!(
            rule_id = %result.rule_id,
            compliant = result.compliant,
            evidence = result.evidence.len(),
            missing = result.missing.len(),
            "Rule evaluated"
        );

        if self.config.record_history {
            self.history.record(HistoryEntry {
                rule_id: result.rule_id.clone(),
                timestamp: result.timestamp,
                compliant: result.compliant,
                duration_ms: result.duration_ms,
            });
        }

        result
    }

    /// Evaluates the listed rules against one document, normalized and
    /// segmented once. Results keep the request order.
    #[instrument(skip(self, rule_ids, text), fields(rules = rule_ids.len(), text.len = text.len()))]
    pub fn evaluate_many(&self, rule_ids: &[String], text: &str) -> AggregateResult {
        let start = Instant::now();
        let document = PreparedDocument::new(text);

        let reports = rule_ids
            .iter()
            .map(|id| match self.registry.get(id) {
                Some(rule) => RuleReport::Evaluated(self.evaluate_rule(&rule, &document)),
                None => self.unknown_rule_report(id),
            })
            .collect();

        self.finish(reports, start)
    }

    /// Every registered rule, in id order.
    pub fn evaluate_all(&self, text: &str) -> AggregateResult {
        self.evaluate_many(&self.registry.ids(), text)
    }

    /// Same contract as `evaluate_many`, with one blocking task per rule.
    #[instrument(skip(self, rule_ids, text), fields(rules = rule_ids.len(), text.len = text.len()))]
    pub async fn evaluate_many_concurrent(
        self: Arc<Self>,
        rule_ids: Vec<String>,
        text: String,
    ) -> AggregateResult {
        let start = Instant::now();
        let document = Arc::new(PreparedDocument::new(&text));

        let mut pending = Vec::with_capacity(rule_ids.len());
        for id in rule_ids {
            let task = self.registry.get(&id).map(|rule| {
                let engine = Arc::clone(&self);
                let document = Arc::clone(&document);
                tokio::task::spawn_blocking(move || engine.evaluate_rule(&rule, &document))
            });
            pending.push((id, task));
        }

        // Awaiting the handles in submission order restores the request order.
        let mut reports = Vec::with_capacity(pending.len());
        for (id, task) in pending {
            let report = match task {
                None => self.unknown_rule_report(&id),
                Some(handle) => match handle.await {
                    Ok(result) => RuleReport::Evaluated(result),
                    Err(err) => {
                        warn!(rule_id = %id, "❌ Evaluation task failed: {}", err);
                        RuleReport::Error(RuleError {
                            rule_id: id,
                            message: format!("evaluation task failed: {}", err),
                            known_rules: self.registry.ids(),
                        })
                    }
                },
            };
            reports.push(report);
        }

        self.finish(reports, start)
    }

    fn unknown_rule_report(&self, rule_id: &str) -> RuleReport {
        let known_rules = self.registry.ids();
        let message = DomainError::unknown_rule(rule_id, &known_rules).to_string();
        warn!(rule_id = %rule_id, "⚠️  {}", message);

        RuleReport::Error(RuleError {
            rule_id: rule_id.to_string(),
            message,
            known_rules,
        })
    }

    fn finish(&self, reports: Vec<RuleReport>, start: Instant) -> AggregateResult {
        let aggregate = self
            .aggregator
            .aggregate(reports, start.elapsed().as_secs_f64() * 1000.0);

        info!(
            total = aggregate.total_rules,
            compliant = aggregate.compliant,
            non_compliant = aggregate.non_compliant,
            errors = aggregate.errors,
            critical = aggregate.critical_failures.len(),
            "Rule set evaluated in {:.2}ms",
            aggregate.duration_ms
        );
        aggregate
    }

    // --- HISTORY ---

    /// Entries ordered by timestamp.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }

    pub fn history_statistics(&self) -> HistoryStatistics {
        self.history.statistics()
    }
}
