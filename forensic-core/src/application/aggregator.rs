// forensic-core/src/application/aggregator.rs

use chrono::Utc;

use crate::domain::evaluation::{AggregateResult, CriticalFailure, RuleReport, Warning};
use crate::domain::rules::Severity;

/// Classifies per-rule reports into the aggregate verdict of a rule set.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    critical_severity: Severity,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Severity::Critical)
    }
}

impl Aggregator {
    pub fn new(critical_severity: Severity) -> Self {
        Self { critical_severity }
    }

    pub fn aggregate(&self, results: Vec<RuleReport>, duration_ms: f64) -> AggregateResult {
        let mut compliant = 0;
        let mut non_compliant = 0;
        let mut errors = 0;
        let mut critical_failures = Vec::new();
        let mut warnings = Vec::new();

        for report in &results {
            let result = match report {
                RuleReport::Error(_) => {
                    errors += 1;
                    continue;
                }
                RuleReport::Evaluated(result) => result,
            };

            if result.compliant {
                compliant += 1;
                continue;
            }

            non_compliant += 1;
            // A non-compliant result carries the onFailure descriptor.
            if result.outcome.severity == Some(self.critical_severity) {
                critical_failures.push(CriticalFailure {
                    rule_id: result.rule_id.clone(),
                    source: result.source.clone(),
                    message: result.outcome.message.clone(),
                    consequence: result.outcome.consequence.clone(),
                    remedy: result.outcome.remedy.clone(),
                });
            } else {
                warnings.push(Warning {
                    rule_id: result.rule_id.clone(),
                    source: result.source.clone(),
                    severity: result.outcome.severity,
                    detail: result.outcome.message.clone(),
                });
            }
        }

        AggregateResult {
            total_rules: results.len(),
            compliant,
            non_compliant,
            errors,
            overall_compliant: non_compliant == 0,
            critical_failures,
            warnings,
            results,
            evaluated_at: Utc::now(),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::{EvaluationResult, ResolvedOutcome, RuleError};
    use crate::domain::rules::RuleKind;

    fn evaluated(id: &str, compliant: bool, severity: Option<Severity>) -> RuleReport {
        RuleReport::Evaluated(EvaluationResult {
            rule_id: id.to_string(),
            source: format!("{} source", id),
            kind: RuleKind::MandatoryProcedure,
            compliant,
            vacuously_true: false,
            evidence: vec![],
            missing: vec![],
            outcome: ResolvedOutcome {
                result: if compliant { "COMPLIANT" } else { "NON_COMPLIANT" }.into(),
                message: format!("{} message", id),
                severity,
                consequence: Some("evidence excluded".into()),
                remedy: None,
                details: String::new(),
            },
            duration_ms: 0.0,
            timestamp: Utc::now(),
        })
    }

    #[test]
    fn test_classification() {
        let reports = vec![
            evaluated("a", true, None),
            evaluated("b", false, Some(Severity::Critical)),
            evaluated("c", false, Some(Severity::High)),
            evaluated("d", false, None),
            RuleReport::Error(RuleError {
                rule_id: "ghost".into(),
                message: "unknown".into(),
                known_rules: vec!["a".into()],
            }),
        ];

        let aggregate = Aggregator::default().aggregate(reports, 1.5);

        assert_eq!(aggregate.total_rules, 5);
        assert_eq!(aggregate.compliant, 1);
        assert_eq!(aggregate.non_compliant, 3);
        assert_eq!(aggregate.errors, 1);
        assert!(!aggregate.overall_compliant);
        assert_eq!(aggregate.critical_failures.len(), 1);
        assert_eq!(aggregate.critical_failures[0].rule_id, "b");
        assert_eq!(
            aggregate.critical_failures[0].consequence.as_deref(),
            Some("evidence excluded")
        );
        assert_eq!(aggregate.warnings.len(), 2);
        assert_eq!(aggregate.warnings[0].detail, "c message");
    }

    #[test]
    fn test_errors_do_not_break_overall_compliance() {
        let reports = vec![
            evaluated("a", true, None),
            RuleReport::Error(RuleError {
                rule_id: "ghost".into(),
                message: "unknown".into(),
                known_rules: vec![],
            }),
        ];
        let aggregate = Aggregator::default().aggregate(reports, 0.0);
        assert!(aggregate.overall_compliant);
        assert_eq!(
            aggregate.compliant + aggregate.non_compliant + aggregate.errors,
            aggregate.total_rules
        );
    }

    #[test]
    fn test_custom_critical_tag() {
        let reports = vec![evaluated("c", false, Some(Severity::High))];
        let aggregate = Aggregator::new(Severity::High).aggregate(reports, 0.0);
        assert_eq!(aggregate.critical_failures.len(), 1);
        assert!(aggregate.warnings.is_empty());
    }
}
