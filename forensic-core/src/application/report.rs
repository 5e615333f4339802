// forensic-core/src/application/report.rs
//
// Plain-text rendering of verdicts. Section order is fixed: header, metadata,
// outcome, evidence, missing requirements. Every field of a result appears.

use std::fmt;

use crate::domain::evaluation::{AggregateResult, EvaluationResult, RuleError, RuleReport};

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn render_evaluation(result: &EvaluationResult) -> String {
        EvaluationBlock(result).to_string()
    }

    pub fn render_aggregate(aggregate: &AggregateResult) -> String {
        AggregateBlock(aggregate).to_string()
    }
}

struct EvaluationBlock<'a>(&'a EvaluationResult);

impl fmt::Display for EvaluationBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let outcome = &result.outcome;

        writeln!(f, "=== Rule {} ===", result.rule_id)?;
        writeln!(f, "Source: {}", result.source)?;
        writeln!(f, "Kind: {}", result.kind)?;
        writeln!(f, "Evaluated at: {}", result.timestamp.to_rfc3339())?;
        writeln!(f, "Duration: {:.3} ms", result.duration_ms)?;
        writeln!(f)?;

        let status = if result.compliant {
            "COMPLIANT"
        } else {
            "NON-COMPLIANT"
        };
        if result.vacuously_true {
            writeln!(f, "Status: {} (vacuously true)", status)?;
        } else {
            writeln!(f, "Status: {}", status)?;
        }
        writeln!(f, "Outcome: {}", outcome.result)?;
        writeln!(f, "Message: {}", outcome.message)?;
        if let Some(severity) = outcome.severity {
            writeln!(f, "Severity: {}", severity)?;
        }
        if let Some(consequence) = &outcome.consequence {
            writeln!(f, "Consequence: {}", consequence)?;
        }
        if let Some(remedy) = &outcome.remedy {
            writeln!(f, "Remedy: {}", remedy)?;
        }
        writeln!(f, "Details: {}", outcome.details)?;
        writeln!(f)?;

        if result.evidence.is_empty() {
            writeln!(f, "Evidence: none")?;
        } else {
            writeln!(f, "Evidence ({}):", result.evidence.len())?;
            for (i, evidence) in result.evidence.iter().enumerate() {
                writeln!(
                    f,
                    "  {}. \"{}\" in sentence {} ({:.0}% confidence)",
                    i + 1,
                    evidence.phrase,
                    evidence.sentence_index + 1,
                    evidence.confidence * 100.0
                )?;
                writeln!(f, "     Sentence: {}", evidence.sentence)?;
                writeln!(f, "     Context: {}", evidence.context)?;
            }
        }
        writeln!(f)?;

        if result.missing.is_empty() {
            writeln!(f, "Missing requirements: none")
        } else {
            writeln!(f, "Missing requirements ({}):", result.missing.len())?;
            for requirement in &result.missing {
                writeln!(f, "  - {}", requirement)?;
            }
            Ok(())
        }
    }
}

struct ErrorBlock<'a>(&'a RuleError);

impl fmt::Display for ErrorBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = self.0;
        writeln!(f, "=== Rule {} (error) ===", error.rule_id)?;
        writeln!(f, "Message: {}", error.message)?;
        if error.known_rules.is_empty() {
            writeln!(f, "Known rules: none")
        } else {
            writeln!(f, "Known rules: {}", error.known_rules.join(", "))
        }
    }
}

struct AggregateBlock<'a>(&'a AggregateResult);

impl fmt::Display for AggregateBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aggregate = self.0;

        writeln!(f, "=== Compliance Report ===")?;
        writeln!(f, "Evaluated at: {}", aggregate.evaluated_at.to_rfc3339())?;
        writeln!(f, "Duration: {:.3} ms", aggregate.duration_ms)?;
        writeln!(
            f,
            "Rules: {} total, {} compliant, {} non-compliant, {} errors",
            aggregate.total_rules, aggregate.compliant, aggregate.non_compliant, aggregate.errors
        )?;
        writeln!(
            f,
            "Overall: {}",
            if aggregate.overall_compliant {
                "COMPLIANT"
            } else {
                "NON-COMPLIANT"
            }
        )?;

        if !aggregate.critical_failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Critical failures ({}):", aggregate.critical_failures.len())?;
            for failure in &aggregate.critical_failures {
                writeln!(
                    f,
                    "  - {} [{}]: {}",
                    failure.rule_id, failure.source, failure.message
                )?;
                if let Some(consequence) = &failure.consequence {
                    writeln!(f, "      Consequence: {}", consequence)?;
                }
                if let Some(remedy) = &failure.remedy {
                    writeln!(f, "      Remedy: {}", remedy)?;
                }
            }
        }

        if !aggregate.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", aggregate.warnings.len())?;
            for warning in &aggregate.warnings {
                match warning.severity {
                    Some(severity) => writeln!(
                        f,
                        "  - {} [{}] ({}): {}",
                        warning.rule_id, warning.source, severity, warning.detail
                    )?,
                    None => writeln!(
                        f,
                        "  - {} [{}]: {}",
                        warning.rule_id, warning.source, warning.detail
                    )?,
                }
            }
        }

        for report in &aggregate.results {
            writeln!(f)?;
            match report {
                RuleReport::Evaluated(result) => write!(f, "{}", EvaluationBlock(result))?,
                RuleReport::Error(error) => write!(f, "{}", ErrorBlock(error))?,
            }
        }
        Ok(())
    }
}
