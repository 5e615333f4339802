// forensic-core/src/domain/evaluation/evaluator.rs
//
// Recursive evaluation of a condition tree against a prepared document.
// Pure: no shared state is touched, so rules can be evaluated concurrently.

use tracing::debug;

use crate::domain::evidence::{Evidence, EvidenceExtractor};
use crate::domain::rules::{Alternatives, Condition, IMPLICIT_ELEMENT};
use crate::domain::text::PreparedDocument;

/// Reported for an unsatisfied child that gave no missing detail of its own.
pub const UNSATISFIED_PLACEHOLDER: &str = "unsatisfied nested requirement";
pub const MISSING_ALTERNATIVE: &str = "at least one alternative requirement";
pub const MISSING_ABSENCE: &str = "absence of prohibited condition";

/// Result of evaluating one node (and, recursively, its subtree).
/// Evidence is informational: it is kept from failed branches too.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionOutcome {
    pub satisfied: bool,
    pub evidence: Vec<Evidence>,
    pub missing: Vec<String>,
    pub details: String,
    /// Set on an IF-THEN node whose antecedent did not hold.
    pub vacuously_true: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionEvaluator {
    extractor: EvidenceExtractor,
}

impl ConditionEvaluator {
    pub fn new(extractor: EvidenceExtractor) -> Self {
        Self { extractor }
    }

    pub fn evaluate(&self, condition: &Condition, document: &PreparedDocument) -> ConditionOutcome {
        let outcome = match condition {
            Condition::Element(leaf) => {
                self.evaluate_element(&leaf.element, &leaf.options, leaf.required, document)
            }
            Condition::And(children) => self.evaluate_all(children, document),
            Condition::Or(Alternatives::Phrases(phrases)) => {
                self.evaluate_element(IMPLICIT_ELEMENT, phrases, true, document)
            }
            Condition::Or(Alternatives::Branches(children)) => self.evaluate_any(children, document),
            Condition::Not(children) => self.evaluate_none(children, document),
            Condition::IfThen {
                antecedent,
                consequent,
            } => self.evaluate_implication(antecedent, consequent, document),
        };

        debug!(
            node = condition.label(),
            satisfied = outcome.satisfied,
            evidence = outcome.evidence.len(),
            "condition evaluated"
        );
        outcome
    }

    fn evaluate_element(
        &self,
        element: &str,
        options: &[String],
        required: bool,
        document: &PreparedDocument,
    ) -> ConditionOutcome {
        let mut evidence = Vec::new();
        let mut found = 0;

        for phrase in options {
            let matches = self.extractor.find_in_document(phrase, document);
            if !matches.is_empty() {
                found += 1;
                evidence.extend(matches);
            }
        }

        let satisfied = found > 0 || !required;
        let missing = if found == 0 && required {
            vec![format!("{} (\"{}\")", element, options.join("\" or \""))]
        } else {
            vec![]
        };

        let details = if found > 0 {
            format!(
                "element '{}' matched {} of {} phrase(s)",
                element,
                found,
                options.len()
            )
        } else if required {
            format!("element '{}' not found in the document", element)
        } else {
            format!("optional element '{}' not found", element)
        };

        ConditionOutcome {
            satisfied,
            evidence,
            missing,
            details,
            vacuously_true: false,
        }
    }

    fn evaluate_all(&self, children: &[Condition], document: &PreparedDocument) -> ConditionOutcome {
        let mut satisfied_count = 0;
        let mut evidence = Vec::new();
        let mut missing = Vec::new();

        for child in children {
            let outcome = self.evaluate(child, document);
            if outcome.satisfied {
                satisfied_count += 1;
            } else if outcome.missing.is_empty() {
                missing.push(UNSATISFIED_PLACEHOLDER.to_string());
            } else {
                missing.extend(outcome.missing);
            }
            evidence.extend(outcome.evidence);
        }

        ConditionOutcome {
            satisfied: satisfied_count == children.len(),
            evidence,
            missing,
            details: format!(
                "AND: {} of {} conditions satisfied",
                satisfied_count,
                children.len()
            ),
            vacuously_true: false,
        }
    }

    fn evaluate_any(&self, children: &[Condition], document: &PreparedDocument) -> ConditionOutcome {
        let mut satisfied_count = 0;
        let mut evidence = Vec::new();

        for child in children {
            let outcome = self.evaluate(child, document);
            if outcome.satisfied {
                satisfied_count += 1;
            }
            evidence.extend(outcome.evidence);
        }

        let satisfied = satisfied_count > 0;
        ConditionOutcome {
            satisfied,
            evidence,
            missing: if satisfied {
                vec![]
            } else {
                vec![MISSING_ALTERNATIVE.to_string()]
            },
            details: format!(
                "OR: {} of {} alternatives satisfied",
                satisfied_count,
                children.len()
            ),
            vacuously_true: false,
        }
    }

    fn evaluate_none(&self, children: &[Condition], document: &PreparedDocument) -> ConditionOutcome {
        let mut present = 0;
        let mut evidence = Vec::new();

        for child in children {
            let outcome = self.evaluate(child, document);
            if outcome.satisfied {
                present += 1;
            }
            evidence.extend(outcome.evidence);
        }

        let satisfied = present == 0;
        ConditionOutcome {
            satisfied,
            evidence,
            missing: if satisfied {
                vec![]
            } else {
                vec![MISSING_ABSENCE.to_string()]
            },
            details: if satisfied {
                "NOT: prohibited condition absent".to_string()
            } else {
                format!("NOT: {} prohibited condition(s) present", present)
            },
            vacuously_true: false,
        }
    }

    fn evaluate_implication(
        &self,
        antecedent: &Condition,
        consequent: &Condition,
        document: &PreparedDocument,
    ) -> ConditionOutcome {
        let premise = self.evaluate(antecedent, document);

        if !premise.satisfied {
            // The consequent is never looked at.
            return ConditionOutcome {
                satisfied: true,
                evidence: premise.evidence,
                missing: vec![],
                details: "IF-THEN: antecedent not met, condition vacuously satisfied".to_string(),
                vacuously_true: true,
            };
        }

        let conclusion = self.evaluate(consequent, document);
        let missing = match (conclusion.satisfied, conclusion.missing.is_empty()) {
            (true, _) => vec![],
            (false, true) => vec![UNSATISFIED_PLACEHOLDER.to_string()],
            (false, false) => conclusion.missing,
        };

        let mut evidence = premise.evidence;
        evidence.extend(conclusion.evidence);

        ConditionOutcome {
            satisfied: conclusion.satisfied,
            evidence,
            missing,
            details: format!(
                "IF-THEN: antecedent met, consequent {}",
                if conclusion.satisfied {
                    "satisfied"
                } else {
                    "not satisfied"
                }
            ),
            vacuously_true: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evidence::{EXACT_MATCH_CONFIDENCE, WORD_BOUNDARY_CONFIDENCE};
    use crate::domain::rules::ElementCondition;

    fn eval(condition: &Condition, text: &str) -> ConditionOutcome {
        ConditionEvaluator::default().evaluate(condition, &PreparedDocument::new(text))
    }

    fn belief_and_driving() -> Condition {
        Condition::And(vec![
            Condition::element("reasonable belief", &["reason to believe"]),
            Condition::element("driving", &["driven a motor vehicle"]),
        ])
    }

    #[test]
    fn test_and_all_present() {
        let outcome = eval(
            &belief_and_driving(),
            "I had reason to believe he was drunk. He had driven a motor vehicle on the road.",
        );
        assert!(outcome.satisfied);
        assert_eq!(outcome.evidence.len(), 2);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_and_missing_child_keeps_partial_evidence() {
        let outcome = eval(&belief_and_driving(), "I had reason to believe he was drunk.");
        assert!(!outcome.satisfied);
        assert_eq!(outcome.evidence.len(), 1);
        assert_eq!(outcome.missing.len(), 1);
        assert!(outcome.missing[0].starts_with("driving"));
    }

    #[test]
    fn test_and_missing_is_union_of_children() {
        let condition = Condition::And(vec![
            Condition::element("a", &["alpha"]),
            Condition::any_of(&["beta", "gamma"]),
            Condition::Or(Alternatives::Branches(vec![Condition::element("d", &["delta"])])),
        ]);
        let outcome = eval(&condition, "Nothing relevant here.");
        assert!(!outcome.satisfied);
        assert_eq!(
            outcome.missing,
            vec![
                "a (\"alpha\")".to_string(),
                "alternative phrases (\"beta\" or \"gamma\")".to_string(),
                MISSING_ALTERNATIVE.to_string(),
            ]
        );
    }

    #[test]
    fn test_or_phrases_any_option_suffices() {
        let condition = Condition::any_of(&["bloodshot eyes", "slurred speech"]);
        let outcome = eval(&condition, "The suspect had slurred speech and was unsteady.");
        assert!(outcome.satisfied);
        assert_eq!(outcome.evidence.len(), 1);
        assert_eq!(outcome.evidence[0].confidence, WORD_BOUNDARY_CONFIDENCE);
    }

    #[test]
    fn test_or_branches_missing_label() {
        let condition = Condition::Or(Alternatives::Branches(vec![
            Condition::element("breath", &["breath test"]),
            Condition::element("blood", &["blood sample"]),
        ]));
        let miss = eval(&condition, "No sample was taken.");
        assert!(!miss.satisfied);
        assert_eq!(miss.missing, vec![MISSING_ALTERNATIVE.to_string()]);

        let hit = eval(&condition, "A blood sample was taken.");
        assert!(hit.satisfied);
        assert!(hit.missing.is_empty());
    }

    #[test]
    fn test_or_keeps_evidence_from_unsatisfied_branches() {
        let condition = Condition::Or(Alternatives::Branches(vec![
            Condition::And(vec![
                Condition::element("breath", &["breath test"]),
                Condition::element("refusal", &["refused"]),
            ]),
            Condition::And(vec![
                Condition::element("blood", &["blood sample"]),
                Condition::element("doctor", &["doctor"]),
            ]),
        ]));

        let outcome = eval(&condition, "A breath test was offered. A blood sample was mentioned.");
        assert!(!outcome.satisfied);
        assert_eq!(outcome.missing, vec![MISSING_ALTERNATIVE.to_string()]);
        let phrases: Vec<&str> = outcome.evidence.iter().map(|e| e.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["breath test", "blood sample"]);
    }

    #[test]
    fn test_leaf_matches_whatever_the_sentence_scan_finds() {
        // Final sigma lowercases differently inside a longer run of text
        // than at the end of its own sentence.
        let document = PreparedDocument::new("ΟΔΟΣ.ΚΑΙ");
        let direct = EvidenceExtractor::default().find_matches("ΟΔΟΣ", document.sentences());
        assert_eq!(direct.len(), 1);

        let outcome = ConditionEvaluator::default()
            .evaluate(&Condition::element("road", &["ΟΔΟΣ"]), &document);
        assert!(outcome.satisfied);
        assert_eq!(outcome.evidence, direct);
    }

    #[test]
    fn test_optional_element_never_blocks() {
        let condition = Condition::And(vec![
            Condition::element("caution", &["cautioned"]),
            Condition::Element(ElementCondition::optional(
                "odour",
                vec!["smell of alcohol".into()],
            )),
        ]);
        let outcome = eval(&condition, "He was cautioned.");
        assert!(outcome.satisfied);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_not_inverts_presence() {
        let condition = Condition::Not(vec![Condition::element("threat", &["threatened"])]);

        let clean = eval(&condition, "The interview was calm.");
        assert!(clean.satisfied);
        assert!(clean.missing.is_empty());

        let tainted = eval(&condition, "The officer threatened him.");
        assert!(!tainted.satisfied);
        assert_eq!(tainted.missing, vec![MISSING_ABSENCE.to_string()]);
        assert_eq!(tainted.evidence.len(), 1);
    }

    #[test]
    fn test_not_with_several_children_requires_all_absent() {
        let condition = Condition::Not(vec![
            Condition::element("threat", &["threatened"]),
            Condition::element("promise", &["promised"]),
        ]);
        assert!(!eval(&condition, "He was promised bail.").satisfied);
        assert!(eval(&condition, "Nothing improper.").satisfied);
    }

    #[test]
    fn test_if_then_vacuous_when_antecedent_absent() {
        let condition = Condition::if_then(
            Condition::element("arrest", &["arrested"]),
            Condition::element("caution", &["cautioned"]),
        );
        let outcome = eval(&condition, "He was cautioned at the roadside.");
        assert!(outcome.satisfied);
        assert!(outcome.vacuously_true);
        // The consequent phrase is in the text but was never evaluated.
        assert!(outcome.evidence.iter().all(|e| e.phrase != "cautioned"));
    }

    #[test]
    fn test_if_then_antecedent_met_consequent_absent() {
        let condition = Condition::if_then(
            Condition::element("arrest", &["arrested"]),
            Condition::element("caution", &["cautioned"]),
        );
        let outcome = eval(&condition, "He was arrested at 10pm.");
        assert!(!outcome.satisfied);
        assert!(!outcome.vacuously_true);
        assert_eq!(outcome.missing, vec!["caution (\"cautioned\")".to_string()]);
        assert_eq!(outcome.evidence.len(), 1);
    }

    #[test]
    fn test_if_then_merges_evidence_when_both_hold() {
        let condition = Condition::if_then(
            Condition::element("arrest", &["arrested"]),
            Condition::element("caution", &["cautioned"]),
        );
        let outcome = eval(&condition, "He was arrested. He was cautioned.");
        assert!(outcome.satisfied);
        assert_eq!(outcome.evidence.len(), 2);
    }

    #[test]
    fn test_exact_sentence_evidence() {
        let condition = Condition::element("caution", &["you do not have to say anything"]);
        let outcome = eval(&condition, "He was told. You do not have to say anything! He nodded.");
        assert!(outcome.satisfied);
        assert_eq!(outcome.evidence[0].confidence, EXACT_MATCH_CONFIDENCE);
        assert_eq!(outcome.evidence[0].sentence_index, 1);
    }

    #[test]
    fn test_every_phrase_contributes_its_own_evidence() {
        let condition = Condition::element("signs", &["slurred", "slurred speech"]);
        let outcome = eval(&condition, "He had slurred speech.");
        assert_eq!(outcome.evidence.len(), 2);
    }
}
