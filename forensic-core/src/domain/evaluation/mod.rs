// forensic-core/src/domain/evaluation/mod.rs

pub mod evaluator;
pub mod result;

pub use evaluator::{ConditionEvaluator, ConditionOutcome};
pub use result::{
    AggregateResult, CriticalFailure, EvaluationResult, ResolvedOutcome, RuleError, RuleReport,
    Warning,
};
