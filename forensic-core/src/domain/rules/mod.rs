// forensic-core/src/domain/rules/mod.rs

pub mod condition;
pub mod rule;
pub mod severity;

// Re-exports
pub use condition::{
    Alternatives, Condition, ConditionSpec, ElementCondition, IMPLICIT_ELEMENT, LogicalOperator,
};
pub use rule::{Outcome, Rule};
pub use severity::{RuleKind, Severity};
