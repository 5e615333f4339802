// forensic-core/src/domain/rules/severity.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// Declaration order gives Info < Warning < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[serde(alias = "INFO")]
    Info,
    #[default]
    #[serde(alias = "WARNING")]
    Warning,
    #[serde(alias = "HIGH")]
    High,
    #[serde(alias = "CRITICAL")]
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// How a verdict of the rule should be read. Carried through, never branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    #[serde(alias = "MANDATORY_PREREQUISITE")]
    MandatoryPrerequisite,
    #[serde(alias = "MANDATORY_PROCEDURE")]
    MandatoryProcedure,
    #[serde(alias = "DISCRETIONARY_EXCLUSION")]
    DiscretionaryExclusion,
    #[serde(alias = "INTERPRETIVE_GUIDANCE")]
    InterpretiveGuidance,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MandatoryPrerequisite => "mandatory_prerequisite",
            Self::MandatoryProcedure => "mandatory_procedure",
            Self::DiscretionaryExclusion => "discretionary_exclusion",
            Self::InterpretiveGuidance => "interpretive_guidance",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
