// forensic-core/src/domain/rules/condition.rs
//
// Condition trees. The in-memory form is a closed enum; the serialized form
// (ConditionSpec) is the loose JSON/YAML shape rules are authored in. Every
// conversion from the loose form goes through structural checks, so an
// unsupported operator never reaches the evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element name given to leaves synthesized from bare phrases.
pub const IMPLICIT_ELEMENT: &str = "alternative phrases";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
    IfThen,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::IfThen => "IF-THEN",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogicalOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "NOT" => Ok(Self::Not),
            "IF-THEN" | "IFTHEN" => Ok(Self::IfThen),
            _ => Err(format!("unsupported operator '{}'", s)),
        }
    }
}

/// A leaf: a named element searched for through a list of phrases.
/// One matching phrase is enough; an optional element never blocks its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementCondition {
    pub element: String,
    pub options: Vec<String>,
    pub required: bool,
}

impl ElementCondition {
    pub fn required(element: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            element: element.into(),
            options,
            required: true,
        }
    }

    pub fn optional(element: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            element: element.into(),
            options,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alternatives {
    /// Bare phrases, evaluated as a single required element.
    Phrases(Vec<String>),
    Branches(Vec<Condition>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConditionSpec", into = "ConditionSpec")]
pub enum Condition {
    Element(ElementCondition),
    And(Vec<Condition>),
    Or(Alternatives),
    /// Satisfied only when none of the wrapped conditions is.
    Not(Vec<Condition>),
    IfThen {
        antecedent: Box<Condition>,
        consequent: Box<Condition>,
    },
}

impl Condition {
    pub fn element(element: impl Into<String>, options: &[&str]) -> Self {
        Self::Element(ElementCondition::required(
            element,
            options.iter().map(|o| o.to_string()).collect(),
        ))
    }

    pub fn any_of(phrases: &[&str]) -> Self {
        Self::Or(Alternatives::Phrases(
            phrases.iter().map(|p| p.to_string()).collect(),
        ))
    }

    pub fn if_then(antecedent: Condition, consequent: Condition) -> Self {
        Self::IfThen {
            antecedent: Box::new(antecedent),
            consequent: Box::new(consequent),
        }
    }

    /// Short label of the node: the operator, or "ELEMENT" for leaves.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Element(_) => "ELEMENT",
            Self::And(_) => LogicalOperator::And.as_str(),
            Self::Or(_) => LogicalOperator::Or.as_str(),
            Self::Not(_) => LogicalOperator::Not.as_str(),
            Self::IfThen { .. } => LogicalOperator::IfThen.as_str(),
        }
    }

    /// Number of search phrases across every leaf of the tree.
    pub fn phrase_count(&self) -> usize {
        match self {
            Self::Element(leaf) => leaf.options.len(),
            Self::Or(Alternatives::Phrases(phrases)) => phrases.len(),
            Self::Or(Alternatives::Branches(children)) | Self::And(children) | Self::Not(children) => {
                children.iter().map(Condition::phrase_count).sum()
            }
            Self::IfThen {
                antecedent,
                consequent,
            } => antecedent.phrase_count() + consequent.phrase_count(),
        }
    }

    /// Rejects trees the evaluator cannot give a meaningful answer for:
    /// empty phrase lists, blank phrases, connectives without children.
    pub fn check_structure(&self) -> Result<(), String> {
        match self {
            Self::Element(leaf) => {
                if leaf.element.trim().is_empty() {
                    return Err("element name cannot be empty".to_string());
                }
                check_phrases(&leaf.options, &format!("element '{}'", leaf.element))
            }
            Self::Or(Alternatives::Phrases(phrases)) => check_phrases(phrases, "OR node"),
            Self::Or(Alternatives::Branches(children)) => check_children(children, "OR"),
            Self::And(children) => check_children(children, "AND"),
            Self::Not(children) => check_children(children, "NOT"),
            Self::IfThen {
                antecedent,
                consequent,
            } => {
                antecedent.check_structure()?;
                consequent.check_structure()
            }
        }
    }
}

fn check_phrases(phrases: &[String], owner: &str) -> Result<(), String> {
    if phrases.is_empty() {
        return Err(format!("{} declares no search phrases", owner));
    }
    if phrases.iter().any(|p| p.trim().is_empty()) {
        return Err(format!("{} contains a blank search phrase", owner));
    }
    Ok(())
}

fn check_children(children: &[Condition], operator: &str) -> Result<(), String> {
    if children.is_empty() {
        return Err(format!("{} node has no conditions", operator));
    }
    children.iter().try_for_each(Condition::check_structure)
}

// --- SERIALIZED FORM ---

/// Authoring shape of a condition node. A node declares either an
/// `operator` (with `conditions` or `antecedent`/`consequent`) or an `element`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, alias = "phrases", skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antecedent: Option<Box<ConditionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequent: Option<Box<ConditionSpec>>,
}

/// Children of a logical node may be nested nodes or bare phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionEntry {
    Phrase(String),
    Node(ConditionSpec),
}

impl TryFrom<ConditionSpec> for Condition {
    type Error = String;

    fn try_from(spec: ConditionSpec) -> Result<Self, Self::Error> {
        let condition = match (spec.operator, spec.element) {
            (Some(operator), _) => {
                let operator = LogicalOperator::from_str(&operator)?;
                from_logical(operator, spec.conditions, spec.antecedent, spec.consequent)?
            }
            (None, Some(element)) => Condition::Element(ElementCondition {
                element,
                options: spec.options,
                required: spec.required.unwrap_or(true),
            }),
            (None, None) => {
                return Err("condition must declare either an operator or an element".to_string());
            }
        };

        condition.check_structure()?;
        Ok(condition)
    }
}

fn from_logical(
    operator: LogicalOperator,
    entries: Vec<ConditionEntry>,
    antecedent: Option<Box<ConditionSpec>>,
    consequent: Option<Box<ConditionSpec>>,
) -> Result<Condition, String> {
    let condition = match operator {
        LogicalOperator::IfThen => {
            let antecedent = antecedent.ok_or("IF-THEN node requires an antecedent")?;
            let consequent = consequent.ok_or("IF-THEN node requires a consequent")?;
            Condition::if_then(
                Condition::try_from(*antecedent)?,
                Condition::try_from(*consequent)?,
            )
        }
        LogicalOperator::And => {
            let (phrases, nodes) = split_entries(entries)?;
            // Each bare phrase is its own required element.
            let mut children: Vec<Condition> = phrases
                .into_iter()
                .map(|p| Condition::Element(ElementCondition::required(p.clone(), vec![p])))
                .collect();
            children.extend(nodes);
            Condition::And(children)
        }
        LogicalOperator::Or => {
            let (phrases, nodes) = split_entries(entries)?;
            if nodes.is_empty() {
                Condition::Or(Alternatives::Phrases(phrases))
            } else {
                Condition::Or(Alternatives::Branches(with_implicit_leaf(phrases, nodes)))
            }
        }
        LogicalOperator::Not => {
            let (phrases, nodes) = split_entries(entries)?;
            Condition::Not(with_implicit_leaf(phrases, nodes))
        }
    };

    Ok(condition)
}

fn split_entries(entries: Vec<ConditionEntry>) -> Result<(Vec<String>, Vec<Condition>), String> {
    let mut phrases = Vec::new();
    let mut nodes = Vec::new();
    for entry in entries {
        match entry {
            ConditionEntry::Phrase(phrase) => phrases.push(phrase),
            ConditionEntry::Node(spec) => nodes.push(Condition::try_from(spec)?),
        }
    }
    Ok((phrases, nodes))
}

fn with_implicit_leaf(phrases: Vec<String>, nodes: Vec<Condition>) -> Vec<Condition> {
    let mut children = Vec::with_capacity(nodes.len() + 1);
    if !phrases.is_empty() {
        children.push(Condition::Element(ElementCondition::required(
            IMPLICIT_ELEMENT,
            phrases,
        )));
    }
    children.extend(nodes);
    children
}

impl From<Condition> for ConditionSpec {
    fn from(condition: Condition) -> Self {
        let nodes = |children: Vec<Condition>| {
            children
                .into_iter()
                .map(|c| ConditionEntry::Node(c.into()))
                .collect()
        };

        match condition {
            Condition::Element(leaf) => ConditionSpec {
                element: Some(leaf.element),
                options: leaf.options,
                required: Some(leaf.required),
                ..Default::default()
            },
            Condition::And(children) => ConditionSpec {
                operator: Some(LogicalOperator::And.to_string()),
                conditions: nodes(children),
                ..Default::default()
            },
            Condition::Or(Alternatives::Phrases(phrases)) => ConditionSpec {
                operator: Some(LogicalOperator::Or.to_string()),
                conditions: phrases.into_iter().map(ConditionEntry::Phrase).collect(),
                ..Default::default()
            },
            Condition::Or(Alternatives::Branches(children)) => ConditionSpec {
                operator: Some(LogicalOperator::Or.to_string()),
                conditions: nodes(children),
                ..Default::default()
            },
            Condition::Not(children) => ConditionSpec {
                operator: Some(LogicalOperator::Not.to_string()),
                conditions: nodes(children),
                ..Default::default()
            },
            Condition::IfThen {
                antecedent,
                consequent,
            } => ConditionSpec {
                operator: Some(LogicalOperator::IfThen.to_string()),
                antecedent: Some(Box::new((*antecedent).into())),
                consequent: Some(Box::new((*consequent).into())),
                ..Default::default()
            },
        }
    }
}
