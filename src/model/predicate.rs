//! Search predicates
//!
//! The calling framework may hand over any predicate shape. Only `Equals`,
//! `Contains` and `And` of exactly two `Equals`/`Contains` terms are
//! executable; [`Predicate::criteria`] turns a predicate into the executable
//! form or reports why it cannot run.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::{NAME_ATTRIBUTE, UID_ATTRIBUTE};

/// Operators the engine can evaluate, natively or by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Case-insensitive exact match
    Equals,
    /// Case-insensitive substring match
    Contains,
}

impl FilterOp {
    /// Returns the operator name for explain output
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Equals => "equals",
            FilterOp::Contains => "contains",
        }
    }

    /// Evaluates the operator against an attribute value
    pub fn matches(&self, actual: &str, expected: &str) -> bool {
        match self {
            FilterOp::Equals => actual.to_lowercase() == expected.to_lowercase(),
            FilterOp::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attribute name and comparison value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    /// Attribute name
    pub attribute: String,
    /// Value compared against
    pub value: String,
}

impl AttributeFilter {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// Predicate shapes the calling framework can submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(AttributeFilter),
    Contains(AttributeFilter),
    And(Vec<Predicate>),
    StartsWith(AttributeFilter),
    EndsWith(AttributeFilter),
    GreaterThan(AttributeFilter),
    LessThan(AttributeFilter),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Create an equality predicate
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Equals(AttributeFilter::new(attribute, value))
    }

    /// Create a substring predicate
    pub fn contains(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Contains(AttributeFilter::new(attribute, value))
    }

    /// Create a conjunction
    pub fn and(terms: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And(terms.into_iter().collect())
    }

    /// Create a prefix predicate
    pub fn starts_with(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::StartsWith(AttributeFilter::new(attribute, value))
    }

    /// Create a disjunction
    pub fn or(terms: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Or(terms.into_iter().collect())
    }

    /// Create a negation
    pub fn not(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    /// Returns the shape name used in rejection messages
    pub fn shape(&self) -> &'static str {
        match self {
            Predicate::Equals(_) => "equals",
            Predicate::Contains(_) => "contains",
            Predicate::And(_) => "and",
            Predicate::StartsWith(_) => "starts_with",
            Predicate::EndsWith(_) => "ends_with",
            Predicate::GreaterThan(_) => "greater_than",
            Predicate::LessThan(_) => "less_than",
            Predicate::Or(_) => "or",
            Predicate::Not(_) => "not",
        }
    }

    /// Returns the single condition of an `Equals` or `Contains` predicate
    pub fn condition(&self) -> Option<Condition<'_>> {
        match self {
            Predicate::Equals(f) => Some(Condition::new(FilterOp::Equals, f)),
            Predicate::Contains(f) => Some(Condition::new(FilterOp::Contains, f)),
            _ => None,
        }
    }

    /// Validates the predicate shape and returns its executable form
    pub fn criteria(&self) -> Result<Criteria<'_>, PredicateError> {
        match self {
            Predicate::Equals(_) | Predicate::Contains(_) => self
                .condition()
                .map(Criteria::Single)
                .ok_or(PredicateError::Unsupported(self.shape())),
            Predicate::And(terms) => match terms.as_slice() {
                [] => Err(PredicateError::EmptyAnd),
                [first, second] => {
                    let first = first
                        .condition()
                        .ok_or(PredicateError::Unsupported(first.shape()))?;
                    let second = second
                        .condition()
                        .ok_or(PredicateError::Unsupported(second.shape()))?;
                    Ok(Criteria::And(first, second))
                }
                _ => Err(PredicateError::AndArity(terms.len())),
            },
            other => Err(PredicateError::Unsupported(other.shape())),
        }
    }
}

/// One executable attribute comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'a> {
    /// Operator
    pub op: FilterOp,
    /// Attribute name
    pub attribute: &'a str,
    /// Comparison value
    pub value: &'a str,
}

impl<'a> Condition<'a> {
    fn new(op: FilterOp, filter: &'a AttributeFilter) -> Self {
        Self {
            op,
            attribute: &filter.attribute,
            value: &filter.value,
        }
    }

    /// Returns true if the condition targets the identifier attribute
    pub fn is_uid(&self) -> bool {
        self.attribute == UID_ATTRIBUTE
    }

    /// Returns true if the condition targets the display-name attribute
    pub fn is_name(&self) -> bool {
        self.attribute == NAME_ATTRIBUTE
    }

    /// Evaluates the condition against an attribute value
    pub fn matches(&self, actual: &str) -> bool {
        self.op.matches(actual, self.value)
    }
}

/// Validated, executable predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criteria<'a> {
    /// A single `Equals` or `Contains`
    Single(Condition<'a>),
    /// `And` of exactly two conditions
    And(Condition<'a>, Condition<'a>),
}

/// Reasons a predicate shape cannot be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateError {
    /// Shape outside Equals/Contains/And
    Unsupported(&'static str),
    /// `And` without sub-predicates
    EmptyAnd,
    /// `And` with a number of sub-predicates other than two
    AndArity(usize),
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateError::Unsupported(shape) => {
                write!(f, "predicate '{}' is not supported", shape)
            }
            PredicateError::EmptyAnd => write!(f, "and predicate has no sub-predicates"),
            PredicateError::AndArity(n) => {
                write!(f, "and predicate supports exactly 2 sub-predicates, got {}", n)
            }
        }
    }
}

impl std::error::Error for PredicateError {}
