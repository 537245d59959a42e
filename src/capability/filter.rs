//! Native filtering support declared by a backend

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::FilterOp;

/// Attributes a backend can filter server-side, per operator.
///
/// Either set may be empty and the two may overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCapability {
    /// Attributes filterable by exact match
    #[serde(default)]
    pub equality: BTreeSet<String>,
    /// Attributes filterable by substring
    #[serde(default)]
    pub substring: BTreeSet<String>,
}

impl FilterCapability {
    /// Creates a capability with no natively filterable attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares native equality filtering for the given attributes
    pub fn with_equality(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.equality.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Declares native substring filtering for the given attributes
    pub fn with_substring(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.substring.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Checks if `attribute` can be filtered natively with `op`
    pub fn supports(&self, attribute: &str, op: FilterOp) -> bool {
        match op {
            FilterOp::Equals => self.equality.contains(attribute),
            FilterOp::Contains => self.substring.contains(attribute),
        }
    }
}
