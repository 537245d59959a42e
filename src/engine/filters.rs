//! Manual (in-memory) filtering
//!
//! Used when the backend cannot filter an attribute itself. Matching is
//! case-insensitive; a record without the attribute never matches.

use std::collections::HashSet;

use crate::model::{Condition, Searchable};

/// Evaluates conditions against fetched records
pub struct ManualFilter;

impl ManualFilter {
    /// Checks if a record satisfies a condition
    pub fn matches<R: Searchable>(record: &R, condition: &Condition<'_>) -> bool {
        match record.attribute(condition.attribute) {
            Some(actual) => condition.matches(actual),
            None => false,
        }
    }

    /// Keeps the records that satisfy a condition, preserving order
    pub fn retain<R: Searchable>(records: Vec<R>, condition: &Condition<'_>) -> Vec<R> {
        records
            .into_iter()
            .filter(|r| Self::matches(r, condition))
            .collect()
    }

    /// Intersects candidate sets by identifier, keeping the first set's order
    pub fn intersect<R: Searchable>(mut sets: Vec<Vec<R>>) -> Vec<R> {
        if sets.is_empty() {
            return Vec::new();
        }
        let first = sets.remove(0);
        let others: Vec<HashSet<String>> = sets
            .iter()
            .map(|set| set.iter().map(|r| r.uid().to_string()).collect())
            .collect();

        first
            .into_iter()
            .filter(|r| others.iter().all(|ids| ids.contains(r.uid())))
            .collect()
    }
}
