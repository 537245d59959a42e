//! Backend connector contract
//!
//! The engine consumes a backend only through [`Connector`] and hands results
//! to a [`ResultSink`]. Both are implemented outside the engine; the
//! in-memory [`MemoryConnector`] is the reference implementation used by the
//! CLI and the tests.

mod errors;
mod memory;

pub use errors::{ConnectorError, ConnectorResult};
pub use memory::{CallCounts, Fixture, ListCall, MemoryConnector};

use std::collections::BTreeMap;

use serde_json::Value;

use crate::capability::{Capabilities, CapabilityDescriptor, FilterCapability};
use crate::model::{AttributeFilter, FilterOp, Paginator, Searchable};

/// Filter pushed down to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFilter {
    /// Operator applied to every term
    pub op: FilterOp,
    /// Attribute/value pairs, all of which must match
    pub terms: Vec<AttributeFilter>,
}

impl NativeFilter {
    /// Creates a single-term filter
    pub fn single(op: FilterOp, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            op,
            terms: vec![AttributeFilter::new(attribute, value)],
        }
    }

    /// Creates a combined filter carrying several terms under one operator
    pub fn combined(op: FilterOp, terms: Vec<AttributeFilter>) -> Self {
        Self { op, terms }
    }

    /// Evaluates the filter against a record
    pub fn matches<R: Searchable>(&self, record: &R) -> bool {
        self.terms.iter().all(|term| {
            record
                .attribute(&term.attribute)
                .is_some_and(|actual| self.op.matches(actual, &term.value))
        })
    }
}

/// Opaque per-page state a connector shares between the calls of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchContext(BTreeMap<String, Value>);

impl FetchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Contract a backend adapter satisfies
pub trait Connector {
    /// Record type produced by the backend
    type Record: Searchable;

    /// Listing and lookup capabilities
    fn capabilities(&self) -> &CapabilityDescriptor;

    /// Native filtering capabilities, if the backend filters at all
    fn filter_capability(&self) -> Option<&FilterCapability> {
        None
    }

    /// Lists records.
    ///
    /// A natively paginating backend honours `paginator` and records
    /// `no_more_results` and its continuation token on it; other backends may
    /// ignore it. `result_cap` bounds the number of records returned.
    fn list(
        &self,
        filter: Option<&NativeFilter>,
        paginator: Option<&mut Paginator>,
        result_cap: Option<usize>,
        context: Option<&FetchContext>,
    ) -> ConnectorResult<Vec<Self::Record>>;

    /// Fetches one full record by identifier
    fn fetch_by_id(
        &self,
        id: &str,
        context: Option<&FetchContext>,
    ) -> ConnectorResult<Option<Self::Record>>;

    /// Fetches one full record by display name
    fn fetch_by_name(&self, _name: &str) -> ConnectorResult<Option<Self::Record>> {
        Err(ConnectorError::Unsupported("fetch_by_name"))
    }

    /// Builds the shared state passed through one page's calls
    fn prefetch_context(&self) -> ConnectorResult<FetchContext> {
        Ok(FetchContext::default())
    }

    /// Combined capability view used for routing
    fn capability_view(&self) -> Capabilities<'_> {
        Capabilities::new(self.capabilities(), self.filter_capability())
    }
}

/// Consumer of ordered result batches
pub trait ResultSink<R> {
    /// Accepts the next batch
    fn accept(&mut self, batch: Vec<R>);
}

impl<R, F> ResultSink<R> for F
where
    F: FnMut(Vec<R>),
{
    fn accept(&mut self, batch: Vec<R>) {
        self(batch)
    }
}

/// Sink that keeps every batch it receives
#[derive(Debug, Clone)]
pub struct CollectingSink<R> {
    pages: Vec<Vec<R>>,
}

impl<R> CollectingSink<R> {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Batches in arrival order
    pub fn pages(&self) -> &[Vec<R>] {
        &self.pages
    }

    /// Number of records across all batches
    pub fn len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records, flattened in arrival order
    pub fn into_records(self) -> Vec<R> {
        self.pages.into_iter().flatten().collect()
    }
}

impl<R> Default for CollectingSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ResultSink<R> for CollectingSink<R> {
    fn accept(&mut self, batch: Vec<R>) {
        self.pages.push(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_native_filter_all_terms() {
        let record = Record::new("u1", "alice")
            .with_attribute("dept", "Ops")
            .with_attribute("mail", "alice@example.com");

        let filter = NativeFilter::combined(
            FilterOp::Equals,
            vec![
                AttributeFilter::new("dept", "ops"),
                AttributeFilter::new("mail", "alice@example.com"),
            ],
        );
        assert!(filter.matches(&record));

        let filter = NativeFilter::single(FilterOp::Equals, "dept", "dev");
        assert!(!filter.matches(&record));

        let filter = NativeFilter::single(FilterOp::Contains, "phone", "1");
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        sink.accept(vec![1, 2]);
        sink.accept(vec![3]);
        assert_eq!(sink.pages().len(), 2);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.into_records(), vec![1, 2, 3]);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |batch: Vec<u8>| seen.extend(batch);
            sink.accept(vec![7, 8]);
        }
        assert_eq!(seen, vec![7, 8]);
    }

    #[test]
    fn test_fetch_context() {
        let mut ctx = FetchContext::new();
        assert!(ctx.is_empty());
        ctx.insert("session", serde_json::json!("abc"));
        assert_eq!(ctx.get("session"), Some(&serde_json::json!("abc")));
    }
}
