//! Capability-aware search engine
//!
//! Answers one search request against a backend whose filtering, pagination
//! and listing detail vary. Each request is routed to the cheapest correct
//! strategy given what the connector declares:
//!
//! - `dispatcher`: validation and routing
//! - `shortcut`: identifier and display-name lookups
//! - `equals`, `contains`, `and`: per-shape strategies
//! - `pagination`, `import`: searches without a predicate
//! - `enrich`: summary-to-full replacement before emission
//!
//! The engine performs no writes and keeps no state between calls.

mod and;
mod contains;
mod dispatcher;
mod enrich;
mod equals;
mod errors;
mod fetch;
mod filters;
mod import;
mod outcome;
mod pagination;
mod shortcut;

#[cfg(test)]
mod test_support;

pub use dispatcher::SearchEngine;
pub use errors::{SearchError, SearchResult, Severity};
pub use filters::ManualFilter;
pub use outcome::{SearchOutcome, Strategy};
