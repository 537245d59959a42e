//! Search dispatcher
//!
//! Routing order (strict):
//! 1. Validate the predicate shape
//! 2. Identifier and display-name shortcuts
//! 3. No predicate: pagination-only path when paged, full import otherwise
//! 4. Equals / Contains / And strategies
//!
//! Every path converges on enrichment before records reach the sink.

use crate::config::EngineConfig;
use crate::connector::{Connector, ResultSink};
use crate::model::{Criteria, FilterOp, PagingRequest, Paginator, Predicate};
use crate::observability::{log_event_with_fields, Event};

use super::errors::SearchResult;
use super::outcome::{SearchOutcome, Strategy};

/// Capability-aware search over one backend connector.
///
/// The engine holds no mutable state; each call builds its own paginator,
/// so one engine may serve concurrent searches.
pub struct SearchEngine<'a, C: Connector> {
    pub(super) connector: &'a C,
    pub(super) config: &'a EngineConfig,
}

impl<'a, C: Connector> SearchEngine<'a, C> {
    /// Creates an engine over a connector
    pub fn new(connector: &'a C, config: &'a EngineConfig) -> Self {
        Self { connector, config }
    }

    /// Runs one search.
    ///
    /// `predicate` of `None` matches everything. `paging` carries a 1-based
    /// offset. Records are handed to `sink` in order, possibly over several
    /// batches; rejected searches emit nothing.
    pub fn search<S>(
        &self,
        predicate: Option<&Predicate>,
        sink: &mut S,
        paging: Option<&PagingRequest>,
    ) -> SearchResult<SearchOutcome>
    where
        S: ResultSink<C::Record>,
    {
        let shape = predicate.map_or("none", Predicate::shape);
        let paged = if paging.is_some() { "true" } else { "false" };
        log_event_with_fields(Event::SearchBegin, &[("predicate", shape), ("paged", paged)]);

        let result = self.route(predicate, sink, paging);

        match &result {
            Ok(outcome) => {
                let emitted = outcome.emitted.to_string();
                log_event_with_fields(
                    Event::SearchComplete,
                    &[("strategy", outcome.strategy.as_str()), ("emitted", emitted.as_str())],
                );
            }
            Err(err) => {
                let event = if err.is_rejection() {
                    Event::SearchRejected
                } else {
                    Event::SearchFailed
                };
                let reason = err.to_string();
                log_event_with_fields(event, &[("code", err.code()), ("reason", reason.as_str())]);
            }
        }

        result
    }

    fn route(
        &self,
        predicate: Option<&Predicate>,
        sink: &mut dyn ResultSink<C::Record>,
        paging: Option<&PagingRequest>,
    ) -> SearchResult<SearchOutcome> {
        let Some(predicate) = predicate else {
            return match paging {
                Some(request) => self.paginate(request, sink),
                None => self.import(sink),
            };
        };

        let criteria = predicate.criteria()?;

        if let Some(outcome) = self.resolve_shortcut(&criteria, sink)? {
            return Ok(outcome);
        }

        let mut paginator = Paginator::from_request(paging, self.config.default_page_size);

        match criteria {
            Criteria::Single(condition) => match condition.op {
                FilterOp::Equals => self.search_equals(condition, &mut paginator, sink),
                FilterOp::Contains => self.search_contains(condition, &mut paginator, sink),
            },
            Criteria::And(first, second) => self.search_and(first, second, &mut paginator, sink),
        }
    }

    pub(super) fn selected(&self, strategy: Strategy, attribute: Option<&str>) {
        log_event_with_fields(
            Event::StrategySelected,
            &[
                ("strategy", strategy.as_str()),
                ("attribute", attribute.unwrap_or("-")),
            ],
        );
    }
}
