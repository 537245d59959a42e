//! Conjunction strategy
//!
//! Routing looks at the first term only. When the backend filters that
//! attribute natively, both terms are pushed down together in one call.
//! Otherwise every term must be enumerable; one bounded listing is filtered
//! per term, each candidate set is cut to the requested window, and the
//! windows are intersected by identifier in first-term order.

use crate::connector::{Connector, NativeFilter, ResultSink};
use crate::model::{AttributeFilter, Condition, Paginator};

use super::dispatcher::SearchEngine;
use super::errors::{SearchError, SearchResult};
use super::filters::ManualFilter;
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    pub(super) fn search_and(
        &self,
        first: Condition<'_>,
        second: Condition<'_>,
        paginator: &mut Paginator,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        let caps = self.connector.capability_view();

        if let Some(op) = caps.native_op(first.attribute, first.op) {
            let filter = NativeFilter::combined(
                op,
                vec![
                    AttributeFilter::new(first.attribute, first.value),
                    AttributeFilter::new(second.attribute, second.value),
                ],
            );
            return self.fetch_native(filter, Strategy::AndNative, paginator, sink);
        }

        let terms = [first, second];
        if let Some(term) = terms.iter().find(|t| !caps.matchable_locally(t.attribute)) {
            return Err(SearchError::unsupported_filter(term.attribute, term.op));
        }

        self.selected(Strategy::AndManual, Some(first.attribute));

        let context = self.connector.prefetch_context()?;
        let listing = self.list_bounded(&context)?;

        let mut exhausted = true;
        let mut windows = Vec::with_capacity(terms.len());
        for term in &terms {
            let matches = ManualFilter::retain(listing.clone(), term);
            exhausted &= paginator.exhausts(matches.len());
            windows.push(paginator.window(matches));
        }

        paginator.set_no_more_results(exhausted);
        paginator.set_continuation_token(None);

        let result = ManualFilter::intersect(windows);
        let emitted = self.emit(result, Some(&context), sink)?;
        Ok(SearchOutcome::page(Strategy::AndManual, emitted, paginator))
    }
}
