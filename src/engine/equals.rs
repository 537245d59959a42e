//! Equality strategy
//!
//! Native equality is preferred. A backend that only filters the attribute by
//! substring is asked for a substring match instead; the result may then be a
//! superset of the exact matches. Enumerable attributes with no native filter
//! are matched locally over one bounded listing.

use crate::connector::{Connector, NativeFilter, ResultSink};
use crate::model::{Condition, FilterOp, Paginator};
use crate::observability::{log_event_with_fields, Event};

use super::dispatcher::SearchEngine;
use super::errors::{SearchError, SearchResult};
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    pub(super) fn search_equals(
        &self,
        condition: Condition<'_>,
        paginator: &mut Paginator,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        let caps = self.connector.capability_view();
        let attribute = condition.attribute;

        match caps.native_op(attribute, FilterOp::Equals) {
            Some(FilterOp::Equals) => {
                let filter = NativeFilter::single(FilterOp::Equals, attribute, condition.value);
                self.fetch_native(filter, Strategy::NativeFilter, paginator, sink)
            }
            Some(FilterOp::Contains) => {
                log_event_with_fields(
                    Event::ApproximateFilter,
                    &[("attribute", attribute), ("requested", "equals"), ("used", "contains")],
                );
                let filter = NativeFilter::single(FilterOp::Contains, attribute, condition.value);
                self.fetch_native(filter, Strategy::SubstringForEquals, paginator, sink)
            }
            None if caps.is_enumerable(attribute) => {
                self.filter_manually(condition, false, paginator, sink)
            }
            None => Err(SearchError::unsupported_filter(attribute, FilterOp::Equals)),
        }
    }
}
