//! Substring strategy
//!
//! Native substring filtering is preferred. For attributes the listing does
//! not return, a backend that only filters by equality is asked for an exact
//! match instead, and the identifier (plus the display name when listed) can
//! still be matched locally. Backends that require it have manual filtering
//! run over a full import.

use crate::connector::{Connector, NativeFilter, ResultSink};
use crate::model::{Condition, FilterOp, Paginator};
use crate::observability::{log_event_with_fields, Event};

use super::dispatcher::SearchEngine;
use super::errors::{SearchError, SearchResult};
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    pub(super) fn search_contains(
        &self,
        condition: Condition<'_>,
        paginator: &mut Paginator,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        let caps = self.connector.capability_view();
        let attribute = condition.attribute;
        let full_import = caps.full_import_filtering();

        if caps.native(attribute, FilterOp::Contains) {
            let filter = NativeFilter::single(FilterOp::Contains, attribute, condition.value);
            return self.fetch_native(filter, Strategy::NativeFilter, paginator, sink);
        }

        if caps.is_enumerable(attribute) {
            return self.filter_manually(condition, full_import, paginator, sink);
        }

        if caps.native(attribute, FilterOp::Equals) {
            log_event_with_fields(
                Event::ApproximateFilter,
                &[("attribute", attribute), ("requested", "contains"), ("used", "equals")],
            );
            let filter = NativeFilter::single(FilterOp::Equals, attribute, condition.value);
            return self.fetch_native(filter, Strategy::EqualsForSubstring, paginator, sink);
        }

        if caps.matchable_locally(attribute) {
            return self.filter_manually(condition, full_import, paginator, sink);
        }

        Err(SearchError::unsupported_filter(attribute, FilterOp::Contains))
    }
}
