//! Backend access shared by the strategies
//!
//! - bounded listing (one call, capped at the backend's maximum page)
//! - native filtered fetch, sliced locally when the backend cannot paginate
//! - manual filtering over a bounded listing or a full import
//!
//! Locally sliced results never carry a continuation token.

use crate::connector::{Connector, FetchContext, NativeFilter, ResultSink};
use crate::model::{Condition, Paginator};
use crate::observability::{log_event_with_fields, Event};

use super::dispatcher::SearchEngine;
use super::errors::SearchResult;
use super::filters::ManualFilter;
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    /// Lists records once, up to the backend's maximum page size
    pub(super) fn list_bounded(&self, context: &FetchContext) -> SearchResult<Vec<C::Record>> {
        let cap = self.connector.capability_view().max_page_size();
        let records = self.connector.list(None, None, cap, Some(context))?;
        Self::log_listing(records.len(), false);
        Ok(records)
    }

    /// Pushes a filter down to the backend and emits one page
    pub(super) fn fetch_native(
        &self,
        filter: NativeFilter,
        strategy: Strategy,
        paginator: &mut Paginator,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        self.selected(strategy, filter.terms.first().map(|t| t.attribute.as_str()));

        let context = self.connector.prefetch_context()?;
        let records = self
            .connector
            .list(Some(&filter), Some(&mut *paginator), None, Some(&context))?;
        Self::log_listing(records.len(), true);

        let page = if self.connector.capability_view().native_pagination() {
            records
        } else {
            slice_window(records, paginator)
        };

        let emitted = self.emit(page, Some(&context), sink)?;
        Ok(SearchOutcome::page(strategy, emitted, paginator))
    }

    /// Filters locally and emits the paginator's window of the matches.
    ///
    /// With `full_import` the candidates come from a complete import rather
    /// than one bounded listing.
    pub(super) fn filter_manually(
        &self,
        condition: Condition<'_>,
        full_import: bool,
        paginator: &mut Paginator,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        let strategy = if full_import {
            Strategy::ManualImportFilter
        } else {
            Strategy::ManualFilter
        };
        self.selected(strategy, Some(condition.attribute));

        let context = self.connector.prefetch_context()?;
        let candidates = if full_import {
            self.materialize()?
        } else {
            self.list_bounded(&context)?
        };

        let matches = ManualFilter::retain(candidates, &condition);
        let page = slice_window(matches, paginator);
        let emitted = self.emit(page, Some(&context), sink)?;
        Ok(SearchOutcome::page(strategy, emitted, paginator))
    }

    fn log_listing(returned: usize, filtered: bool) {
        let returned = returned.to_string();
        log_event_with_fields(
            Event::BackendList,
            &[
                ("returned", returned.as_str()),
                ("filtered", if filtered { "true" } else { "false" }),
            ],
        );
    }
}

/// Cuts the paginator's window from a complete result set and records
/// whether later pages exist
pub(super) fn slice_window<T>(records: Vec<T>, paginator: &mut Paginator) -> Vec<T> {
    paginator.set_no_more_results(paginator.exhausts(records.len()));
    paginator.set_continuation_token(None);
    paginator.window(records)
}
