//! Pagination without a predicate
//!
//! A natively paginating backend serves the page itself and owns the
//! continuation state. Otherwise one listing is sliced locally: a result set
//! no larger than one page is returned whole regardless of the offset.

use crate::connector::{Connector, ResultSink};
use crate::model::{PagingRequest, Paginator};

use super::dispatcher::SearchEngine;
use super::errors::SearchResult;
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    pub(super) fn paginate(
        &self,
        request: &PagingRequest,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        let mut paginator = Paginator::from_request(Some(request), self.config.default_page_size);
        let native = self.connector.capability_view().native_pagination();
        let strategy = if native {
            Strategy::NativePage
        } else {
            Strategy::ManualPage
        };
        self.selected(strategy, None);

        let context = self.connector.prefetch_context()?;
        let records = self
            .connector
            .list(None, Some(&mut paginator), None, Some(&context))?;

        let page = if native {
            records
        } else {
            let total = records.len();
            paginator.set_continuation_token(None);
            if total <= paginator.page_size() {
                paginator.set_no_more_results(true);
                records
            } else if paginator.offset() >= total {
                paginator.set_no_more_results(true);
                Vec::new()
            } else {
                paginator.set_no_more_results(paginator.exhausts(total));
                paginator.window(records)
            }
        };

        let emitted = self.emit(page, Some(&context), sink)?;
        Ok(SearchOutcome::page(strategy, emitted, &paginator))
    }
}
