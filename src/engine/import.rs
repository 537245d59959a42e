//! Bulk import
//!
//! Delivers every record in batches of the configured import size, capped by
//! the backend's maximum page. A natively paginating backend is walked page by
//! page until it reports the end or returns a short page; otherwise one
//! unbounded listing is cut into batches locally.

use crate::connector::{Connector, FetchContext, ResultSink};
use crate::model::Paginator;
use crate::observability::{log_event_with_fields, Event};

use super::dispatcher::SearchEngine;
use super::errors::SearchResult;
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    pub(super) fn import(
        &self,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        let strategy = if self.connector.capability_view().native_pagination() {
            Strategy::NativeImport
        } else {
            Strategy::ManualImport
        };
        self.selected(strategy, None);

        let mut emitted = 0;
        let mut pages = 0;
        self.import_pages(|page, context| {
            let count = self.emit(page, Some(context), &mut *sink)?;
            if count > 0 {
                emitted += count;
                pages += 1;
            }
            Ok(())
        })?;

        Ok(SearchOutcome::complete(strategy, emitted, pages))
    }

    /// Collects the full record set without enrichment
    pub(super) fn materialize(&self) -> SearchResult<Vec<C::Record>> {
        let mut records = Vec::new();
        self.import_pages(|page, _| {
            records.extend(page);
            Ok(())
        })?;
        Ok(records)
    }

    /// Walks the full record set, handing each non-empty batch to `on_page`
    fn import_pages<F>(&self, mut on_page: F) -> SearchResult<()>
    where
        F: FnMut(Vec<C::Record>, &FetchContext) -> SearchResult<()>,
    {
        let caps = self.connector.capability_view();
        let batch = caps.import_batch_size(self.config.import_batch_size).max(1);
        let mut pages = 0usize;
        let mut total = 0usize;

        if caps.native_pagination() {
            let mut paginator = Paginator::new(batch, 0);
            loop {
                let context = self.connector.prefetch_context()?;
                let page = self
                    .connector
                    .list(None, Some(&mut paginator), None, Some(&context))?;
                let returned = page.len();
                Self::log_import_page(paginator.offset(), returned);

                if returned > 0 {
                    pages += 1;
                    total += returned;
                    on_page(page, &context)?;
                }
                if paginator.no_more_results() || returned < batch {
                    break;
                }
                paginator.advance(returned);
                paginator.set_continuation_token(None);
            }
        } else {
            let context = self.connector.prefetch_context()?;
            let mut remaining = self.connector.list(None, None, None, Some(&context))?;
            let mut offset = 0;
            while !remaining.is_empty() {
                let rest = if remaining.len() > batch {
                    remaining.split_off(batch)
                } else {
                    Vec::new()
                };
                let returned = remaining.len();
                Self::log_import_page(offset, returned);

                pages += 1;
                total += returned;
                offset += returned;
                on_page(remaining, &context)?;
                remaining = rest;
            }
        }

        let pages = pages.to_string();
        let total = total.to_string();
        log_event_with_fields(
            Event::ImportComplete,
            &[("pages", pages.as_str()), ("records", total.as_str())],
        );
        Ok(())
    }

    fn log_import_page(offset: usize, returned: usize) {
        let offset = offset.to_string();
        let returned = returned.to_string();
        log_event_with_fields(
            Event::ImportPage,
            &[("offset", offset.as_str()), ("returned", returned.as_str())],
        );
    }
}
