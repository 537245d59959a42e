//! Result enrichment and dispatch
//!
//! When the backend's listing returns summaries, every record of a batch is
//! replaced by its identifier fetch before the batch reaches the sink. Order
//! is preserved. A record that disappeared between listing and fetch is
//! dropped and logged.

use crate::connector::{Connector, FetchContext, ResultSink};
use crate::model::Searchable;
use crate::observability::{log_event_with_fields, Event};

use super::dispatcher::SearchEngine;
use super::errors::SearchResult;

impl<'a, C: Connector> SearchEngine<'a, C> {
    /// Enriches a batch and hands it to the sink; returns the number emitted
    pub(super) fn emit(
        &self,
        batch: Vec<C::Record>,
        context: Option<&FetchContext>,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<usize> {
        let batch = self.enrich(batch, context)?;
        if batch.is_empty() {
            return Ok(0);
        }
        let count = batch.len();
        sink.accept(batch);
        Ok(count)
    }

    /// Replaces summary records with full records
    pub(super) fn enrich(
        &self,
        batch: Vec<C::Record>,
        context: Option<&FetchContext>,
    ) -> SearchResult<Vec<C::Record>> {
        if self.connector.capability_view().full_detail() {
            return Ok(batch);
        }

        let mut enriched = Vec::with_capacity(batch.len());
        for summary in batch {
            match self.connector.fetch_by_id(summary.uid(), context)? {
                Some(full) => enriched.push(full),
                None => log_event_with_fields(Event::EnrichMissing, &[("uid", summary.uid())]),
            }
        }
        Ok(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::directory;
    use super::*;
    use crate::capability::CapabilityDescriptor;
    use crate::config::EngineConfig;
    use crate::connector::{CollectingSink, MemoryConnector};
    use crate::model::Record;

    #[test]
    fn test_full_detail_skips_fetch() {
        let caps = CapabilityDescriptor::new().with_full_detail_listing();
        let connector = MemoryConnector::new(caps, directory(3));
        let config = EngineConfig::default();
        let engine = SearchEngine::new(&connector, &config);

        let batch = connector.list(None, None, None, None).unwrap();
        let mut sink: CollectingSink<Record> = CollectingSink::new();
        let emitted = engine.emit(batch, None, &mut sink).unwrap();

        assert_eq!(emitted, 3);
        assert_eq!(connector.calls().fetch_by_id, 0);
    }

    #[test]
    fn test_summaries_replaced_in_order() {
        let caps = CapabilityDescriptor::new().with_listed_attributes(["dept"]);
        let connector = MemoryConnector::new(caps, directory(3));
        let config = EngineConfig::default();
        let engine = SearchEngine::new(&connector, &config);

        let batch = connector.list(None, None, None, None).unwrap();
        assert_eq!(batch[0].field("phone"), None);

        let enriched = engine.enrich(batch, None).unwrap();
        let ids: Vec<_> = enriched.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
        assert!(enriched.iter().all(|r| r.field("phone").is_some()));
        assert_eq!(connector.calls().fetch_by_id, 3);
    }

    #[test]
    fn test_vanished_record_dropped() {
        let connector = MemoryConnector::new(CapabilityDescriptor::new(), directory(2));
        let config = EngineConfig::default();
        let engine = SearchEngine::new(&connector, &config);

        let batch = vec![Record::new("u1", ""), Record::new("gone", ""), Record::new("u2", "")];
        let enriched = engine.enrich(batch, None).unwrap();
        let ids: Vec<_> = enriched.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[test]
    fn test_empty_batch_not_emitted() {
        let connector = MemoryConnector::new(CapabilityDescriptor::new(), directory(2));
        let config = EngineConfig::default();
        let engine = SearchEngine::new(&connector, &config);

        let mut sink: CollectingSink<Record> = CollectingSink::new();
        assert_eq!(engine.emit(Vec::new(), None, &mut sink).unwrap(), 0);
        assert!(sink.pages().is_empty());
    }
}
