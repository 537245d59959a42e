//! Shared fixtures for engine unit tests

use crate::config::EngineConfig;
use crate::connector::{CollectingSink, MemoryConnector};
use crate::model::{PagingRequest, Predicate, Record};

use super::dispatcher::SearchEngine;
use super::errors::SearchResult;
use super::outcome::SearchOutcome;

/// `count` people: odd ids in dev, even ids in ops
pub(crate) fn directory(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            Record::new(format!("u{}", i), format!("user{}", i))
                .with_attribute("dept", if i % 2 == 0 { "ops" } else { "dev" })
                .with_attribute("phone", format!("555-{:04}", i))
                .with_attribute("mail", format!("user{}@example.com", i))
        })
        .collect()
}

pub(crate) fn run(
    connector: &MemoryConnector,
    config: &EngineConfig,
    predicate: Option<&Predicate>,
    paging: Option<&PagingRequest>,
) -> (CollectingSink<Record>, SearchResult<SearchOutcome>) {
    let engine = SearchEngine::new(connector, config);
    let mut sink: CollectingSink<Record> = CollectingSink::new();
    let result = engine.search(predicate, &mut sink, paging);
    (sink, result)
}

pub(crate) fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
