//! Strategy Routing Tests
//!
//! Which strategy serves a request for a given capability declaration:
//! - Name shortcuts
//! - Operator fallbacks between equality and substring
//! - Manual filtering over listings and full imports
//! - Enrichment of summary listings
//! - Backend failure propagation

use capsearch::connector::{ConnectorError, Fixture};
use capsearch::{
    CapabilityDescriptor, CollectingSink, EngineConfig, FilterCapability, MemoryConnector,
    PagingRequest, Predicate, Record, SearchEngine, SearchError, SearchOutcome, SearchResult,
    Strategy, NAME_ATTRIBUTE,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn accounts(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            Record::new(format!("a{}", i), format!("account{}", i))
                .with_attribute("mail", format!("account{}@corp.example", i))
                .with_attribute("region", if i % 3 == 0 { "emea" } else { "amer" })
        })
        .collect()
}

fn run(
    connector: &MemoryConnector,
    predicate: &Predicate,
    paging: Option<&PagingRequest>,
) -> (Vec<Record>, SearchResult<SearchOutcome>) {
    let config = EngineConfig::default();
    let engine = SearchEngine::new(connector, &config);
    let mut sink: CollectingSink<Record> = CollectingSink::new();
    let result = engine.search(Some(predicate), &mut sink, paging);
    (sink.into_records(), result)
}

// =============================================================================
// Name Shortcut Tests
// =============================================================================

/// Name lookup is preferred over scanning a listing that carries names.
#[test]
fn test_name_lookup_preferred_over_scan() {
    let caps = CapabilityDescriptor::new()
        .with_name_lookup()
        .with_name_in_listing();
    let connector = MemoryConnector::new(caps, accounts(10));

    let pred = Predicate::equals(NAME_ATTRIBUTE, "Account7");
    let (records, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::NameLookup);
    assert_eq!(records[0].id, "a7");
    assert_eq!(connector.calls().list, 0);
}

/// The scan stops at the backend's page cap.
#[test]
fn test_name_scan_bounded_by_max_page() {
    let caps = CapabilityDescriptor::new()
        .with_name_in_listing()
        .with_max_page_size(5);
    let connector = MemoryConnector::new(caps, accounts(10));

    let pred = Predicate::equals(NAME_ATTRIBUTE, "account8");
    let (records, result) = run(&connector, &pred, None);

    let outcome = result.unwrap();
    assert_eq!(outcome.strategy, Strategy::NameScan);
    assert_eq!(outcome.emitted, 0);
    assert!(records.is_empty());

    let pred = Predicate::equals(NAME_ATTRIBUTE, "account3");
    let (records, _) = run(&connector, &pred, None);
    assert_eq!(records.len(), 1);
}

// =============================================================================
// Operator Fallback Tests
// =============================================================================

/// Equality on a substring-only attribute may return a superset.
#[test]
fn test_equality_via_substring_superset() {
    let connector = MemoryConnector::new(CapabilityDescriptor::new(), accounts(12))
        .with_filter(FilterCapability::new().with_substring(["mail"]));

    let pred = Predicate::equals("mail", "account1");
    let (records, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::SubstringForEquals);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a10", "a11", "a12"]);
}

/// Substring on an equality-only attribute is answered exactly.
#[test]
fn test_substring_via_equality() {
    let connector = MemoryConnector::new(CapabilityDescriptor::new(), accounts(12))
        .with_filter(FilterCapability::new().with_equality(["region"]));

    let pred = Predicate::contains("region", "emea");
    let (records, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::EqualsForSubstring);
    assert_eq!(records.len(), 4);
}

/// A native substring filter wins over manual filtering of a listed attribute.
#[test]
fn test_native_substring_preferred_for_listed_attribute() {
    let caps = CapabilityDescriptor::new().with_listed_attributes(["mail"]);
    let connector = MemoryConnector::new(caps, accounts(12))
        .with_filter(FilterCapability::new().with_substring(["mail"]));

    let pred = Predicate::contains("mail", "account1");
    let (_, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::NativeFilter);
}

/// A natively paginating backend owns the continuation state of filtered pages.
#[test]
fn test_native_filter_continuation() {
    let caps = CapabilityDescriptor::new().with_native_pagination();
    let connector = MemoryConnector::new(caps, accounts(30))
        .with_filter(FilterCapability::new().with_equality(["region"]));
    let pred = Predicate::equals("region", "emea");

    let (records, result) = run(&connector, &pred, Some(&PagingRequest::new(4, 1)));
    let outcome = result.unwrap();
    assert_eq!(outcome.strategy, Strategy::NativeFilter);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a3", "a6", "a9", "a12"]);
    assert_eq!(outcome.continuation_token.as_deref(), Some("4"));
    assert!(!outcome.no_more_results);

    let paging = PagingRequest::new(4, 1).with_cookie("4");
    let (records, result) = run(&connector, &pred, Some(&paging));
    let outcome = result.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a15", "a18", "a21", "a24"]);
    assert_eq!(outcome.continuation_token.as_deref(), Some("8"));
    assert!(!outcome.no_more_results);

    let paging = PagingRequest::new(4, 1).with_cookie("8");
    let (records, result) = run(&connector, &pred, Some(&paging));
    let outcome = result.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a27", "a30"]);
    assert_eq!(outcome.continuation_token, None);
    assert!(outcome.no_more_results);

    assert!(connector.list_calls().iter().all(|c| c.filter.is_some()));
}

// =============================================================================
// Manual Filtering Tests
// =============================================================================

/// Manual equality pages through the local matches.
#[test]
fn test_manual_equality_paging() {
    let caps = CapabilityDescriptor::new().with_listed_attributes(["region"]);
    let connector = MemoryConnector::new(caps, accounts(30));

    let pred = Predicate::equals("region", "emea");
    let paging = PagingRequest::new(4, 5);
    let (records, result) = run(&connector, &pred, Some(&paging));

    let outcome = result.unwrap();
    assert_eq!(outcome.strategy, Strategy::ManualFilter);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a15", "a18", "a21", "a24"]);
    assert!(!outcome.no_more_results);
    assert_eq!(outcome.continuation_token, None);
}

/// Backends that demand it get substring filtering over a full import.
#[test]
fn test_substring_over_full_import() {
    let caps = CapabilityDescriptor::new()
        .with_native_pagination()
        .with_listed_attributes(["mail"])
        .with_full_import_filtering()
        .with_max_page_size(4);
    let connector = MemoryConnector::new(caps, accounts(10));

    let pred = Predicate::contains("mail", "account1");
    let (records, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::ManualImportFilter);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a10"]);
    // 10 records in pages of 4
    assert_eq!(connector.calls().list, 3);
    // only the matches are enriched
    assert_eq!(connector.calls().fetch_by_id, 2);
}

/// Manual And intersects per-term windows in first-term order.
#[test]
fn test_manual_and() {
    let caps = CapabilityDescriptor::new().with_full_detail_listing();
    let connector = MemoryConnector::new(caps, accounts(30));

    let pred = Predicate::and([
        Predicate::contains("mail", "account2"),
        Predicate::equals("region", "emea"),
    ]);
    let (records, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::AndManual);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a21", "a24", "a27"]);
}

// =============================================================================
// Enrichment Tests
// =============================================================================

/// Summary records never reach the sink.
#[test]
fn test_summary_listing_enriched() {
    let caps = CapabilityDescriptor::new().with_listed_attributes(["region"]);
    let connector = MemoryConnector::new(caps, accounts(9));

    let pred = Predicate::equals("region", "emea");
    let (records, _) = run(&connector, &pred, None);

    assert_eq!(records.len(), 3);
    for record in &records {
        assert!(!record.name.is_empty());
        assert!(record.attributes.contains_key("mail"));
    }
}

/// Closures work as sinks and see batches in order.
#[test]
fn test_closure_sink() {
    let caps = CapabilityDescriptor::new()
        .with_native_pagination()
        .with_full_detail_listing();
    let connector = MemoryConnector::new(caps, accounts(25));
    let config = EngineConfig::default().with_import_batch_size(10);
    let engine = SearchEngine::new(&connector, &config);

    let mut batches = Vec::new();
    let mut sink = |batch: Vec<Record>| batches.push(batch.len());
    engine.search(None, &mut sink, None).unwrap();

    assert_eq!(batches, vec![10, 10, 5]);
}

// =============================================================================
// Backend Failure Tests
// =============================================================================

/// Backend failures propagate unchanged and emit nothing.
#[test]
fn test_backend_failure_propagates() {
    let connector = MemoryConnector::new(CapabilityDescriptor::new(), accounts(5))
        .with_filter(FilterCapability::new().with_equality(["region"]))
        .with_listing_failure("connection refused");

    let pred = Predicate::equals("region", "emea");
    let (records, result) = run(&connector, &pred, None);

    match result {
        Err(SearchError::Backend(ConnectorError::Unavailable(message))) => {
            assert_eq!(message, "connection refused");
        }
        other => panic!("expected backend failure, got {:?}", other),
    }
    assert!(records.is_empty());
}

/// Fixtures drive the same routing as built connectors.
#[test]
fn test_fixture_connector() {
    let fixture: Fixture = serde_json::from_value(json!({
        "capabilities": {"listing_returns_full_detail": true},
        "filter": {"substring": ["mail"]},
        "records": [
            {"id": "a1", "name": "ada", "attributes": {"mail": "ada@corp.example"}},
            {"id": "a2", "name": "bob", "attributes": {"mail": "bob@else.example"}}
        ]
    }))
    .unwrap();
    let connector = MemoryConnector::from_fixture(fixture);

    let pred = Predicate::contains("mail", "corp");
    let (records, result) = run(&connector, &pred, None);

    assert_eq!(result.unwrap().strategy, Strategy::NativeFilter);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "ada");
}
