//! In-memory reference connector
//!
//! Holds a fixed record set and behaves like a backend with whatever
//! capabilities it is given: server-side filtering, native pagination with
//! continuation tokens, summary listings projected to the listed attributes,
//! and name lookup. Every call is counted so callers can verify how many
//! backend round trips a search issued.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::capability::{CapabilityDescriptor, FilterCapability};
use crate::model::{FilterOp, Paginator, Record};

use super::errors::{ConnectorError, ConnectorResult};
use super::{Connector, FetchContext, NativeFilter};

/// Serializable connector definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub capabilities: CapabilityDescriptor,
    #[serde(default)]
    pub filter: Option<FilterCapability>,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Snapshot of backend calls issued so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub fetch_by_id: usize,
    pub fetch_by_name: usize,
    pub prefetch: usize,
}

/// Arguments of one recorded listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCall {
    pub filter: Option<NativeFilter>,
    pub offset: Option<usize>,
    pub page_size: Option<usize>,
    pub result_cap: Option<usize>,
    pub returned: usize,
}

#[derive(Debug, Default)]
struct Counters {
    list: AtomicUsize,
    fetch_by_id: AtomicUsize,
    fetch_by_name: AtomicUsize,
    prefetch: AtomicUsize,
}

/// Connector over an in-memory record set
#[derive(Debug)]
pub struct MemoryConnector {
    capabilities: CapabilityDescriptor,
    filter: Option<FilterCapability>,
    records: Vec<Record>,
    counters: Counters,
    list_log: Mutex<Vec<ListCall>>,
    listing_failure: Option<String>,
}

impl MemoryConnector {
    /// Creates a connector with the given capabilities and records
    pub fn new(capabilities: CapabilityDescriptor, records: Vec<Record>) -> Self {
        Self {
            capabilities,
            filter: None,
            records,
            counters: Counters::default(),
            list_log: Mutex::new(Vec::new()),
            listing_failure: None,
        }
    }

    /// Creates a connector from a fixture
    pub fn from_fixture(fixture: Fixture) -> Self {
        let mut connector = Self::new(fixture.capabilities, fixture.records);
        connector.filter = fixture.filter;
        connector
    }

    /// Declares native filtering support
    pub fn with_filter(mut self, filter: FilterCapability) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Makes every listing call fail as unavailable
    pub fn with_listing_failure(mut self, message: impl Into<String>) -> Self {
        self.listing_failure = Some(message.into());
        self
    }

    /// Returns the backend calls issued so far
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            list: self.counters.list.load(Ordering::SeqCst),
            fetch_by_id: self.counters.fetch_by_id.load(Ordering::SeqCst),
            fetch_by_name: self.counters.fetch_by_name.load(Ordering::SeqCst),
            prefetch: self.counters.prefetch.load(Ordering::SeqCst),
        }
    }

    /// Returns the recorded listing calls in order
    pub fn list_calls(&self) -> Vec<ListCall> {
        self.list_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Shapes a stored record the way this backend's listing returns it
    fn summarize(&self, record: &Record) -> Record {
        if self.capabilities.listing_returns_full_detail {
            return record.clone();
        }
        let mut summary = record.project(&self.capabilities.listed_attributes);
        if !self.capabilities.listing_includes_name {
            summary.name.clear();
        }
        summary
    }

    fn record_call(&self, call: ListCall) {
        if let Ok(mut log) = self.list_log.lock() {
            log.push(call);
        }
    }
}

impl Connector for MemoryConnector {
    type Record = Record;

    fn capabilities(&self) -> &CapabilityDescriptor {
        &self.capabilities
    }

    fn filter_capability(&self) -> Option<&FilterCapability> {
        self.filter.as_ref()
    }

    fn list(
        &self,
        filter: Option<&NativeFilter>,
        paginator: Option<&mut Paginator>,
        result_cap: Option<usize>,
        _context: Option<&FetchContext>,
    ) -> ConnectorResult<Vec<Record>> {
        self.counters.list.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.listing_failure {
            return Err(ConnectorError::Unavailable(message.clone()));
        }

        let matching: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| filter.map_or(true, |f| f.matches(*r)))
            .collect();
        let total = matching.len();

        let cap = match (result_cap, self.capabilities.max_page_size) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let (offset, page_size) = (
            paginator.as_ref().map(|p| p.offset()),
            paginator.as_ref().map(|p| p.page_size()),
        );

        let page: Vec<Record> = match paginator {
            Some(paginator) if self.capabilities.native_pagination => {
                let start = paginator
                    .continuation_token()
                    .and_then(|t| t.parse::<usize>().ok())
                    .unwrap_or(paginator.offset());
                let size = cap.map_or(paginator.page_size(), |c| c.min(paginator.page_size()));
                let end = start.saturating_add(size).min(total);

                let page = matching
                    .iter()
                    .skip(start)
                    .take(size)
                    .map(|r| self.summarize(r))
                    .collect();

                paginator.set_no_more_results(end >= total);
                paginator.set_continuation_token((end < total).then(|| end.to_string()));
                page
            }
            _ => matching
                .iter()
                .take(cap.unwrap_or(usize::MAX))
                .map(|r| self.summarize(r))
                .collect(),
        };

        self.record_call(ListCall {
            filter: filter.cloned(),
            offset,
            page_size,
            result_cap,
            returned: page.len(),
        });

        Ok(page)
    }

    fn fetch_by_id(
        &self,
        id: &str,
        _context: Option<&FetchContext>,
    ) -> ConnectorResult<Option<Record>> {
        self.counters.fetch_by_id.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn fetch_by_name(&self, name: &str) -> ConnectorResult<Option<Record>> {
        self.counters.fetch_by_name.fetch_add(1, Ordering::SeqCst);
        if !self.capabilities.supports_name_lookup {
            return Err(ConnectorError::Unsupported("fetch_by_name"));
        }
        Ok(self
            .records
            .iter()
            .find(|r| FilterOp::Equals.matches(&r.name, name))
            .cloned())
    }

    fn prefetch_context(&self) -> ConnectorResult<FetchContext> {
        let generation = self.counters.prefetch.fetch_add(1, Ordering::SeqCst);
        let mut context = FetchContext::new();
        context.insert("generation", json!(generation));
        Ok(context)
    }
}
