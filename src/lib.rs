//! capsearch - capability-aware search over heterogeneous backend connectors
//!
//! A search request (optional predicate, optional paging) is answered by
//! routing it to the cheapest correct strategy for what the backend declares
//! it can do: native filtering, native pagination, summary or full listings.

pub mod capability;
pub mod cli;
pub mod config;
pub mod connector;
pub mod engine;
pub mod model;
pub mod observability;

pub use capability::{Capabilities, CapabilityDescriptor, FilterCapability};
pub use config::EngineConfig;
pub use connector::{CollectingSink, Connector, MemoryConnector, NativeFilter, ResultSink};
pub use engine::{SearchEngine, SearchError, SearchOutcome, SearchResult, Strategy};
pub use model::{PagingRequest, Predicate, Record, Searchable, NAME_ATTRIBUTE, UID_ATTRIBUTE};
