//! Search model: records, predicates and paging state
//!
//! These types are shared by the connector contract and the engine.

mod paging;
mod predicate;
mod record;

pub use paging::{PagingRequest, Paginator};
pub use predicate::{AttributeFilter, Condition, Criteria, FilterOp, Predicate, PredicateError};
pub use record::{Record, Searchable, NAME_ATTRIBUTE, UID_ATTRIBUTE};
