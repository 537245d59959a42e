//! Search outcome and execution strategy

use serde::{Serialize, Serializer};

use crate::model::Paginator;

/// Strategy that served a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Single-record lookup by identifier
    IdentifierLookup,
    /// Single-record lookup by display name
    NameLookup,
    /// Display-name match over a plain listing
    NameScan,
    /// Page served by native pagination
    NativePage,
    /// Page sliced locally from one listing
    ManualPage,
    /// Full import over native pagination
    NativeImport,
    /// Full import sliced locally from one listing
    ManualImport,
    /// Filter pushed down with the requested operator
    NativeFilter,
    /// Equality answered by native substring filtering
    SubstringForEquals,
    /// Substring answered by native equality filtering
    EqualsForSubstring,
    /// Filter applied locally over the bounded listing
    ManualFilter,
    /// Filter applied locally over a full import
    ManualImportFilter,
    /// Both And terms pushed down in one call
    AndNative,
    /// And evaluated locally by intersecting per-term candidates
    AndManual,
}

impl Strategy {
    /// Returns the stable strategy name
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::IdentifierLookup => "UID_LOOKUP",
            Strategy::NameLookup => "NAME_LOOKUP",
            Strategy::NameScan => "NAME_SCAN",
            Strategy::NativePage => "PAGE_NATIVE",
            Strategy::ManualPage => "PAGE_MANUAL",
            Strategy::NativeImport => "IMPORT_NATIVE",
            Strategy::ManualImport => "IMPORT_MANUAL",
            Strategy::NativeFilter => "FILTER_NATIVE",
            Strategy::SubstringForEquals => "FILTER_SUBSTRING_FOR_EQUALS",
            Strategy::EqualsForSubstring => "FILTER_EQUALS_FOR_SUBSTRING",
            Strategy::ManualFilter => "FILTER_MANUAL",
            Strategy::ManualImportFilter => "FILTER_MANUAL_IMPORT",
            Strategy::AndNative => "AND_NATIVE",
            Strategy::AndManual => "AND_MANUAL",
        }
    }
}

impl Serialize for Strategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Result of one search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Strategy that served the search
    pub strategy: Strategy,
    /// Records handed to the sink
    pub emitted: usize,
    /// Batches handed to the sink
    pub pages: usize,
    /// No further page exists after this one
    pub no_more_results: bool,
    /// Token for the next page, if the backend issued one
    pub continuation_token: Option<String>,
}

impl SearchOutcome {
    /// Outcome of a search that finished the result set
    pub fn complete(strategy: Strategy, emitted: usize, pages: usize) -> Self {
        Self {
            strategy,
            emitted,
            pages,
            no_more_results: true,
            continuation_token: None,
        }
    }

    /// Outcome of a single page, taking continuation state from the paginator
    pub fn page(strategy: Strategy, emitted: usize, paginator: &Paginator) -> Self {
        Self {
            strategy,
            emitted,
            pages: usize::from(emitted > 0),
            no_more_results: paginator.no_more_results(),
            continuation_token: paginator.continuation_token().map(str::to_string),
        }
    }
}
