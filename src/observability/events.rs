//! Observable search events
//!
//! Events are explicit and typed; each has a stable name and a fixed
//! severity.

use std::fmt;

use super::Severity;

/// Observable events during search execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Engine configuration loaded
    ConfigLoaded,

    // Search lifecycle
    /// Search received
    SearchBegin,
    /// Execution strategy chosen
    StrategySelected,
    /// Search completed
    SearchComplete,
    /// Search rejected before any emission
    SearchRejected,
    /// Backend failure aborted the search
    SearchFailed,

    // Shortcuts
    /// Single-record lookup found a record
    ShortcutHit,
    /// Single-record lookup found nothing
    ShortcutMiss,

    // Backend traffic
    /// Listing call returned
    BackendList,
    /// Filter pushed down to the backend as an approximation
    ApproximateFilter,

    // Bulk import
    /// Import page received
    ImportPage,
    /// Import finished
    ImportComplete,

    // Enrichment
    /// Identifier fetch during enrichment found nothing
    EnrichMissing,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::SearchBegin => "SEARCH_BEGIN",
            Event::StrategySelected => "STRATEGY_SELECTED",
            Event::SearchComplete => "SEARCH_COMPLETE",
            Event::SearchRejected => "SEARCH_REJECTED",
            Event::SearchFailed => "SEARCH_FAILED",

            Event::ShortcutHit => "SHORTCUT_HIT",
            Event::ShortcutMiss => "SHORTCUT_MISS",

            Event::BackendList => "BACKEND_LIST",
            Event::ApproximateFilter => "APPROXIMATE_FILTER",

            Event::ImportPage => "IMPORT_PAGE",
            Event::ImportComplete => "IMPORT_COMPLETE",

            Event::EnrichMissing => "ENRICH_MISSING",
        }
    }

    /// Returns the severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SearchRejected | Event::ApproximateFilter | Event::EnrichMissing => {
                Severity::Warn
            }
            Event::SearchFailed => Severity::Error,
            Event::ConfigLoaded | Event::SearchComplete | Event::ImportComplete => Severity::Info,
            _ => Severity::Debug,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_stable() {
        assert_eq!(Event::SearchBegin.as_str(), "SEARCH_BEGIN");
        assert_eq!(Event::StrategySelected.to_string(), "STRATEGY_SELECTED");
        assert_eq!(Event::EnrichMissing.as_str(), "ENRICH_MISSING");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::SearchFailed.severity(), Severity::Error);
        assert_eq!(Event::ApproximateFilter.severity(), Severity::Warn);
        assert_eq!(Event::SearchComplete.severity(), Severity::Info);
        assert_eq!(Event::BackendList.severity(), Severity::Debug);
    }
}
