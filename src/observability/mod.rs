//! Observability for capsearch
//!
//! Search events are a closed catalogue ([`Event`]) emitted through
//! `tracing`. Fields are rendered in deterministic (alphabetical) order so
//! one event always produces the same line for the same inputs.
//!
//! # Usage
//!
//! ```ignore
//! use capsearch::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::StrategySelected, &[("strategy", "FILTER_NATIVE")]);
//! ```

mod events;

pub use events::Event;

use std::fmt;

use tracing::{debug, error, info, warn};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routing and backend detail
    Debug = 0,
    /// Normal operations
    Info = 1,
    /// Degraded results or rejected requests
    Warn = 2,
    /// Failed operations
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let rendered = render_fields(fields);
    let name = event.as_str();
    match event.severity() {
        Severity::Debug => debug!(event = name, fields = %rendered),
        Severity::Info => info!(event = name, fields = %rendered),
        Severity::Warn => warn!(event = name, fields = %rendered),
        Severity::Error => error!(event = name, fields = %rendered),
    }
}

/// Render fields as `key=value` pairs sorted by key
fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}
