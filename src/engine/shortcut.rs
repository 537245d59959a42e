//! Identifier and display-name shortcuts
//!
//! Checked before any generic strategy:
//! - Equals on the identifier is a single fetch by id
//! - Equals on the display name is a name lookup, or a scan of one bounded
//!   listing when the listing carries names
//! - Contains on the display name is answered by exact name lookup when the
//!   listing cannot carry names
//!
//! A shortcut returns `None` when the generic strategies should handle the
//! predicate instead.

use crate::connector::{Connector, ResultSink};
use crate::model::{Condition, Criteria, FilterOp, Searchable, NAME_ATTRIBUTE, UID_ATTRIBUTE};
use crate::observability::{log_event_with_fields, Event};

use super::dispatcher::SearchEngine;
use super::errors::{SearchError, SearchResult};
use super::outcome::{SearchOutcome, Strategy};

impl<'a, C: Connector> SearchEngine<'a, C> {
    pub(super) fn resolve_shortcut(
        &self,
        criteria: &Criteria<'_>,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<Option<SearchOutcome>> {
        let Criteria::Single(condition) = criteria else {
            return Ok(None);
        };

        if condition.is_uid() && condition.op == FilterOp::Equals {
            return self.lookup_by_id(condition.value, sink).map(Some);
        }
        if condition.is_name() {
            return self.resolve_name(condition, sink);
        }
        Ok(None)
    }

    fn lookup_by_id(
        &self,
        id: &str,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        if id.trim().is_empty() {
            return Err(SearchError::invalid_value(
                UID_ATTRIBUTE,
                "identifier must not be blank",
            ));
        }

        self.selected(Strategy::IdentifierLookup, Some(UID_ATTRIBUTE));
        let found = self.connector.fetch_by_id(id, None)?;
        Ok(Self::emit_single(Strategy::IdentifierLookup, found, sink))
    }

    fn resolve_name(
        &self,
        condition: &Condition<'_>,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<Option<SearchOutcome>> {
        let caps = self.connector.capability_view();

        match condition.op {
            FilterOp::Equals => {
                if caps.name_lookup() {
                    self.lookup_by_name(condition.value, sink).map(Some)
                } else if caps.name_in_listing() {
                    self.scan_by_name(condition.value, sink).map(Some)
                } else {
                    Err(SearchError::unsupported_filter(NAME_ATTRIBUTE, FilterOp::Equals))
                }
            }
            // Exact lookup stands in for the substring match here.
            FilterOp::Contains if caps.name_lookup() && !caps.name_in_listing() => {
                self.lookup_by_name(condition.value, sink).map(Some)
            }
            FilterOp::Contains => Ok(None),
        }
    }

    fn lookup_by_name(
        &self,
        name: &str,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        self.selected(Strategy::NameLookup, Some(NAME_ATTRIBUTE));
        let found = self.connector.fetch_by_name(name)?;
        Ok(Self::emit_single(Strategy::NameLookup, found, sink))
    }

    fn scan_by_name(
        &self,
        name: &str,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchResult<SearchOutcome> {
        self.selected(Strategy::NameScan, Some(NAME_ATTRIBUTE));

        let context = self.connector.prefetch_context()?;
        let listing = self.list_bounded(&context)?;
        let found = listing
            .into_iter()
            .find(|r| FilterOp::Equals.matches(r.display_name(), name));

        let emitted = match found {
            Some(record) => self.emit(vec![record], Some(&context), sink)?,
            None => 0,
        };
        Self::log_shortcut(Strategy::NameScan, emitted > 0);
        Ok(SearchOutcome::complete(
            Strategy::NameScan,
            emitted,
            usize::from(emitted > 0),
        ))
    }

    fn emit_single(
        strategy: Strategy,
        found: Option<C::Record>,
        sink: &mut dyn ResultSink<C::Record>,
    ) -> SearchOutcome {
        Self::log_shortcut(strategy, found.is_some());
        match found {
            Some(record) => {
                sink.accept(vec![record]);
                SearchOutcome::complete(strategy, 1, 1)
            }
            None => SearchOutcome::complete(strategy, 0, 0),
        }
    }

    fn log_shortcut(strategy: Strategy, hit: bool) {
        let event = if hit {
            Event::ShortcutHit
        } else {
            Event::ShortcutMiss
        };
        log_event_with_fields(event, &[("strategy", strategy.as_str())]);
    }
}
