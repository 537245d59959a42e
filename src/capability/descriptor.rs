//! Backend capability descriptor
//!
//! Immutable facts an adapter declares once about its backend. The engine
//! inspects them with plain conditionals; nothing here is mutated during a
//! search.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// What a backend connector supports for listing and lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityDescriptor {
    /// Listing honours offset/page size natively
    pub native_pagination: bool,
    /// Largest page the backend returns from one listing call
    pub max_page_size: Option<usize>,
    /// Listing returns full records rather than summaries
    pub listing_returns_full_detail: bool,
    /// Listing output carries the display name
    pub listing_includes_name: bool,
    /// Single-record lookup by display name exists
    pub supports_name_lookup: bool,
    /// Attributes present in listing output
    pub listed_attributes: BTreeSet<String>,
    /// Manual filtering must materialize the full import first
    pub filter_requires_full_import: bool,
}

impl CapabilityDescriptor {
    /// Creates a descriptor with every capability off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native_pagination(mut self) -> Self {
        self.native_pagination = true;
        self
    }

    pub fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = Some(max);
        self
    }

    pub fn with_full_detail_listing(mut self) -> Self {
        self.listing_returns_full_detail = true;
        self
    }

    pub fn with_name_in_listing(mut self) -> Self {
        self.listing_includes_name = true;
        self
    }

    pub fn with_name_lookup(mut self) -> Self {
        self.supports_name_lookup = true;
        self
    }

    pub fn with_listed_attributes(
        mut self,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.listed_attributes.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_full_import_filtering(mut self) -> Self {
        self.filter_requires_full_import = true;
        self
    }

    /// Checks if a plain listing returns `attribute`
    pub fn is_enumerable(&self, attribute: &str) -> bool {
        self.listing_returns_full_detail || self.listed_attributes.contains(attribute)
    }

    /// Page size for bulk import: the configured batch, capped by the backend maximum
    pub fn import_batch_size(&self, configured: usize) -> usize {
        match self.max_page_size {
            Some(max) => configured.min(max),
            None => configured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerable_when_listed() {
        let caps = CapabilityDescriptor::new().with_listed_attributes(["mail"]);
        assert!(caps.is_enumerable("mail"));
        assert!(!caps.is_enumerable("phone"));
    }

    #[test]
    fn test_full_detail_makes_everything_enumerable() {
        let caps = CapabilityDescriptor::new().with_full_detail_listing();
        assert!(caps.is_enumerable("phone"));
    }

    #[test]
    fn test_import_batch_size_capped() {
        let caps = CapabilityDescriptor::new().with_max_page_size(50);
        assert_eq!(caps.import_batch_size(100), 50);
        assert_eq!(caps.import_batch_size(15), 15);
        assert_eq!(CapabilityDescriptor::new().import_batch_size(100), 100);
    }

    #[test]
    fn test_deserialize_defaults_off() {
        let caps: CapabilityDescriptor =
            serde_json::from_str(r#"{"native_pagination":true,"max_page_size":25}"#).unwrap();
        assert!(caps.native_pagination);
        assert_eq!(caps.max_page_size, Some(25));
        assert!(!caps.listing_returns_full_detail);
        assert!(caps.listed_attributes.is_empty());
    }
}
