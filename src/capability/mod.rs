//! Backend capability descriptions
//!
//! A backend adapter declares a [`CapabilityDescriptor`] and, optionally, a
//! [`FilterCapability`]. [`Capabilities`] is the read-only pair the engine
//! routes on.
//!
//! # Enumerability
//!
//! An attribute is enumerable when a plain listing returns it: either it is
//! declared in `listed_attributes` or the listing returns full detail.
//! Every listed record also carries its identifier, and its display name
//! when `listing_includes_name` is set, so those can always be matched
//! locally.

mod descriptor;
mod filter;

pub use descriptor::CapabilityDescriptor;
pub use filter::FilterCapability;

use crate::model::{FilterOp, NAME_ATTRIBUTE, UID_ATTRIBUTE};

/// Borrowed view over a backend's capability declarations
#[derive(Debug, Clone, Copy)]
pub struct Capabilities<'a> {
    descriptor: &'a CapabilityDescriptor,
    filter: Option<&'a FilterCapability>,
}

impl<'a> Capabilities<'a> {
    pub fn new(descriptor: &'a CapabilityDescriptor, filter: Option<&'a FilterCapability>) -> Self {
        Self { descriptor, filter }
    }

    /// Checks native filtering for one operator; absent filter capability means none
    pub fn native(&self, attribute: &str, op: FilterOp) -> bool {
        self.filter.is_some_and(|f| f.supports(attribute, op))
    }

    /// Native operator for `attribute`, preferring `preferred` when both are declared
    pub fn native_op(&self, attribute: &str, preferred: FilterOp) -> Option<FilterOp> {
        let other = match preferred {
            FilterOp::Equals => FilterOp::Contains,
            FilterOp::Contains => FilterOp::Equals,
        };
        [preferred, other]
            .into_iter()
            .find(|op| self.native(attribute, *op))
    }

    pub fn is_enumerable(&self, attribute: &str) -> bool {
        self.descriptor.is_enumerable(attribute)
    }

    /// Checks if a plain listing carries `attribute`, counting identity fields
    pub fn matchable_locally(&self, attribute: &str) -> bool {
        match attribute {
            UID_ATTRIBUTE => true,
            NAME_ATTRIBUTE => self.descriptor.listing_includes_name,
            _ => self.is_enumerable(attribute),
        }
    }

    pub fn native_pagination(&self) -> bool {
        self.descriptor.native_pagination
    }

    pub fn full_detail(&self) -> bool {
        self.descriptor.listing_returns_full_detail
    }

    pub fn max_page_size(&self) -> Option<usize> {
        self.descriptor.max_page_size
    }

    pub fn name_in_listing(&self) -> bool {
        self.descriptor.listing_includes_name
    }

    pub fn name_lookup(&self) -> bool {
        self.descriptor.supports_name_lookup
    }

    pub fn full_import_filtering(&self) -> bool {
        self.descriptor.filter_requires_full_import
    }

    /// Page size for bulk import
    pub fn import_batch_size(&self, configured: usize) -> usize {
        self.descriptor.import_batch_size(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_capability_means_no_native() {
        let descriptor = CapabilityDescriptor::new();
        let caps = Capabilities::new(&descriptor, None);
        assert!(!caps.native("mail", FilterOp::Contains));
        assert_eq!(caps.native_op("mail", FilterOp::Equals), None);
    }

    #[test]
    fn test_native_op_preference() {
        let descriptor = CapabilityDescriptor::new();
        let filter = FilterCapability::new()
            .with_equality(["mail", "dept"])
            .with_substring(["mail", "title"]);
        let caps = Capabilities::new(&descriptor, Some(&filter));

        assert_eq!(caps.native_op("mail", FilterOp::Contains), Some(FilterOp::Contains));
        assert_eq!(caps.native_op("mail", FilterOp::Equals), Some(FilterOp::Equals));
        assert_eq!(caps.native_op("dept", FilterOp::Contains), Some(FilterOp::Equals));
        assert_eq!(caps.native_op("title", FilterOp::Equals), Some(FilterOp::Contains));
        assert_eq!(caps.native_op("phone", FilterOp::Equals), None);
    }

    #[test]
    fn test_identity_fields_matchable_locally() {
        let descriptor = CapabilityDescriptor::new().with_listed_attributes(["dept"]);
        let caps = Capabilities::new(&descriptor, None);
        assert!(caps.matchable_locally(UID_ATTRIBUTE));
        assert!(!caps.matchable_locally(NAME_ATTRIBUTE));
        assert!(caps.matchable_locally("dept"));
        assert!(!caps.matchable_locally("phone"));

        let descriptor = CapabilityDescriptor::new().with_name_in_listing();
        let caps = Capabilities::new(&descriptor, None);
        assert!(caps.matchable_locally(NAME_ATTRIBUTE));
        assert!(!caps.is_enumerable(NAME_ATTRIBUTE));
    }
}
