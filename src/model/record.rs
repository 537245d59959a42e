//! Records produced by backend connectors
//!
//! The engine never builds records itself. It only reads the identifier,
//! the display name and string-comparable attributes through [`Searchable`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute name that addresses a record's unique identifier
pub const UID_ATTRIBUTE: &str = "__UID__";

/// Attribute name that addresses a record's unique display name
pub const NAME_ATTRIBUTE: &str = "__NAME__";

/// Read access the engine needs on a backend record.
///
/// Identity is by [`Searchable::uid`]. Implementors only supply plain
/// attributes through [`Searchable::field`]; the identifier and name
/// attributes are resolved by the provided [`Searchable::attribute`].
pub trait Searchable: Clone {
    /// Unique identifier
    fn uid(&self) -> &str;

    /// Unique display name
    fn display_name(&self) -> &str;

    /// Plain attribute value, if the record carries it
    fn field(&self, name: &str) -> Option<&str>;

    /// Attribute value by name, including the identifier and name attributes
    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            UID_ATTRIBUTE => Some(self.uid()),
            NAME_ATTRIBUTE => Some(self.display_name()),
            other => self.field(other),
        }
    }
}

/// A generic record with string attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: String,
    /// Unique display name
    pub name: String,
    /// Named attribute values
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    /// Creates a record without attributes
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns a copy that keeps only the given attributes
    pub fn project<'a>(&self, keep: impl IntoIterator<Item = &'a String>) -> Self {
        let attributes = keep
            .into_iter()
            .filter_map(|k| self.attributes.get(k).map(|v| (k.clone(), v.clone())))
            .collect();
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            attributes,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Record {}

impl Searchable for Record {
    fn uid(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
