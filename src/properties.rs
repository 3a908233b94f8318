//! Property values and the extraction result mapping.
//!
//! Every extraction produces one [`Properties`] mapping. Keys are unique
//! and iterate in lexicographic order, so repeated runs over equivalent
//! documents serialize byte-for-byte identically regardless of the order in
//! which the archive listed its entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A document property value.
///
/// One constructor per supported primitive kind. Fixed-schema properties
/// coerce to `Text` or `Number`; custom properties resolve their variant
/// from the runtime type tag found in `docProps/custom.xml`. `Map` holds
/// nested placements created by dotted output keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Textual value (`lpwstr` and friends in OOXML)
    Text(String),
    /// Numeric value; unparseable numeric text is stored as NaN
    Number(f64),
    /// Boolean value (`bool` in OOXML)
    Bool(bool),
    /// Date value (`filetime`/`date` in OOXML)
    Date(DateTime<Utc>),
    /// Nested mapping created by a dotted output key
    Map(Properties),
}

impl PropertyValue {
    /// Borrow the textual content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The numeric content, if this is a `Number` value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean content, if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The date content, if this is a `Date` value.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            PropertyValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the nested mapping, if this is a `Map` value.
    pub fn as_map(&self) -> Option<&Properties> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// The flat, key-sorted mapping returned by an extraction.
///
/// Backed by a `BTreeMap`, so the lexicographic-key invariant holds at
/// every step rather than being restored by a final sort.
///
/// # Example
///
/// ```rust
/// use docprops::{Properties, PropertyValue};
///
/// let mut props = Properties::new();
/// props.insert("title", PropertyValue::Text("Quarterly Report".to_string()));
/// props.insert("pages", PropertyValue::Number(42.0));
///
/// let keys: Vec<_> = props.keys().collect();
/// assert_eq!(keys, ["pages", "title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, PropertyValue>,
}

impl Properties {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property under a flat key.
    ///
    /// Returns the previous value if the key was already present
    /// (last-write-wins).
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        self.entries.insert(name.into(), value)
    }

    /// Insert a property under a possibly dotted key.
    ///
    /// Dots indicate nested placement: `"stats.pages"` stores the value
    /// inside a `Map` under `stats`, creating intermediate maps as needed
    /// and replacing any non-map value in the way.
    pub fn insert_path(&mut self, path: &str, value: PropertyValue) {
        match path.split_once('.') {
            None => {
                self.entries.insert(path.to_string(), value);
            },
            Some((head, rest)) => {
                let slot = self
                    .entries
                    .entry(head.to_string())
                    .or_insert_with(|| PropertyValue::Map(Properties::new()));
                if !matches!(slot, PropertyValue::Map(_)) {
                    *slot = PropertyValue::Map(Properties::new());
                }
                if let PropertyValue::Map(inner) = slot {
                    inner.insert_path(rest, value);
                }
            },
        }
    }

    /// Get a property value by flat key.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(name)
    }

    /// Get a property value by a possibly dotted key.
    pub fn get_path(&self, path: &str) -> Option<&PropertyValue> {
        match path.split_once('.') {
            None => self.entries.get(path),
            Some((head, rest)) => match self.entries.get(head)? {
                PropertyValue::Map(inner) => inner.get_path(rest),
                _ => None,
            },
        }
    }

    /// Merge another mapping into this one; colliding keys take the
    /// incoming value (last-write-wins).
    pub fn merge(&mut self, other: Properties) {
        self.entries.extend(other.entries);
    }

    /// Number of properties at the top level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
