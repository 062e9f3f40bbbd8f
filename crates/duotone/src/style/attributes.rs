//! Attribute sets and overlay logic.
//!
//! An [`AttributeSet`] maps [`Property`] to a value token such as
//! `green-500` or `not-allowed`. Sets are layered with
//! [`overlay`](AttributeSet::overlay): properties present in the upper set
//! replace those below, properties it leaves unset are preserved.
//!
//! ```text
//! base:     { background: gray-200, text: gray-700, padding: 2 }
//! overlay:  { background: green-500, text: white }
//! result:   { background: green-500, text: white, padding: 2 }
//! ```
//!
//! Insertion order is kept, and overriding a property keeps the position it
//! was first set at, so rendered output is stable across modes.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::property::Property;

/// An ordered mapping from visual property to value token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: IndexMap<Property, String>,
}

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning `self` for chaining.
    pub fn with(mut self, property: Property, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Sets a property, returning the value it replaced.
    pub fn set(&mut self, property: Property, value: impl Into<String>) -> Option<String> {
        self.values.insert(property, value.into())
    }

    /// Returns the value of a property, if set.
    pub fn get(&self, property: Property) -> Option<&str> {
        self.values.get(&property).map(String::as_str)
    }

    /// Returns true if the property is set.
    pub fn contains(&self, property: Property) -> bool {
        self.values.contains_key(&property)
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Applies `upper` on top of this set in place.
    pub fn overlay(&mut self, upper: &AttributeSet) {
        for (property, value) in &upper.values {
            self.values.insert(*property, value.clone());
        }
    }

    /// Returns a new set with `upper` applied on top of this one.
    pub fn merge(&self, upper: &AttributeSet) -> AttributeSet {
        let mut merged = self.clone();
        merged.overlay(upper);
        merged
    }

    /// Renders the set as inline style text: `color: white; padding: 2`.
    pub fn to_inline_style(&self) -> String {
        self.values
            .iter()
            .map(|(property, value)| format!("{}: {}", property.css_name(), value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Renders the set as utility class names: `bg-green-500 text-white`.
    ///
    /// Multi-word values produce one class per word, each with the
    /// property's prefix.
    pub fn to_class_names(&self) -> Vec<String> {
        let mut classes = Vec::new();
        for (property, value) in &self.values {
            for word in value.split_whitespace() {
                match property.class_prefix() {
                    Some(prefix) => classes.push(format!("{}-{}", prefix, word)),
                    None => classes.push(word.to_string()),
                }
            }
        }
        classes
    }
}

impl FromIterator<(Property, String)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (Property, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (property, value) in &self.values {
            map.serialize_entry(property.name(), value)?;
        }
        map.end()
    }
}
