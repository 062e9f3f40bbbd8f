//! YAML and JSON theme tables.
//!
//! A table is a mapping from role name to definition. A definition is one of:
//!
//! ```yaml
//! # Full definition: root attributes are the light set
//! color-is-selected:
//!   background: green-500
//!   text: white
//!   layer: state
//!   dark:
//!     background: green-400
//!     text: slate-200
//!
//! # Includes plus own attributes
//! progress-bar-fill:
//!   includes: [color-is-selected]
//!   border-radius: full
//!
//! # Optional light section, merged onto the root attributes
//! slider-thumb:
//!   border-radius: full
//!   light:
//!     background: white
//!
//! # Alias: a role that only includes others
//! primary-button: color-is-selected
//! disabled-toggle: [toggle-track, disabled]
//!
//! # Empty role
//! spacer: ~
//! ```
//!
//! Scalars (strings, numbers, booleans) are accepted as values and kept as
//! text, so `opacity: 50` and `opacity: "50"` are the same.
//!
//! JSON tables use the same shape and go through the same parser.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde_yaml::{Mapping, Value};

use crate::error::ThemeError;
use crate::style::{split_roles, AttributeSet, Property, StyleRole};
use crate::theme::{Layer, ThemeEntry};

const INCLUDES: &str = "includes";
const LAYER: &str = "layer";
const LIGHT: &str = "light";
const DARK: &str = "dark";

/// Parses a YAML theme table into entries, in declaration order.
///
/// # Errors
///
/// Returns `Parse` for malformed YAML or a non-mapping root, `DuplicateRole`
/// when a role is defined twice, and `InvalidDefinition`/`UnknownAttribute`
/// for bad entries.
pub fn parse_yaml(yaml: &str) -> Result<Vec<ThemeEntry>, ThemeError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let table: RoleDefinitions =
        serde_yaml::from_str(yaml).map_err(|e| ThemeError::parse(e.to_string()))?;
    table.into_entries()
}

/// Parses a JSON theme table into entries, in declaration order.
pub fn parse_json(json: &str) -> Result<Vec<ThemeEntry>, ThemeError> {
    let table: RoleDefinitions =
        serde_json::from_str(json).map_err(|e| ThemeError::parse(e.to_string()))?;
    table.into_entries()
}

/// The root mapping, with every key kept.
///
/// Deserializing straight into a map would fold repeated role names into
/// one; definitions stay as YAML values, which reject repeated keys inside a
/// definition in both source formats.
struct RoleDefinitions(Vec<(Value, Value)>);

impl RoleDefinitions {
    fn into_entries(self) -> Result<Vec<ThemeEntry>, ThemeError> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .map(|(key, value)| {
                let name = key.as_str().ok_or_else(|| {
                    ThemeError::parse(format!("role name must be a string, got {:?}", key))
                })?;
                let entry = parse_definition(name, value)?;
                if !seen.insert(entry.role().clone()) {
                    return Err(ThemeError::DuplicateRole(entry.role().to_string()));
                }
                Ok(entry)
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for RoleDefinitions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RoleDefinitionsVisitor)
    }
}

struct RoleDefinitionsVisitor;

impl<'de> Visitor<'de> for RoleDefinitionsVisitor {
    type Value = RoleDefinitions;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of role names to definitions")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RoleDefinitions(Vec::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visit_unit()
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut definitions = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(pair) = map.next_entry::<Value, Value>()? {
            definitions.push(pair);
        }
        Ok(RoleDefinitions(definitions))
    }
}

/// Parses one role definition.
pub(crate) fn parse_definition(role: &str, value: &Value) -> Result<ThemeEntry, ThemeError> {
    let entry = ThemeEntry::new(role);
    match value {
        Value::Null => Ok(entry),
        Value::String(targets) => Ok(entry.with_includes(split_roles(targets))),
        Value::Sequence(_) => Ok(entry.with_includes(parse_includes(role, value)?)),
        Value::Mapping(map) => parse_mapping(entry, role, map),
        other => Err(ThemeError::invalid(
            role,
            format!("expected a mapping, role name or list of role names, got {:?}", other),
        )),
    }
}

fn parse_mapping(mut entry: ThemeEntry, role: &str, map: &Mapping) -> Result<ThemeEntry, ThemeError> {
    let mut light = AttributeSet::new();

    for (key, value) in map {
        let key = key
            .as_str()
            .ok_or_else(|| ThemeError::invalid(role, format!("non-string key {:?}", key)))?;

        match key {
            INCLUDES => entry = entry.with_includes(parse_includes(role, value)?),
            LAYER => {
                let layer = scalar(role, key, value)?
                    .parse::<Layer>()
                    .map_err(|err| ThemeError::invalid(role, err.to_string()))?;
                entry = entry.with_layer(layer);
            }
            LIGHT | DARK => {}
            attribute => {
                let property = property(role, attribute)?;
                light.set(property, scalar(role, attribute, value)?);
            }
        }
    }

    // Explicit light section merges onto root attributes.
    if let Some(section) = map.get(LIGHT) {
        light.overlay(&parse_section(role, LIGHT, section)?);
    }
    entry = entry.with_light_attributes(light);

    if let Some(section) = map.get(DARK) {
        entry = entry.with_dark_attributes(parse_section(role, DARK, section)?);
    }

    Ok(entry)
}

fn parse_section(role: &str, section: &str, value: &Value) -> Result<AttributeSet, ThemeError> {
    let map = value
        .as_mapping()
        .ok_or_else(|| ThemeError::invalid(role, format!("'{}' must be a mapping", section)))?;

    let mut attributes = AttributeSet::new();
    for (key, value) in map {
        let key = key
            .as_str()
            .ok_or_else(|| ThemeError::invalid(role, format!("non-string key {:?}", key)))?;
        attributes.set(property(role, key)?, scalar(role, key, value)?);
    }
    Ok(attributes)
}

fn parse_includes(role: &str, value: &Value) -> Result<Vec<StyleRole>, ThemeError> {
    match value {
        Value::String(targets) => Ok(split_roles(targets)),
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(StyleRole::new).ok_or_else(|| {
                    ThemeError::invalid(role, format!("included role must be a string, got {:?}", item))
                })
            })
            .collect(),
        other => Err(ThemeError::invalid(
            role,
            format!("'includes' must be a role name or list, got {:?}", other),
        )),
    }
}

fn property(role: &str, attribute: &str) -> Result<Property, ThemeError> {
    Property::from_name(attribute).ok_or_else(|| ThemeError::UnknownAttribute {
        role: role.to_string(),
        attribute: attribute.to_string(),
    })
}

fn scalar(role: &str, attribute: &str, value: &Value) -> Result<String, ThemeError> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(ThemeError::invalid(
                role,
                format!("'{}' must be a scalar value, got {:?}", attribute, other),
            ))
        }
    };
    if text.is_empty() {
        return Err(ThemeError::invalid(role, format!("'{}' is empty", attribute)));
    }
    Ok(text)
}
