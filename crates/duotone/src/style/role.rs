//! Style role identifiers.

use std::borrow::Borrow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ThemeError;

/// A semantic style identifier such as `color-is-selected`.
///
/// Construction normalizes CSS class notation: surrounding whitespace and a
/// single leading `.` are dropped, so `.disabled` and `disabled` name the
/// same role. Names are checked by [`validate`](StyleRole::validate) when an
/// entry is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleRole(String);

impl StyleRole {
    /// Creates a role from a name, normalizing class notation.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let name = name.strip_prefix('.').unwrap_or(name);
        StyleRole(name.to_string())
    }

    /// Returns the role name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks that the name is usable as a table key.
    ///
    /// Names must be non-empty and free of whitespace, `+` and `.`, which
    /// separate roles in composite strings and selectors.
    pub fn validate(&self) -> Result<(), ThemeError> {
        let reason = if self.0.is_empty() {
            "name is empty"
        } else if self.0.chars().any(char::is_whitespace) {
            "name contains whitespace"
        } else if self.0.contains('+') {
            "name contains '+'"
        } else if self.0.contains('.') {
            "name contains '.'"
        } else {
            return Ok(());
        };
        Err(ThemeError::InvalidRole {
            name: self.0.clone(),
            reason: reason.to_string(),
        })
    }
}

/// Splits a composite role string into role names.
///
/// Roles are separated by whitespace or `+`, so both a class attribute
/// (`"color-is-selected disabled"`) and the composite notation
/// (`"color-is-selected + disabled"`) work.
pub fn split_roles(composite: &str) -> Vec<StyleRole> {
    composite
        .split(|c: char| c.is_whitespace() || c == '+')
        .filter(|part| !part.is_empty())
        .map(StyleRole::new)
        .collect()
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StyleRole {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StyleRole {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleRole {
    fn from(name: &str) -> Self {
        StyleRole::new(name)
    }
}

impl From<String> for StyleRole {
    fn from(name: String) -> Self {
        StyleRole::new(name)
    }
}

impl From<&String> for StyleRole {
    fn from(name: &String) -> Self {
        StyleRole::new(name)
    }
}

impl Serialize for StyleRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_class_dot() {
        assert_eq!(StyleRole::new(".disabled").as_str(), "disabled");
        assert_eq!(StyleRole::new("  title-header ").as_str(), "title-header");
    }

    #[test]
    fn test_validate_accepts_kebab_names() {
        assert!(StyleRole::new("progress-bar-fill").validate().is_ok());
        assert!(StyleRole::new("slider_thumb2").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        for bad in ["", "a b", "a+b", "button.selected"] {
            let err = StyleRole::new(bad).validate().unwrap_err();
            assert!(matches!(err, ThemeError::InvalidRole { .. }), "{bad}");
        }
    }

    #[test]
    fn test_split_roles() {
        let roles = split_roles("color-is-selected + disabled");
        assert_eq!(
            roles,
            vec![StyleRole::new("color-is-selected"), StyleRole::new("disabled")]
        );

        let roles = split_roles(" .toggle-track  .toggle-on ");
        assert_eq!(
            roles,
            vec![StyleRole::new("toggle-track"), StyleRole::new("toggle-on")]
        );

        assert!(split_roles("  + ").is_empty());
    }
}
