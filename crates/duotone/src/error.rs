//! Error types for theme construction, loading and resolution.
//!
//! Every fallible operation in this crate returns [`ThemeError`]. Construction
//! errors ([`DuplicateRole`](ThemeError::DuplicateRole),
//! [`CyclicComposition`](ThemeError::CyclicComposition),
//! [`UnresolvedInclude`](ThemeError::UnresolvedInclude)) are raised while a
//! table is being built, so a table that exists is always fully usable.
//! Resolution errors ([`UnknownRole`](ThemeError::UnknownRole),
//! [`EmptyRoleSequence`](ThemeError::EmptyRoleSequence)) point at a caller
//! asking for something the table does not define.

use std::path::{Path, PathBuf};

/// Errors produced while building, loading or resolving a theme table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// A resolve call named a role that is not in the table.
    #[error("unknown style role '{0}'")]
    UnknownRole(String),

    /// A resolve call passed no roles at all.
    #[error("cannot resolve an empty role sequence")]
    EmptyRoleSequence,

    /// A role was registered twice.
    #[error("style role '{0}' is already registered")]
    DuplicateRole(String),

    /// Registering a role would close a loop in the includes relation.
    #[error("cycle detected in role includes: {}", .path.join(" -> "))]
    CyclicComposition {
        /// The loop, starting and ending with the same role.
        path: Vec<String>,
    },

    /// A role includes another role that was never registered.
    #[error("style role '{role}' includes unregistered role '{include}'")]
    UnresolvedInclude { role: String, include: String },

    /// A role name is empty or contains separator characters.
    #[error("invalid style role name '{name}': {reason}")]
    InvalidRole { name: String, reason: String },

    /// A mode name other than `light` or `dark`.
    #[error("invalid color mode '{0}' (expected 'light' or 'dark')")]
    InvalidMode(String),

    /// A layer name other than `base`, `state` or `disabled`.
    #[error("invalid layer '{0}' (expected 'base', 'state' or 'disabled')")]
    InvalidLayer(String),

    /// A definition sets an attribute that is not a known visual property.
    #[error("unknown attribute '{attribute}' in style role '{role}'")]
    UnknownAttribute { role: String, attribute: String },

    /// A definition has the wrong shape or an unusable value.
    #[error("invalid definition for style role '{role}': {message}")]
    InvalidDefinition { role: String, message: String },

    /// The table source could not be parsed.
    #[error("failed to parse theme table{}: {message}", location(.path))]
    Parse {
        /// Source file, when the table came from disk.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },

    /// The table source could not be read.
    #[error("failed to load theme table: {message}")]
    Load { message: String },
}

impl ThemeError {
    /// Creates a parse error without a source path.
    pub fn parse(message: impl Into<String>) -> Self {
        ThemeError::Parse {
            path: None,
            message: message.into(),
        }
    }

    /// Creates an invalid definition error for `role`.
    pub fn invalid(role: impl Into<String>, message: impl Into<String>) -> Self {
        ThemeError::InvalidDefinition {
            role: role.into(),
            message: message.into(),
        }
    }

    /// Attaches a source path to parse errors that do not carry one yet.
    pub fn with_path(self, source: &Path) -> Self {
        match self {
            ThemeError::Parse {
                path: None,
                message,
            } => ThemeError::Parse {
                path: Some(source.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_display() {
        let err = ThemeError::UnknownRole("nonexistent".to_string());
        assert_eq!(err.to_string(), "unknown style role 'nonexistent'");
    }

    #[test]
    fn test_cycle_display_joins_path() {
        let err = ThemeError::CyclicComposition {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("cycle"));
        assert!(msg.contains("a -> b -> a"));
    }

    #[test]
    fn test_parse_display_with_and_without_path() {
        let bare = ThemeError::parse("unexpected token");
        assert_eq!(
            bare.to_string(),
            "failed to parse theme table: unexpected token"
        );

        let located = bare.with_path(Path::new("themes/default.css"));
        assert_eq!(
            located.to_string(),
            "failed to parse theme table themes/default.css: unexpected token"
        );
    }

    #[test]
    fn test_with_path_keeps_existing_path() {
        let err = ThemeError::Parse {
            path: Some(PathBuf::from("first.yaml")),
            message: "bad".to_string(),
        }
        .with_path(Path::new("second.yaml"));

        assert!(matches!(
            err,
            ThemeError::Parse { path: Some(ref p), .. } if p == Path::new("first.yaml")
        ));
    }

    #[test]
    fn test_invalid_layer_display() {
        let err = ThemeError::InvalidLayer("top".into());
        assert_eq!(
            err.to_string(),
            "invalid layer 'top' (expected 'base', 'state' or 'disabled')"
        );
    }

    #[test]
    fn test_with_path_ignores_other_variants() {
        let err = ThemeError::DuplicateRole("x".into()).with_path(Path::new("t.css"));
        assert_eq!(err, ThemeError::DuplicateRole("x".into()));
    }
}
