//! The built-in theme table.
//!
//! A CSS table compiled into the crate, covering the usual interface
//! components: header, selected and unselected buttons, disabled controls,
//! toggles, sliders, dropdowns, the progress bar, image containers, numeric
//! overlays, status indicators and help chrome.
//!
//! The table is parsed once on first use and shared afterwards.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::ThemeError;
use crate::stylesheet::parse_css;
use crate::theme::ThemeTable;

/// Source of the built-in table.
pub const BUILTIN_CSS: &str = include_str!("../themes/default.css");

static BUILTIN: Lazy<Result<Arc<ThemeTable>, ThemeError>> = Lazy::new(|| {
    let entries = parse_css(BUILTIN_CSS)?;
    let table = ThemeTable::from_entries(entries)?;
    tracing::debug!(roles = table.len(), "built-in theme table loaded");
    Ok(Arc::new(table))
});

/// Returns the shared built-in table.
pub fn builtin_table() -> Result<Arc<ThemeTable>, ThemeError> {
    BUILTIN.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Property;
    use crate::theme::{ColorMode, Layer};

    #[test]
    fn test_builtin_table_builds() {
        let table = builtin_table().unwrap();
        for role in [
            "title-header",
            "color-is-selected",
            "color-not-selected",
            "disabled",
            "toggle-track",
            "slider-thumb",
            "dropdown-option-selected",
            "progress-bar-track",
            "progress-bar-fill",
            "image-container",
            "numeric-overlay",
            "status-success",
            "status-failure",
            "footer-text",
        ] {
            assert!(table.contains(role), "missing {role}");
        }
    }

    #[test]
    fn test_builtin_table_is_shared() {
        let a = builtin_table().unwrap();
        let b = builtin_table().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_builtin_selected_and_disabled() {
        let table = builtin_table().unwrap();
        assert_eq!(table.get("disabled").map(|e| e.layer()), Some(Layer::Disabled));

        let dark = table
            .resolve(&["color-is-selected", "disabled"], ColorMode::Dark)
            .unwrap();
        assert_eq!(dark.get(Property::Background), Some("zinc-600"));
        assert_eq!(dark.get(Property::Text), Some("slate-300"));
        assert_eq!(dark.get(Property::Cursor), Some("not-allowed"));
    }

    #[test]
    fn test_builtin_composition() {
        let table = builtin_table().unwrap();
        let fill = table
            .resolve(&["progress-bar-fill"], ColorMode::Light)
            .unwrap();
        assert_eq!(fill.get(Property::Background), Some("green-500"));
        assert_eq!(fill.get(Property::BorderRadius), Some("full"));
    }
}
