//! Theme entries: one role with its includes and per-mode attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mode::ColorMode;
use crate::error::ThemeError;
use crate::style::{AttributeSet, Property, StyleRole};

/// Fold precedence band of a role.
///
/// Within one resolve call, roles fold in band order (`base`, then `state`,
/// then `disabled`); inside a band the sequence order decides. A role's band
/// is the highest band among itself and everything it includes, so a
/// `disabled-button` that includes `disabled` folds with the disabled band.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Base,
    State,
    Disabled,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::State => "state",
            Layer::Disabled => "disabled",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Layer::Base),
            "state" => Ok(Layer::State),
            "disabled" => Ok(Layer::Disabled),
            _ => Err(ThemeError::InvalidLayer(s.trim().to_string())),
        }
    }
}

/// A role definition: includes, layer, light attributes and optional dark
/// overrides.
///
/// The light set always exists (it may be empty). The dark set, when present,
/// is an overlay: in dark mode it is applied on top of the light set, so
/// properties it leaves unset keep their light value.
///
/// ```rust
/// use duotone::{ColorMode, Property, ThemeEntry};
///
/// let entry = ThemeEntry::new("color-is-selected")
///     .with_light(Property::Background, "green-500")
///     .with_light(Property::Text, "white")
///     .with_dark(Property::Background, "green-400");
///
/// let dark = entry.attributes(ColorMode::Dark);
/// assert_eq!(dark.get(Property::Background), Some("green-400"));
/// assert_eq!(dark.get(Property::Text), Some("white"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    role: StyleRole,
    includes: Vec<StyleRole>,
    layer: Layer,
    light: AttributeSet,
    dark: Option<AttributeSet>,
}

impl ThemeEntry {
    /// Creates an entry with no includes and no attributes.
    pub fn new(role: impl Into<StyleRole>) -> Self {
        Self {
            role: role.into(),
            includes: Vec::new(),
            layer: Layer::Base,
            light: AttributeSet::new(),
            dark: None,
        }
    }

    /// Appends an included role. Includes apply before this role's own
    /// attributes, in the order they were added.
    pub fn with_include(mut self, role: impl Into<StyleRole>) -> Self {
        self.includes.push(role.into());
        self
    }

    /// Appends several included roles.
    pub fn with_includes<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<StyleRole>,
    {
        self.includes.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Sets one light attribute.
    pub fn with_light(mut self, property: Property, value: impl Into<String>) -> Self {
        self.light.set(property, value);
        self
    }

    /// Sets one dark override, creating the dark set if needed.
    pub fn with_dark(mut self, property: Property, value: impl Into<String>) -> Self {
        self.dark
            .get_or_insert_with(AttributeSet::new)
            .set(property, value);
        self
    }

    /// Replaces the light attribute set.
    pub fn with_light_attributes(mut self, light: AttributeSet) -> Self {
        self.light = light;
        self
    }

    /// Replaces the dark override set.
    pub fn with_dark_attributes(mut self, dark: AttributeSet) -> Self {
        self.dark = Some(dark);
        self
    }

    pub fn role(&self) -> &StyleRole {
        &self.role
    }

    pub fn includes(&self) -> &[StyleRole] {
        &self.includes
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn light(&self) -> &AttributeSet {
        &self.light
    }

    pub fn dark(&self) -> Option<&AttributeSet> {
        self.dark.as_ref()
    }

    /// This entry's own attributes in `mode`, without includes.
    pub fn attributes(&self, mode: ColorMode) -> AttributeSet {
        let mut out = AttributeSet::new();
        self.apply(&mut out, mode);
        out
    }

    /// Folds this entry's own attributes for `mode` onto `target`.
    pub(crate) fn apply(&self, target: &mut AttributeSet, mode: ColorMode) {
        target.overlay(&self.light);
        if mode == ColorMode::Dark {
            if let Some(dark) = &self.dark {
                target.overlay(dark);
            }
        }
    }

    /// Checks the role name and every include name.
    pub(crate) fn validate(&self) -> Result<(), ThemeError> {
        self.role.validate()?;
        for include in &self.includes {
            include.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_blank() {
        let entry = ThemeEntry::new(".toggle-track");
        assert_eq!(entry.role().as_str(), "toggle-track");
        assert!(entry.includes().is_empty());
        assert_eq!(entry.layer(), Layer::Base);
        assert!(entry.light().is_empty());
        assert!(entry.dark().is_none());
    }

    #[test]
    fn test_light_only_resolves_same_in_both_modes() {
        let entry = ThemeEntry::new("image-container")
            .with_light(Property::Background, "gray-400")
            .with_light(Property::Padding, "2");
        assert_eq!(
            entry.attributes(ColorMode::Light),
            entry.attributes(ColorMode::Dark)
        );
    }

    #[test]
    fn test_dark_overlays_light() {
        let entry = ThemeEntry::new("disabled")
            .with_light(Property::Background, "gray-300")
            .with_light(Property::Cursor, "not-allowed")
            .with_dark(Property::Background, "zinc-600");

        let dark = entry.attributes(ColorMode::Dark);
        assert_eq!(dark.get(Property::Background), Some("zinc-600"));
        assert_eq!(dark.get(Property::Cursor), Some("not-allowed"));

        let light = entry.attributes(ColorMode::Light);
        assert_eq!(light.get(Property::Background), Some("gray-300"));
    }

    #[test]
    fn test_dark_only_property_absent_in_light() {
        let entry = ThemeEntry::new("numeric-overlay").with_dark(Property::Shadow, "lg");
        assert!(entry.attributes(ColorMode::Light).is_empty());
        assert_eq!(
            entry.attributes(ColorMode::Dark).get(Property::Shadow),
            Some("lg")
        );
    }

    #[test]
    fn test_includes_keep_order() {
        let entry = ThemeEntry::new("toggle-on")
            .with_include("toggle-track")
            .with_includes([".color-is-selected", "rounded"]);
        let names: Vec<&str> = entry.includes().iter().map(StyleRole::as_str).collect();
        assert_eq!(names, vec!["toggle-track", "color-is-selected", "rounded"]);
    }

    #[test]
    fn test_validate_checks_includes() {
        let entry = ThemeEntry::new("ok").with_include("not ok");
        assert!(matches!(
            entry.validate(),
            Err(ThemeError::InvalidRole { .. })
        ));
    }

    #[test]
    fn test_layer_parse_and_order() {
        assert_eq!("disabled".parse::<Layer>(), Ok(Layer::Disabled));
        assert_eq!("State".parse::<Layer>(), Ok(Layer::State));
        assert_eq!(
            "top".parse::<Layer>(),
            Err(ThemeError::InvalidLayer("top".into()))
        );
        assert!(Layer::Base < Layer::State && Layer::State < Layer::Disabled);
    }
}
