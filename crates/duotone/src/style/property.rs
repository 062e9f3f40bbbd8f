//! Visual properties a theme entry can set.
//!
//! The property set is closed: definitions naming anything else fail with
//! [`ThemeError::UnknownAttribute`](crate::ThemeError::UnknownAttribute), which
//! catches typos in hand-written tables the same way a missing role does.
//!
//! | Property | Accepted names | CSS property | Class prefix |
//! |----------|----------------|--------------|--------------|
//! | `Background` | `background`, `background-color`, `bg` | `background-color` | `bg` |
//! | `Text` | `text`, `color`, `fg` | `color` | `text` |
//! | `BorderColor` | `border-color` | `border-color` | `border` |
//! | `BorderStyle` | `border-style` | `border-style` | `border` |
//! | `BorderWidth` | `border-width` | `border-width` | `border` |
//! | `BorderRadius` | `border-radius`, `rounded` | `border-radius` | `rounded` |
//! | `Padding` | `padding` | `padding` | `p` |
//! | `Margin` | `margin` | `margin` | `m` |
//! | `FontSize` | `font-size` | `font-size` | `text` |
//! | `FontWeight` | `font-weight` | `font-weight` | `font` |
//! | `Opacity` | `opacity` | `opacity` | `opacity` |
//! | `Transform` | `transform` | `transform` | (value as-is) |
//! | `Cursor` | `cursor` | `cursor` | `cursor` |
//! | `PointerEvents` | `pointer-events` | `pointer-events` | `pointer-events` |
//! | `Shadow` | `shadow`, `box-shadow` | `box-shadow` | `shadow` |
//! | `Outline` | `outline` | `outline` | `outline` |

use std::fmt;

use serde::{Deserialize, Serialize};

/// A visual property of a styled element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Background,
    Text,
    BorderColor,
    BorderStyle,
    BorderWidth,
    BorderRadius,
    Padding,
    Margin,
    FontSize,
    FontWeight,
    Opacity,
    Transform,
    Cursor,
    PointerEvents,
    Shadow,
    Outline,
}

impl Property {
    /// Every property, in canonical order.
    pub const ALL: [Property; 16] = [
        Property::Background,
        Property::Text,
        Property::BorderColor,
        Property::BorderStyle,
        Property::BorderWidth,
        Property::BorderRadius,
        Property::Padding,
        Property::Margin,
        Property::FontSize,
        Property::FontWeight,
        Property::Opacity,
        Property::Transform,
        Property::Cursor,
        Property::PointerEvents,
        Property::Shadow,
        Property::Outline,
    ];

    /// Looks up a property by canonical name or one of its CSS spellings.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let property = match name.as_str() {
            "background" | "background-color" | "bg" => Property::Background,
            "text" | "color" | "fg" => Property::Text,
            "border-color" => Property::BorderColor,
            "border-style" => Property::BorderStyle,
            "border-width" => Property::BorderWidth,
            "border-radius" | "rounded" => Property::BorderRadius,
            "padding" => Property::Padding,
            "margin" => Property::Margin,
            "font-size" => Property::FontSize,
            "font-weight" => Property::FontWeight,
            "opacity" => Property::Opacity,
            "transform" => Property::Transform,
            "cursor" => Property::Cursor,
            "pointer-events" => Property::PointerEvents,
            "shadow" | "box-shadow" => Property::Shadow,
            "outline" => Property::Outline,
            _ => return None,
        };
        Some(property)
    }

    /// The canonical name, as used in YAML tables and serialized output.
    pub fn name(self) -> &'static str {
        match self {
            Property::Background => "background",
            Property::Text => "text",
            Property::BorderColor => "border-color",
            Property::BorderStyle => "border-style",
            Property::BorderWidth => "border-width",
            Property::BorderRadius => "border-radius",
            Property::Padding => "padding",
            Property::Margin => "margin",
            Property::FontSize => "font-size",
            Property::FontWeight => "font-weight",
            Property::Opacity => "opacity",
            Property::Transform => "transform",
            Property::Cursor => "cursor",
            Property::PointerEvents => "pointer-events",
            Property::Shadow => "shadow",
            Property::Outline => "outline",
        }
    }

    /// The CSS property name used for inline style output.
    pub fn css_name(self) -> &'static str {
        match self {
            Property::Background => "background-color",
            Property::Text => "color",
            Property::Shadow => "box-shadow",
            other => other.name(),
        }
    }

    /// The utility-class prefix, or `None` when values are class names already.
    pub fn class_prefix(self) -> Option<&'static str> {
        let prefix = match self {
            Property::Background => "bg",
            Property::Text | Property::FontSize => "text",
            Property::BorderColor | Property::BorderStyle | Property::BorderWidth => "border",
            Property::BorderRadius => "rounded",
            Property::Padding => "p",
            Property::Margin => "m",
            Property::FontWeight => "font",
            Property::Opacity => "opacity",
            Property::Transform => return None,
            Property::Cursor => "cursor",
            Property::PointerEvents => "pointer-events",
            Property::Shadow => "shadow",
            Property::Outline => "outline",
        };
        Some(prefix)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::from_name(property.name()), Some(property));
        }
    }

    #[test]
    fn test_css_spellings() {
        assert_eq!(
            Property::from_name("background-color"),
            Some(Property::Background)
        );
        assert_eq!(Property::from_name("color"), Some(Property::Text));
        assert_eq!(Property::from_name("box-shadow"), Some(Property::Shadow));
        assert_eq!(Property::from_name(" Font-Weight "), Some(Property::FontWeight));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Property::from_name("animation"), None);
        assert_eq!(Property::from_name(""), None);
    }

    #[test]
    fn test_css_name_differs_only_where_needed() {
        assert_eq!(Property::Background.css_name(), "background-color");
        assert_eq!(Property::Text.css_name(), "color");
        assert_eq!(Property::Padding.css_name(), "padding");
    }

    #[test]
    fn test_transform_has_no_class_prefix() {
        assert_eq!(Property::Transform.class_prefix(), None);
        assert_eq!(Property::Background.class_prefix(), Some("bg"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Property::PointerEvents).unwrap();
        assert_eq!(json, "\"pointer-events\"");
    }
}
