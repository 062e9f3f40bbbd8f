//! # Duotone - Mode-Aware Style Role Resolution
//!
//! Duotone maps semantic style roles (`color-is-selected`, `disabled`,
//! `progress-bar-fill`) to concrete visual attributes, with light and dark
//! variants kept side by side in one table. It provides:
//!
//! - **Theme tables** of roles, each with a light attribute set and an
//!   optional dark overlay
//! - **Composition**: roles include other roles, and a sequence of roles
//!   folds into one attribute set where later roles win
//! - **Layers** so state and disabled roles always fold after base roles
//! - **Loaders** for YAML, JSON and CSS table files
//! - **A shared resolver** holding the table and the current mode
//!
//! ## Core Concepts
//!
//! - [`StyleRole`]: a semantic identifier for a piece of styling
//! - [`Property`] and [`AttributeSet`]: what a role sets
//! - [`ThemeEntry`]: one role definition
//! - [`ThemeTable`]: a validated, immutable set of entries
//! - [`ColorMode`]: light or dark
//! - [`ThemeResolver`]: a table plus the current mode, shared across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use duotone::{ColorMode, Layer, Property, ThemeEntry, ThemeTable};
//!
//! let table = ThemeTable::builder()
//!     .with_entry(
//!         ThemeEntry::new("color-is-selected")
//!             .with_light(Property::Background, "green-500")
//!             .with_light(Property::Text, "white")
//!             .with_dark(Property::Background, "green-400")
//!             .with_dark(Property::Text, "slate-200"),
//!     )?
//!     .with_entry(
//!         ThemeEntry::new("disabled")
//!             .with_layer(Layer::Disabled)
//!             .with_light(Property::Background, "gray-300")
//!             .with_light(Property::Text, "gray-500")
//!             .with_light(Property::Cursor, "not-allowed")
//!             .with_dark(Property::Background, "zinc-600")
//!             .with_dark(Property::Text, "slate-300"),
//!     )?
//!     .build()?;
//!
//! let resolved = table.resolve(&["color-is-selected", "disabled"], ColorMode::Dark)?;
//! assert_eq!(resolved.get(Property::Background), Some("zinc-600"));
//! assert_eq!(resolved.get(Property::Cursor), Some("not-allowed"));
//! assert_eq!(
//!     resolved.to_inline_style(),
//!     "background-color: zinc-600; color: slate-300; cursor: not-allowed"
//! );
//! # Ok::<(), duotone::ThemeError>(())
//! ```
//!
//! ## Loading Tables
//!
//! ```rust,no_run
//! use duotone::{ColorMode, ThemeResolver};
//!
//! let resolver = ThemeResolver::from_path("themes/")?;
//! resolver.set_mode(ColorMode::Dark);
//! let header = resolver.resolve_str("title-header", resolver.mode())?;
//! println!("{}", header.to_inline_style());
//! # Ok::<(), duotone::ThemeError>(())
//! ```
//!
//! See [`stylesheet`] for the file formats and [`builtin`] for the table that
//! ships with the crate.

pub mod builtin;
mod error;
pub mod style;
pub mod stylesheet;
pub mod theme;

pub use builtin::builtin_table;
pub use error::ThemeError;
pub use style::{split_roles, AttributeSet, Property, StyleRole};
pub use stylesheet::{load_dir, load_file, load_table, parse_css, parse_json, parse_yaml};
pub use theme::{
    ColorMode, Layer, ModeCell, ThemeEntry, ThemeResolver, ThemeTable, ThemeTableBuilder,
};
