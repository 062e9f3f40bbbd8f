//! Theme table sources: YAML, JSON and CSS.
//!
//! All three formats produce the same thing, a list of [`ThemeEntry`]
//! records in declaration order, which a [`ThemeTableBuilder`] turns into a
//! validated table. Parsing never builds a table itself, so entries from
//! several sources can be combined before validation runs.
//!
//! ```rust
//! use duotone::{stylesheet, ColorMode, Property, ThemeTable};
//!
//! let entries = stylesheet::parse_css(r#"
//!     .disabled { layer: disabled; background: gray-300; }
//!     .dark .disabled { background: zinc-600; }
//! "#)?;
//! let table = ThemeTable::from_entries(entries)?;
//!
//! let dark = table.resolve(&["disabled"], ColorMode::Dark)?;
//! assert_eq!(dark.get(Property::Background), Some("zinc-600"));
//! # Ok::<(), duotone::ThemeError>(())
//! ```
//!
//! [`ThemeEntry`]: crate::ThemeEntry
//! [`ThemeTableBuilder`]: crate::ThemeTableBuilder

mod css;
mod source;
mod yaml;

pub use css::{parse_css, DARK_SCOPE_CLASS};
pub use source::{load_dir, load_file, load_table, Format, TABLE_EXTENSIONS};
pub use yaml::{parse_json, parse_yaml};
