//! Mode-aware theme tables.
//!
//! A theme is a table of [`ThemeEntry`] records. Each entry names a role,
//! the roles it includes, a light attribute set and an optional dark overlay.
//! Adaptation is per entry rather than per theme: most roles look the same in
//! both modes and only define light attributes, while the few that need more
//! contrast add a dark overlay with just the properties that change.
//!
//! ```yaml
//! # Same in both modes
//! image-container:
//!   background: gray-400
//!   padding: "2"
//!
//! # Dark overlay replaces only what it names
//! color-is-selected:
//!   background: green-500
//!   text: white
//!   dark:
//!     background: green-400
//!     text: slate-200
//! ```
//!
//! ## How Folding Works
//!
//! Resolving `["color-is-selected", "disabled"]` in dark mode:
//! 1. Start from an empty attribute set
//! 2. Apply `color-is-selected`: light attributes, then its dark overlay
//! 3. Apply `disabled` the same way; anything it sets replaces step 2
//!
//! Includes expand in place ahead of the including role, and [`Layer`] bands
//! keep `disabled` roles folding last. See [`ThemeTable::resolve`].
//!
//! ## Sharing
//!
//! [`ThemeResolver`] holds the table and the current [`ColorMode`] for
//! consumers that share one theme across threads.

mod entry;
mod mode;
mod resolver;
mod table;

pub use entry::{Layer, ThemeEntry};
pub use mode::{ColorMode, ModeCell};
pub use resolver::ThemeResolver;
pub use table::{ThemeTable, ThemeTableBuilder};
