//! The shared theme resolver: one table, one mode, many readers.
//!
//! [`ThemeResolver`] pairs an immutable [`ThemeTable`] with a [`ModeCell`].
//! Readers resolve concurrently; the mode and the table are each swapped as a
//! single value. A table is never edited in place: [`reload`](ThemeResolver::reload)
//! and [`swap_table`](ThemeResolver::swap_table) build or receive a complete
//! table and replace the reference.
//!
//! Resolution that should not follow later mode changes takes the mode as an
//! argument ([`resolve`](ThemeResolver::resolve)). Callers that want the
//! ambient mode use [`resolve_current`](ThemeResolver::resolve_current),
//! which reads the mode once at the start of the call.
//!
//! ```rust
//! use duotone::{ColorMode, Property, ThemeEntry, ThemeResolver, ThemeTable};
//!
//! let table = ThemeTable::from_entries([ThemeEntry::new("title-header")
//!     .with_light(Property::Background, "blue-800")
//!     .with_dark(Property::Background, "slate-900")])?;
//! let resolver = ThemeResolver::new(table);
//!
//! resolver.set_mode(ColorMode::Dark);
//! let header = resolver.resolve_current(&["title-header"])?;
//! assert_eq!(header.get(Property::Background), Some("slate-900"));
//! # Ok::<(), duotone::ThemeError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use super::mode::{ColorMode, ModeCell};
use super::table::ThemeTable;
use crate::error::ThemeError;
use crate::style::AttributeSet;
use crate::stylesheet::load_table;

/// A theme table plus the current display mode, safe to share across threads.
#[derive(Debug)]
pub struct ThemeResolver {
    table: RwLock<Arc<ThemeTable>>,
    mode: ModeCell,
    source: Option<PathBuf>,
}

impl ThemeResolver {
    /// Creates a resolver in light mode.
    pub fn new(table: ThemeTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    /// Creates a resolver around an already shared table.
    pub fn from_shared(table: Arc<ThemeTable>) -> Self {
        Self {
            table: RwLock::new(table),
            mode: ModeCell::new(ColorMode::Light),
            source: None,
        }
    }

    /// Loads a table from a file or directory and remembers the path for
    /// [`reload`](Self::reload).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let table = load_table(path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            ..Self::new(table)
        })
    }

    /// Sets the initial mode, returning `self` for chaining.
    pub fn with_mode(self, mode: ColorMode) -> Self {
        self.mode.set(mode);
        self
    }

    /// The current mode.
    pub fn mode(&self) -> ColorMode {
        self.mode.get()
    }

    /// Replaces the current mode. Calls already in progress keep the mode
    /// they started with.
    pub fn set_mode(&self, mode: ColorMode) {
        let previous = self.mode.swap(mode);
        if previous != mode {
            tracing::debug!(from = %previous, to = %mode, "color mode changed");
        }
    }

    /// A handle to the current table. The handle stays valid across swaps.
    pub fn table(&self) -> Arc<ThemeTable> {
        let guard = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the table, returning the previous one.
    pub fn swap_table(&self, table: ThemeTable) -> Arc<ThemeTable> {
        let mut guard = self.table.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(table))
    }

    /// The file or directory this resolver was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Rebuilds the table from its source path and swaps it in.
    ///
    /// On failure the current table stays in place.
    ///
    /// # Errors
    ///
    /// Returns `Load` if the resolver has no source path, or any error from
    /// loading and building the new table.
    pub fn reload(&self) -> Result<(), ThemeError> {
        let path = self.source.as_deref().ok_or_else(|| ThemeError::Load {
            message: "cannot reload: resolver has no source path".to_string(),
        })?;

        match load_table(path) {
            Ok(table) => {
                tracing::debug!(path = %path.display(), roles = table.len(), "reloaded theme table");
                self.swap_table(table);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "theme reload failed, keeping previous table");
                Err(err)
            }
        }
    }

    /// Resolves `roles` for an explicit mode.
    pub fn resolve<S: AsRef<str>>(
        &self,
        roles: &[S],
        mode: ColorMode,
    ) -> Result<AttributeSet, ThemeError> {
        self.table().resolve(roles, mode)
    }

    /// Resolves `roles` for the current mode.
    pub fn resolve_current<S: AsRef<str>>(&self, roles: &[S]) -> Result<AttributeSet, ThemeError> {
        let mode = self.mode();
        self.resolve(roles, mode)
    }

    /// Resolves a composite role string for an explicit mode.
    pub fn resolve_str(&self, composite: &str, mode: ColorMode) -> Result<AttributeSet, ThemeError> {
        self.table().resolve_str(composite, mode)
    }
}
