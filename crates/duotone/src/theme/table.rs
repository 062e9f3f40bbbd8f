//! Theme tables: construction, validation and resolution.
//!
//! A table is built once through [`ThemeTableBuilder`] and is immutable after
//! [`build`](ThemeTableBuilder::build). Construction fails fast:
//!
//! - registering a role twice fails with `DuplicateRole`
//! - registering a role whose includes lead back to it fails with
//!   `CyclicComposition`
//! - building with an include that names a role never registered fails with
//!   `UnresolvedInclude`
//!
//! Includes may name roles registered later, so tables can be declared in any
//! order.
//!
//! # Resolution
//!
//! [`ThemeTable::resolve`] takes an ordered role sequence and a mode:
//!
//! 1. Each role expands to its lineage: includes first (depth-first), the
//!    role itself last.
//! 2. Duplicates are dropped, keeping the last occurrence.
//! 3. Roles are ordered by [`Layer`] band; order within a band is kept.
//! 4. Attributes fold left to right. In dark mode each role contributes its
//!    light set with its dark set on top.
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
//!             .with_dark(Property::Background, "zinc-600")
//!             .with_dark(Property::Text, "slate-300"),
//!     )?
//!     .build()?;
//!
//! let resolved = table.resolve(&["color-is-selected", "disabled"], ColorMode::Dark)?;
//! assert_eq!(resolved.get(Property::Background), Some("zinc-600"));
//! assert_eq!(resolved.get(Property::Text), Some("slate-300"));
//! # Ok::<(), duotone::ThemeError>(())
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;

use super::entry::{Layer, ThemeEntry};
use super::mode::ColorMode;
use crate::error::ThemeError;
use crate::style::{split_roles, AttributeSet, StyleRole};

/// Collects entries and checks the includes relation as they arrive.
#[derive(Debug, Clone, Default)]
pub struct ThemeTableBuilder {
    entries: IndexMap<StyleRole, ThemeEntry>,
}

impl ThemeTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry.
    ///
    /// # Errors
    ///
    /// - `InvalidRole` if the role or an include name is malformed
    /// - `DuplicateRole` if the role is already registered
    /// - `CyclicComposition` if the entry's includes reach the entry itself
    pub fn register(&mut self, entry: ThemeEntry) -> Result<&mut Self, ThemeError> {
        entry.validate()?;

        let role = entry.role().clone();
        if self.entries.contains_key(&role) {
            return Err(ThemeError::DuplicateRole(role.to_string()));
        }

        let mut visited = HashSet::new();
        for include in entry.includes() {
            let mut path = vec![role.to_string()];
            if self.reaches(include, &role, &mut path, &mut visited) {
                return Err(ThemeError::CyclicComposition { path });
            }
        }

        self.entries.insert(role, entry);
        Ok(self)
    }

    /// Registers an entry, returning the builder for chaining.
    pub fn with_entry(mut self, entry: ThemeEntry) -> Result<Self, ThemeError> {
        self.register(entry)?;
        Ok(self)
    }

    /// Registers every entry in order, stopping at the first error.
    pub fn extend<I>(&mut self, entries: I) -> Result<&mut Self, ThemeError>
    where
        I: IntoIterator<Item = ThemeEntry>,
    {
        for entry in entries {
            self.register(entry)?;
        }
        Ok(self)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.entries.contains_key(normalize(role))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depth-first search for a path from `from` to `target` over the
    /// registered includes. On success `path` holds the full loop.
    fn reaches(
        &self,
        from: &StyleRole,
        target: &StyleRole,
        path: &mut Vec<String>,
        visited: &mut HashSet<StyleRole>,
    ) -> bool {
        path.push(from.to_string());
        if from == target {
            return true;
        }
        if visited.insert(from.clone()) {
            if let Some(entry) = self.entries.get(from) {
                for include in entry.includes() {
                    if self.reaches(include, target, path, visited) {
                        return true;
                    }
                }
            }
        }
        path.pop();
        false
    }

    /// Finishes construction.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedInclude` for the first include naming a role that
    /// was never registered.
    pub fn build(self) -> Result<ThemeTable, ThemeError> {
        for entry in self.entries.values() {
            if let Some(missing) = entry
                .includes()
                .iter()
                .find(|include| !self.entries.contains_key(*include))
            {
                return Err(ThemeError::UnresolvedInclude {
                    role: entry.role().to_string(),
                    include: missing.to_string(),
                });
            }
        }

        let mut memo = vec![None; self.entries.len()];
        let lineages: Vec<Vec<usize>> = (0..self.entries.len())
            .map(|index| lineage_of(&self.entries, index, &mut memo))
            .collect();

        let nodes = self
            .entries
            .into_iter()
            .zip(lineages)
            .map(|((role, entry), lineage)| (role, Node { entry, lineage, band: Layer::Base }))
            .collect::<IndexMap<_, _>>();

        let mut table = ThemeTable { nodes };
        let bands: Vec<Layer> = table
            .nodes
            .values()
            .map(|node| {
                node.lineage
                    .iter()
                    .map(|&i| table.nodes[i].entry.layer())
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        for (node, band) in table.nodes.values_mut().zip(bands) {
            node.band = band;
        }

        tracing::debug!(roles = table.len(), "built theme table");
        Ok(table)
    }
}

/// The lineage of `index`: includes depth-first, then the role, deduplicated.
///
/// Each included role's lineage is computed once and reused, so shared
/// includes cost one expansion however many paths reach them.
fn lineage_of(
    entries: &IndexMap<StyleRole, ThemeEntry>,
    index: usize,
    memo: &mut Vec<Option<Vec<usize>>>,
) -> Vec<usize> {
    if let Some(lineage) = &memo[index] {
        return lineage.clone();
    }

    let mut expanded = Vec::new();
    for include in entries[index].includes() {
        if let Some(included) = entries.get_index_of(include) {
            expanded.extend(lineage_of(entries, included, memo));
        }
    }
    expanded.push(index);

    let lineage = keep_last(expanded);
    memo[index] = Some(lineage.clone());
    lineage
}

/// Drops repeated items, keeping each at its last position.
fn keep_last<T: Copy + Eq + std::hash::Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut kept: Vec<T> = items
        .into_iter()
        .rev()
        .filter(|item| seen.insert(*item))
        .collect();
    kept.reverse();
    kept
}

#[derive(Debug, Clone)]
struct Node {
    entry: ThemeEntry,
    /// Flattened fold order for this role alone.
    lineage: Vec<usize>,
    /// Highest layer across the lineage.
    band: Layer,
}

/// An immutable, validated table of theme entries.
///
/// Tables are `Send + Sync`; share one behind an `Arc` and resolve from any
/// number of threads.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    nodes: IndexMap<StyleRole, Node>,
}

impl ThemeTable {
    pub fn builder() -> ThemeTableBuilder {
        ThemeTableBuilder::new()
    }

    /// Builds a table from entries in one step.
    pub fn from_entries<I>(entries: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = ThemeEntry>,
    {
        let mut builder = ThemeTableBuilder::new();
        builder.extend(entries)?;
        builder.build()
    }

    /// Returns the entry registered for `role`.
    pub fn get(&self, role: &str) -> Option<&ThemeEntry> {
        self.nodes.get(normalize(role)).map(|node| &node.entry)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.nodes.contains_key(normalize(role))
    }

    /// Roles in registration order.
    pub fn roles(&self) -> impl Iterator<Item = &StyleRole> {
        self.nodes.keys()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ThemeEntry> {
        self.nodes.values().map(|node| &node.entry)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The flattened fold order of a single role: every transitively included
    /// role, then the role itself.
    pub fn lineage(&self, role: &str) -> Result<Vec<&StyleRole>, ThemeError> {
        let index = self.index_of(role)?;
        Ok(self.nodes[index]
            .lineage
            .iter()
            .filter_map(|&i| self.nodes.get_index(i).map(|(role, _)| role))
            .collect())
    }

    /// Resolves an ordered role sequence for `mode`.
    ///
    /// Roles apply left to right, lowest to highest priority, after includes
    /// are expanded and layers are banded.
    ///
    /// # Errors
    ///
    /// - `EmptyRoleSequence` if `roles` is empty
    /// - `UnknownRole` naming the first role not in the table
    pub fn resolve<S: AsRef<str>>(
        &self,
        roles: &[S],
        mode: ColorMode,
    ) -> Result<AttributeSet, ThemeError> {
        if roles.is_empty() {
            return Err(ThemeError::EmptyRoleSequence);
        }

        let mut expanded: Vec<(usize, Layer)> = Vec::new();
        for role in roles {
            let index = self.index_of(role.as_ref())?;
            let node = &self.nodes[index];
            expanded.extend(node.lineage.iter().map(|&i| (i, node.band)));
        }

        let mut seen = HashSet::new();
        let mut order: Vec<(usize, Layer)> = expanded
            .into_iter()
            .rev()
            .filter(|(index, _)| seen.insert(*index))
            .collect();
        order.reverse();
        order.sort_by_key(|&(_, band)| band);

        let mut resolved = AttributeSet::new();
        for (index, _) in order {
            self.nodes[index].entry.apply(&mut resolved, mode);
        }
        Ok(resolved)
    }

    /// Resolves a composite role string such as `"color-is-selected + disabled"`
    /// or `"color-is-selected disabled"`.
    pub fn resolve_str(&self, composite: &str, mode: ColorMode) -> Result<AttributeSet, ThemeError> {
        self.resolve(&split_roles(composite), mode)
    }

    fn index_of(&self, role: &str) -> Result<usize, ThemeError> {
        self.nodes
            .get_index_of(normalize(role))
            .ok_or_else(|| ThemeError::UnknownRole(role.to_string()))
    }
}

fn normalize(role: &str) -> &str {
    let role = role.trim();
    role.strip_prefix('.').unwrap_or(role)
}
