//! Loading theme tables from disk.
//!
//! A table source is either a single file or a directory. Directories are
//! walked recursively; every file with a recognized extension is parsed and
//! the entries are registered into one table in path order, so two files that
//! define the same role fail with `DuplicateRole`.
//!
//! | Extension        | Format |
//! |------------------|--------|
//! | `.yaml`, `.yml`  | YAML   |
//! | `.json`          | JSON   |
//! | `.css`           | CSS    |

use std::path::{Path, PathBuf};

use super::css::parse_css;
use super::yaml::{parse_json, parse_yaml};
use crate::error::ThemeError;
use crate::theme::{ThemeEntry, ThemeTable};

/// File extensions recognized as theme tables.
pub const TABLE_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json", ".css"];

/// Source format of a theme table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Css,
}

impl Format {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "css" => Some(Format::Css),
            _ => None,
        }
    }

    /// Parses source text in this format.
    pub fn parse(self, source: &str) -> Result<Vec<ThemeEntry>, ThemeError> {
        match self {
            Format::Yaml => parse_yaml(source),
            Format::Json => parse_json(source),
            Format::Css => parse_css(source),
        }
    }
}

/// Reads and parses one table file.
///
/// # Errors
///
/// `Load` if the file cannot be read or has no recognized extension; parse
/// errors carry the file path.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<ThemeEntry>, ThemeError> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| ThemeError::Load {
        message: format!(
            "{}: unrecognized extension (expected one of {})",
            path.display(),
            TABLE_EXTENSIONS.join(", ")
        ),
    })?;

    let source = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
        message: format!("{}: {}", path.display(), e),
    })?;

    let entries = format.parse(&source).map_err(|e| e.with_path(path))?;
    tracing::debug!(path = %path.display(), ?format, roles = entries.len(), "parsed theme file");
    Ok(entries)
}

/// Reads and parses every table file under `root`, in path order.
pub fn load_dir<P: AsRef<Path>>(root: P) -> Result<Vec<ThemeEntry>, ThemeError> {
    let mut files = Vec::new();
    walk_dir(root.as_ref(), &mut files)?;
    files.sort();

    let mut entries = Vec::new();
    for file in &files {
        entries.extend(load_file(file)?);
    }
    Ok(entries)
}

/// Builds a table from a file or a directory of files.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<ThemeTable, ThemeError> {
    let path = path.as_ref();
    let entries = if path.is_dir() {
        load_dir(path)?
    } else {
        load_file(path)?
    };

    let mut builder = ThemeTable::builder();
    builder.extend(entries)?;
    builder.build()
}

fn walk_dir(current: &Path, files: &mut Vec<PathBuf>) -> Result<(), ThemeError> {
    let io_error = |e: std::io::Error| ThemeError::Load {
        message: format!("{}: {}", current.display(), e),
    };

    for entry in std::fs::read_dir(current).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.is_file() && Format::from_path(&path).is_some() {
            files.push(path);
        }
    }
    Ok(())
}
