//! Light/dark mode and the shared mode switch.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The display mode a theme is resolved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            ColorMode::Light => 0,
            ColorMode::Dark => 1,
        }
    }

    fn from_bits(bits: u8) -> Self {
        if bits == 0 {
            ColorMode::Light
        } else {
            ColorMode::Dark
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            _ => Err(ThemeError::InvalidMode(s.to_string())),
        }
    }
}

/// A process-wide mode value that can be swapped while readers run.
///
/// The mode is stored as a single atomic, so a reader sees either the old or
/// the new mode and never anything in between.
#[derive(Debug, Default)]
pub struct ModeCell(AtomicU8);

impl ModeCell {
    pub fn new(mode: ColorMode) -> Self {
        ModeCell(AtomicU8::new(mode.to_bits()))
    }

    /// Returns the current mode.
    pub fn get(&self) -> ColorMode {
        ColorMode::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replaces the current mode.
    pub fn set(&self, mode: ColorMode) {
        self.0.store(mode.to_bits(), Ordering::Release);
    }

    /// Replaces the current mode, returning the previous one.
    pub fn swap(&self, mode: ColorMode) -> ColorMode {
        ColorMode::from_bits(self.0.swap(mode.to_bits(), Ordering::AcqRel))
    }
}
