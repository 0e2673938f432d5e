//! # Settings
//!
//! Construction options shared by every operation: the tuning reference for A4
//! and the preferred spelling of black keys when a note is built from a MIDI
//! number or a frequency.
//!
//! Settings can be loaded from YAML:
//!
//! ```yaml
//! tuning: 442
//! spelling: flats
//! ```
//!
//! Both keys are optional; missing keys keep their defaults (440 Hz, sharps).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::NoteError;
use crate::theory::A4_TUNING;

/// Which accidental black keys are spelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    /// The other spelling
    pub fn flipped(self) -> Self {
        match self {
            Spelling::Sharps => Spelling::Flats,
            Spelling::Flats => Spelling::Sharps,
        }
    }
}

impl FromStr for Spelling {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sharps" | "sharp" | "#" => Ok(Spelling::Sharps),
            "flats" | "flat" | "b" => Ok(Spelling::Flats),
            other => Err(NoteError::ConfigError(format!("Unknown spelling: {}", other))),
        }
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spelling::Sharps => write!(f, "sharps"),
            Spelling::Flats => write!(f, "flats"),
        }
    }
}

/// Options for building notes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Frequency of A4 in Hz
    pub tuning: f64,
    pub spelling: Spelling,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: A4_TUNING,
            spelling: Spelling::Sharps,
        }
    }
}

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawSettings {
    pub tuning: Option<f64>,
    pub spelling: Option<String>,
}

impl Settings {
    pub fn with_tuning(self, tuning: f64) -> Self {
        Self { tuning, ..self }
    }

    pub fn with_spelling(self, spelling: Spelling) -> Self {
        Self { spelling, ..self }
    }

    /// Check that the tuning reference can produce frequencies
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.tuning.is_finite() && self.tuning > 0.0 {
            Ok(())
        } else {
            Err(NoteError::InvalidTuning(self.tuning))
        }
    }

    /// Parse settings from YAML content
    pub fn from_yaml(content: &str) -> Result<Self, NoteError> {
        // an empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| NoteError::ConfigError(e.to_string()))?;

        let tuning = raw.tuning.unwrap_or(A4_TUNING);
        if !(tuning.is_finite() && tuning > 0.0) {
            return Err(NoteError::ConfigError(format!(
                "Tuning must be a positive number of Hz: {}",
                tuning
            )));
        }

        let spelling = if let Some(s) = &raw.spelling {
            s.parse()?
        } else {
            Spelling::default()
        };

        Ok(Self { tuning, spelling })
    }
}
