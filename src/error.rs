//! # Error Types
//!
//! This module defines all error types for the pitch library.
//!
//! Every failed note construction ends in exactly one of these variants, so a
//! `Result<Note, NoteError>` is either a fully derived note or the "no note"
//! outcome. Nothing in the library panics on bad input.
//!
//! ## Error Types
//! - `InvalidName` - the text does not follow the note-name grammar
//! - `MidiOutOfRange` - MIDI number is not an integer in 0..=135
//! - `InvalidFrequency` - frequency is not a positive, finite number
//! - `InvalidTuning` - tuning reference is not a positive, finite number
//! - `UnsupportedProperty` / `UnknownProperty` / `UnknownOperator` - bad
//!   arguments to the derived operations
//! - `InvalidAmount` - transposition amount cannot be applied to the property
//! - `ConfigError` - invalid YAML settings
//!
//! ## Usage
//! ```rust
//! use pitch::{make_note, NoteError, NoteInit, Settings};
//!
//! match make_note(&NoteInit::name("H4"), &Settings::default()) {
//!     Ok(note) => println!("{} = {} Hz", note, note.frequency()),
//!     Err(NoteError::InvalidName(name)) => eprintln!("not a note: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoteError {
    /// The text is not a note name.
    ///
    /// # Example
    /// ```
    /// # use pitch::NoteError;
    /// let err = NoteError::InvalidName("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: 'H4'");
    /// ```
    #[error("Invalid note name: '{0}'")]
    InvalidName(String),

    /// The MIDI number is fractional or outside 0..=135.
    ///
    /// # Example
    /// ```
    /// # use pitch::NoteError;
    /// let err = NoteError::MidiOutOfRange(200.0);
    /// assert_eq!(err.to_string(), "MIDI number out of range (0-135): 200");
    /// ```
    #[error("MIDI number out of range (0-135): {0}")]
    MidiOutOfRange(f64),

    /// The frequency is zero, negative, NaN or infinite.
    #[error("Invalid frequency: {0} Hz")]
    InvalidFrequency(f64),

    /// The tuning reference for A4 is zero, negative, NaN or infinite.
    #[error("Invalid tuning reference: {0} Hz")]
    InvalidTuning(f64),

    /// The property exists but the operation cannot use it (e.g. transposing by `chroma`).
    ///
    /// # Example
    /// ```
    /// # use pitch::NoteError;
    /// let err = NoteError::UnsupportedProperty {
    ///     operation: "transpose",
    ///     property: "chroma".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Property 'chroma' is not supported by transpose");
    /// ```
    #[error("Property '{property}' is not supported by {operation}")]
    UnsupportedProperty {
        operation: &'static str,
        property: String,
    },

    /// The name is not a field of a note record.
    #[error("Unknown note property: '{0}'")]
    UnknownProperty(String),

    /// The comparison operator is not one of lt, leq, eq, neq, gt, geq.
    #[error("Unknown comparison operator: '{0}'")]
    UnknownOperator(String),

    /// The transposition amount cannot be applied (e.g. half an octave).
    #[error("Invalid amount {amount} for property '{property}'")]
    InvalidAmount { amount: f64, property: String },

    /// Invalid settings, usually from a YAML configuration file.
    ///
    /// # Example
    /// ```
    /// # use pitch::NoteError;
    /// let err = NoteError::ConfigError("Unknown spelling: up".to_string());
    /// assert_eq!(err.to_string(), "Invalid settings: Unknown spelling: up");
    /// ```
    #[error("Invalid settings: {0}")]
    ConfigError(String),
}
