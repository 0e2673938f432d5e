//! # Validators
//!
//! Total predicates that gate each construction path. None of them panic, and
//! each one is the only check made before the matching parse path runs:
//!
//! - `is_name` before parsing text
//! - `is_midi` before building from a MIDI number
//! - `is_frequency` before converting a frequency
//!
//! Numeric predicates take `f64` so that fractional, NaN and infinite values
//! can be rejected instead of silently truncated.

use crate::record::Property;
use crate::theory::{tokenize, MAX_MIDI};

/// True if the text follows the note-name grammar with nothing left over
pub fn is_name(name: &str) -> bool {
    tokenize(name).is_some_and(|tokens| tokens.rest.is_empty())
}

/// True if the value is an integer in 0..=135
pub fn is_midi(value: f64) -> bool {
    is_integer(value) && (0.0..=MAX_MIDI as f64).contains(&value)
}

/// True if the value is a positive, finite number
pub fn is_frequency(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// True if the value is an integer in 0..=11
pub fn is_chroma(value: f64) -> bool {
    is_integer(value) && (0.0..=11.0).contains(&value)
}

/// True if the text names a field of a note record
pub fn is_key(key: &str) -> bool {
    key.parse::<Property>().is_ok()
}

pub(crate) fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}
