//! # Primitive Converters
//!
//! Stateless conversions between the atomic units a note is built from:
//! letters and diatonic steps, accidental strings and alterations, octaves
//! and semitone offsets, MIDI numbers and frequencies.
//!
//! None of these functions validate ranges beyond what their types demand.
//! Range checks live in `validate`.

use crate::settings::Spelling;
use crate::theory::{A4_MIDI, FLATS, SHARPS};

const STEP_LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Diatonic step of a letter, C = 0 through B = 6 (case-insensitive)
pub fn letter_to_step(letter: char) -> Option<u8> {
    let upper = letter.to_ascii_uppercase();
    if !('A'..='G').contains(&upper) {
        return None;
    }
    Some(((upper as u32 + 3) % 7) as u8)
}

/// Letter of a diatonic step, 0 = C through 6 = B
pub fn step_to_letter(step: u8) -> Option<char> {
    STEP_LETTERS.get(step as usize).copied()
}

/// Semitones above C of the natural note with this letter
pub fn letter_offset(letter: char) -> Option<i32> {
    let upper = letter.to_ascii_uppercase().to_string();
    SHARPS
        .iter()
        .position(|pc| *pc == upper)
        .map(|index| index as i32)
}

/// Expand the double-sharp shorthand: every `x` becomes `##`
pub fn expand_accidental(accidental: &str) -> String {
    accidental.replace('x', "##")
}

/// Signed semitone shift of an accidental string.
///
/// Each `#` counts +1, each `b` counts -1 and each `x` counts +2. The sign is
/// taken from the first character, so the input is expected to be a single
/// run as produced by the name tokenizer.
pub fn accidental_to_alteration(accidental: &str) -> i32 {
    let expanded = expand_accidental(accidental);
    let len = expanded.chars().count() as i32;
    match expanded.chars().next() {
        Some('#') => len,
        Some('b') => -len,
        _ => 0,
    }
}

/// Accidental string for a signed alteration (`2 -> "##"`, `-1 -> "b"`)
pub fn alteration_to_accidental(alteration: i32) -> String {
    if alteration >= 0 {
        "#".repeat(alteration as usize)
    } else {
        "b".repeat(alteration.unsigned_abs() as usize)
    }
}

/// MIDI number of C in the given octave (C4 = 60), `None` on overflow
pub fn octave_to_semitones(octave: i32) -> Option<i32> {
    octave.checked_add(1)?.checked_mul(12)
}

/// Octave that contains the given MIDI number
pub fn midi_to_octave(midi: i32) -> i32 {
    midi.div_euclid(12) - 1
}

/// Equal-tempered frequency of a MIDI number, relative to `tuning` for A4
pub fn midi_to_frequency(midi: i32, tuning: f64) -> f64 {
    tuning * 2f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

/// Largest float error of `log2` absorbed when snapping to a whole MIDI number
const MIDI_EPSILON: f64 = 1e-9;

/// Fractional MIDI number of a frequency.
///
/// Values within `1e-9` of a whole number are snapped onto it, so exact note
/// frequencies keep their MIDI number despite the float error of `log2`.
/// Anything further away is returned unchanged.
pub fn frequency_to_midi(frequency: f64, tuning: f64) -> f64 {
    let midi = 12.0 * (frequency / tuning).log2() + A4_MIDI as f64;
    let nearest = midi.round();
    if (midi - nearest).abs() < MIDI_EPSILON {
        nearest
    } else {
        midi
    }
}

/// Pitch-class name of a chroma in the requested spelling
pub fn chroma_to_pc(chroma: u8, spelling: Spelling) -> &'static str {
    let table = match spelling {
        Spelling::Sharps => &SHARPS,
        Spelling::Flats => &FLATS,
    };
    table[(chroma % 12) as usize]
}
