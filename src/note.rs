//! # Note Constructor
//!
//! Builds the canonical, fully derived [`Note`] from one of three inputs:
//!
//! ```text
//! NoteInit::Name("Bb3")  ─► from_name ───────────────────────────► Note
//! NoteInit::Midi(58)     ─► from_midi ─► render "A#3" ─► from_name ─► Note
//! NoteInit::Frequency(f) ─► from_frequency ─► midi ─► from_midi ─► ...
//! ```
//!
//! Every path ends in `from_name`, so letter, step, accidental and
//! alteration are always filled the same way.
//!
//! ## Octave carry
//! An accidental can push a note across the C boundary of its written octave.
//! `Cb4` sounds as B3 and `B#4` sounds as C5, so the stored octave includes
//! the carry and the canonical name is re-rendered from it:
//!
//! | input | octave | midi | name  |
//! |-------|--------|------|-------|
//! | `C4`  | 4      | 60   | `C4`  |
//! | `Cb4` | 3      | 59   | `Cb3` |
//! | `B#4` | 5      | 72   | `B#5` |
//!
//! ## Frequency rounding
//! Frequencies map to the MIDI number at or above them (ceiling). Even
//! 440.1 Hz, less than half a cent above A4, becomes A#4. Only float noise
//! from `log2` is snapped back onto a key before the ceiling.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::Serialize;

use crate::convert::{
    accidental_to_alteration, alteration_to_accidental, chroma_to_pc, frequency_to_midi, letter_offset,
    letter_to_step, midi_to_frequency, midi_to_octave, octave_to_semitones, step_to_letter,
};
use crate::error::NoteError;
use crate::settings::Settings;
use crate::theory::{is_black_key, tokenize, DEFAULT_OCTAVE};
use crate::validate::{is_frequency, is_midi};

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Parse a letter (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        letter_to_step(c).and_then(Self::from_step)
    }

    /// Letter for a diatonic step, 0 = C
    pub fn from_step(step: u8) -> Option<Self> {
        match step_to_letter(step)? {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Diatonic step, C = 0 through B = 6
    pub fn step(self) -> u8 {
        self as u8
    }

    /// Semitones above C of the natural note
    pub fn offset(self) -> i32 {
        letter_offset(self.as_char()).unwrap_or(0)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| NoteError::InvalidName(s.to_string())),
            _ => Err(NoteError::InvalidName(s.to_string())),
        }
    }
}

/// What a note is built from
#[derive(Debug, Clone, PartialEq)]
pub enum NoteInit {
    Name(String),
    Midi(i32),
    /// Frequency in Hz
    Frequency(f64),
}

impl NoteInit {
    pub fn name(name: impl Into<String>) -> Self {
        NoteInit::Name(name.into())
    }

    pub fn midi(midi: i32) -> Self {
        NoteInit::Midi(midi)
    }

    pub fn frequency(frequency: f64) -> Self {
        NoteInit::Frequency(frequency)
    }
}

impl From<&str> for NoteInit {
    fn from(name: &str) -> Self {
        NoteInit::Name(name.to_string())
    }
}

impl From<String> for NoteInit {
    fn from(name: String) -> Self {
        NoteInit::Name(name)
    }
}

impl From<i32> for NoteInit {
    fn from(midi: i32) -> Self {
        NoteInit::Midi(midi)
    }
}

impl From<f64> for NoteInit {
    fn from(frequency: f64) -> Self {
        NoteInit::Frequency(frequency)
    }
}

/// Read a note from command-line style text.
///
/// - `440hz` / `440Hz` -> frequency
/// - `60` -> MIDI number
/// - `261.63` -> frequency
/// - anything else -> name (validated later, on construction)
impl FromStr for NoteInit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();

        if let Some(number) = lower.strip_suffix("hz") {
            if let Ok(frequency) = number.trim().parse::<f64>() {
                return Ok(NoteInit::Frequency(frequency));
            }
        }
        if let Ok(midi) = trimmed.parse::<i32>() {
            return Ok(NoteInit::Midi(midi));
        }
        if trimmed.contains('.') {
            if let Ok(frequency) = trimmed.parse::<f64>() {
                return Ok(NoteInit::Frequency(frequency));
            }
        }
        Ok(NoteInit::Name(trimmed.to_string()))
    }
}

impl fmt::Display for NoteInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteInit::Name(name) => write!(f, "{}", name),
            NoteInit::Midi(midi) => write!(f, "{}", midi),
            NoteInit::Frequency(frequency) => write!(f, "{}Hz", frequency),
        }
    }
}

/// A single musical pitch with every field derived from one representation.
///
/// Notes are immutable; operations that change a note build a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    name: String,
    letter: Letter,
    step: u8,
    octave: i32,
    accidental: String,
    alteration: i32,
    pc: String,
    chroma: u8,
    midi: i32,
    frequency: f64,
}

/// Build a note from any input, or fail with the reason it is not a note.
///
/// This is the single entry point that every derived operation goes through.
///
/// # Example
/// ```rust
/// use pitch::{make_note, NoteInit, Settings};
///
/// let note = make_note(&NoteInit::midi(69), &Settings::default())?;
/// assert_eq!(note.name(), "A4");
/// assert_eq!(note.frequency(), 440.0);
/// # Ok::<(), pitch::NoteError>(())
/// ```
pub fn make_note(init: &NoteInit, settings: &Settings) -> Result<Note, NoteError> {
    let result = settings.validate().and_then(|()| match init {
        NoteInit::Name(name) => Note::from_name(name, settings.tuning),
        NoteInit::Midi(midi) => Note::from_midi(*midi, settings),
        NoteInit::Frequency(frequency) => Note::from_frequency(*frequency, settings),
    });

    match &result {
        Ok(note) => trace!("built {} (midi {}) from {}", note.name, note.midi, init),
        Err(e) => debug!("no note from {}: {}", init, e),
    }
    result
}

impl Note {
    /// Parse a note name like `"C#4"`, `"eb"` or `"Bx-1"`.
    pub fn from_name(name: &str, tuning: f64) -> Result<Self, NoteError> {
        let invalid = || NoteError::InvalidName(name.to_string());

        let tokens = tokenize(name)
            .filter(|tokens| tokens.rest.is_empty())
            .ok_or_else(invalid)?;
        let letter = tokens
            .letter
            .chars()
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;
        let written_octave = if tokens.octave.is_empty() {
            DEFAULT_OCTAVE
        } else {
            tokens.octave.parse::<i32>().map_err(|_| invalid())?
        };

        Self::assemble(letter, tokens.accidental, written_octave, tuning)
            .ok_or_else(invalid)
    }

    /// Build a note from a MIDI number in 0..=135, spelled per `settings`.
    pub fn from_midi(midi: i32, settings: &Settings) -> Result<Self, NoteError> {
        if !is_midi(midi as f64) {
            return Err(NoteError::MidiOutOfRange(midi as f64));
        }
        let chroma = midi.rem_euclid(12) as u8;
        let name = format!(
            "{}{}",
            chroma_to_pc(chroma, settings.spelling),
            midi_to_octave(midi)
        );
        Self::from_name(&name, settings.tuning)
    }

    /// Build the note at or above a frequency.
    pub fn from_frequency(frequency: f64, settings: &Settings) -> Result<Self, NoteError> {
        if !is_frequency(frequency) {
            return Err(NoteError::InvalidFrequency(frequency));
        }
        let midi = frequency_to_midi(frequency, settings.tuning).ceil();
        if !is_midi(midi) {
            return Err(NoteError::MidiOutOfRange(midi));
        }
        Self::from_midi(midi as i32, settings)
    }

    /// Derive every field from a letter, an accidental and the octave as
    /// written. Returns `None` if the MIDI number overflows.
    fn assemble(letter: Letter, accidental: &str, written_octave: i32, tuning: f64) -> Option<Self> {
        let alteration = accidental_to_alteration(accidental);
        let accidental = alteration_to_accidental(alteration);
        let semitones = letter.offset().checked_add(alteration)?;
        let octave = written_octave.checked_add(semitones.div_euclid(12))?;
        let chroma = semitones.rem_euclid(12) as u8;
        let midi = octave_to_semitones(octave)?.checked_add(chroma as i32)?;
        let pc = format!("{}{}", letter, accidental);

        Some(Self {
            name: format!("{}{}", pc, octave),
            letter,
            step: letter.step(),
            octave,
            accidental,
            alteration,
            pc,
            chroma,
            midi,
            frequency: midi_to_frequency(midi, tuning),
        })
    }

    /// The same pitch class in another octave, keeping its spelling.
    pub(crate) fn with_octave(&self, octave: i32, tuning: f64) -> Option<Self> {
        let written = octave.checked_sub(self.octave_carry())?;
        Self::assemble(self.letter, &self.accidental, written, tuning)
    }

    /// Octaves the accidental moved this note away from its written octave
    fn octave_carry(&self) -> i32 {
        (self.letter.offset() + self.alteration).div_euclid(12)
    }

    /// Canonical name, e.g. `"A#4"`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Diatonic step of the letter, C = 0
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// The accidental run, empty for naturals
    pub fn accidental(&self) -> &str {
        &self.accidental
    }

    pub fn alteration(&self) -> i32 {
        self.alteration
    }

    /// Pitch class: letter and accidental without octave
    pub fn pc(&self) -> &str {
        &self.pc
    }

    /// Pitch class as 0..=11, C = 0
    pub fn chroma(&self) -> u8 {
        self.chroma
    }

    pub fn midi(&self) -> i32 {
        self.midi
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn is_black_key(&self) -> bool {
        is_black_key(self.chroma)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Note {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::from_name(s, Settings::default().tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Spelling;

    fn note(name: &str) -> Note {
        name.parse().unwrap()
    }

    #[test]
    fn test_from_name_fields() {
        let n = note("A#4");
        assert_eq!(n.name(), "A#4");
        assert_eq!(n.letter(), Letter::A);
        assert_eq!(n.step(), 5);
        assert_eq!(n.octave(), 4);
        assert_eq!(n.accidental(), "#");
        assert_eq!(n.alteration(), 1);
        assert_eq!(n.pc(), "A#");
        assert_eq!(n.chroma(), 10);
        assert_eq!(n.midi(), 70);
        assert!(n.is_black_key());
    }

    #[test]
    fn test_from_name_defaults_and_case() {
        let n = note("eb");
        assert_eq!(n.name(), "Eb4");
        assert_eq!(n.octave(), 4);
        assert_eq!(n.midi(), 63);
        assert!(!note("c").is_black_key());
    }

    #[test]
    fn test_negative_octave() {
        let n = note("C-1");
        assert_eq!(n.midi(), 0);
        assert_eq!(n.octave(), -1);
        assert_eq!(n.name(), "C-1");
    }

    #[test]
    fn test_double_sharp_shorthand() {
        let n = note("Fx3");
        assert_eq!(n.accidental(), "##");
        assert_eq!(n.alteration(), 2);
        assert_eq!(n.name(), "F##3");
        assert_eq!(n.chroma(), 7);
    }

    #[test]
    fn test_octave_carry() {
        let cb = note("Cb4");
        assert_eq!(cb.octave(), 3);
        assert_eq!(cb.chroma(), 11);
        assert_eq!(cb.midi(), 59);
        assert_eq!(cb.name(), "Cb3");

        let bs = note("B#4");
        assert_eq!(bs.octave(), 5);
        assert_eq!(bs.chroma(), 0);
        assert_eq!(bs.midi(), 72);

        let cbb = note("Cbb0");
        assert_eq!(cbb.octave(), -1);
        assert_eq!(cbb.midi(), 10);
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "H4", "C#b4", "C4x", "4", "C 4 5", "C99999999999"] {
            assert_eq!(
                Note::from_name(name, 440.0),
                Err(NoteError::InvalidName(name.to_string())),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_octave_overflow_is_invalid() {
        assert!(Note::from_name("C2147483647", 440.0).is_err());
        assert!(Note::from_name("Cb-2147483648", 440.0).is_err());
    }

    #[test]
    fn test_from_midi_spelling() {
        let sharps = Settings::default();
        let flats = sharps.with_spelling(Spelling::Flats);
        assert_eq!(Note::from_midi(61, &sharps).unwrap().name(), "C#4");
        assert_eq!(Note::from_midi(61, &flats).unwrap().name(), "Db4");
        assert_eq!(Note::from_midi(60, &flats).unwrap().name(), "C4");
        assert_eq!(Note::from_midi(0, &sharps).unwrap().name(), "C-1");
        assert_eq!(Note::from_midi(135, &sharps).unwrap().name(), "D#10");
    }

    #[test]
    fn test_from_midi_out_of_range() {
        let settings = Settings::default();
        assert_eq!(Note::from_midi(200, &settings), Err(NoteError::MidiOutOfRange(200.0)));
        assert_eq!(Note::from_midi(-1, &settings), Err(NoteError::MidiOutOfRange(-1.0)));
        assert_eq!(Note::from_midi(136, &settings), Err(NoteError::MidiOutOfRange(136.0)));
    }

    #[test]
    fn test_from_frequency_uses_ceiling() {
        let settings = Settings::default();
        assert_eq!(Note::from_frequency(440.0, &settings).unwrap().name(), "A4");
        assert_eq!(Note::from_frequency(450.0, &settings).unwrap().name(), "A#4");
        // 8 cents below A4 still lands on A4
        assert_eq!(Note::from_frequency(438.0, &settings).unwrap().name(), "A4");
        let c4 = midi_to_frequency(60, 440.0);
        assert_eq!(Note::from_frequency(c4, &settings).unwrap().name(), "C4");
    }

    #[test]
    fn test_from_frequency_just_above_key_rounds_up() {
        let settings = Settings::default();
        let a = Note::from_frequency(440.1, &settings).unwrap();
        assert_eq!(a.midi(), 70);
        assert_eq!(a.name(), "A#4");
        assert_eq!(Note::from_frequency(261.7, &settings).unwrap().name(), "C#4");
        assert_eq!(Note::from_frequency(439.9, &settings).unwrap().name(), "A4");
    }

    #[test]
    fn test_from_frequency_invalid() {
        let settings = Settings::default();
        assert_eq!(Note::from_frequency(-5.0, &settings), Err(NoteError::InvalidFrequency(-5.0)));
        assert_eq!(Note::from_frequency(0.0, &settings), Err(NoteError::InvalidFrequency(0.0)));
        assert!(Note::from_frequency(f64::NAN, &settings).is_err());
        assert!(matches!(
            Note::from_frequency(1.0e9, &settings),
            Err(NoteError::MidiOutOfRange(_))
        ));
    }

    #[test]
    fn test_custom_tuning() {
        let settings = Settings::default().with_tuning(432.0);
        let a4 = make_note(&NoteInit::name("A4"), &settings).unwrap();
        assert_eq!(a4.frequency(), 432.0);
        let from_freq = make_note(&NoteInit::frequency(432.0), &settings).unwrap();
        assert_eq!(from_freq.name(), "A4");
    }

    #[test]
    fn test_make_note_rejects_bad_tuning() {
        let settings = Settings::default().with_tuning(-1.0);
        assert_eq!(
            make_note(&NoteInit::name("A4"), &settings),
            Err(NoteError::InvalidTuning(-1.0))
        );
    }

    #[test]
    fn test_with_octave_keeps_spelling() {
        let cb = note("Cb4");
        let up = cb.with_octave(cb.octave() + 1, 440.0).unwrap();
        assert_eq!(up.pc(), "Cb");
        assert_eq!(up.octave(), 4);
        assert_eq!(up.midi(), cb.midi() + 12);
    }

    #[test]
    fn test_note_init_from_str() {
        assert_eq!("60".parse::<NoteInit>().unwrap(), NoteInit::Midi(60));
        assert_eq!("440hz".parse::<NoteInit>().unwrap(), NoteInit::Frequency(440.0));
        assert_eq!("261.5".parse::<NoteInit>().unwrap(), NoteInit::Frequency(261.5));
        assert_eq!("C#4".parse::<NoteInit>().unwrap(), NoteInit::name("C#4"));
        assert_eq!("-5".parse::<NoteInit>().unwrap(), NoteInit::Midi(-5));
    }

    #[test]
    fn test_letter_parsing() {
        assert_eq!("g".parse::<Letter>().unwrap(), Letter::G);
        assert!("H".parse::<Letter>().is_err());
        assert!("CD".parse::<Letter>().is_err());
        assert_eq!(Letter::from_step(6), Some(Letter::B));
        assert_eq!(Letter::B.offset(), 11);
        assert_eq!(Letter::F.to_string(), "F");
    }
}
