//! # Theory Tables
//!
//! Read-only lookup data shared by every other module: the twelve pitch-class
//! names in sharp and flat spelling, the white/black key chroma sets, the
//! tuning reference and the note-name pattern.
//!
//! Chroma indexing is always `0 = C` through `11 = B`.

use std::sync::OnceLock;

use regex::Regex;

/// Pitch-class names spelled with sharps, indexed by chroma
pub const SHARPS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch-class names spelled with flats, indexed by chroma
pub const FLATS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Chromas of the piano's white keys (the natural notes)
pub const WHITE_KEYS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Chromas of the piano's black keys
pub const BLACK_KEYS: [u8; 5] = [1, 3, 6, 8, 10];

/// Reference pitch for A4 in Hz
pub const A4_TUNING: f64 = 440.0;

/// MIDI number of A4
pub const A4_MIDI: i32 = 69;

/// Octave used when a name carries no octave digits
pub const DEFAULT_OCTAVE: i32 = 4;

/// Highest MIDI number a note may be built from
pub const MAX_MIDI: i32 = 135;

/// Note-name grammar: letter, one accidental run, optional signed octave, rest.
///
/// The `rest` group must come back empty for the name to be valid. Mixed
/// accidental runs like `#b` leave the `b` in `rest`.
pub const NAME_PATTERN: &str = r"^(?P<letter>[a-gA-G])(?P<accidental>#+|b+|x+)?(?P<octave>-?\d+)?(?P<rest>.*)$";

static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn name_regex() -> &'static Regex {
    NAME_REGEX.get_or_init(|| Regex::new(NAME_PATTERN).expect("invalid note name pattern"))
}

/// The pieces of a note name, as written. Absent groups are empty strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NameTokens<'a> {
    pub letter: &'a str,
    pub accidental: &'a str,
    pub octave: &'a str,
    pub rest: &'a str,
}

/// Split a note name into its tokens.
///
/// Returns `None` when the text does not even start with a note letter.
/// A `Some` result may still carry a non-empty `rest`, which callers treat
/// as invalid.
pub fn tokenize(name: &str) -> Option<NameTokens<'_>> {
    let caps = name_regex().captures(name.trim())?;
    let group = |key: &str| caps.name(key).map_or("", |m| m.as_str());
    Some(NameTokens {
        letter: group("letter"),
        accidental: group("accidental"),
        octave: group("octave"),
        rest: group("rest"),
    })
}

/// True if the chroma is a natural note
pub fn is_white_key(chroma: u8) -> bool {
    WHITE_KEYS.contains(&chroma)
}

/// True if the chroma is a sharp/flat note
pub fn is_black_key(chroma: u8) -> bool {
    BLACK_KEYS.contains(&chroma)
}
