//! # Derived Operations
//!
//! Transposition, distance, comparison and enharmonic respelling.
//!
//! Every free function takes [`NoteInit`] values and builds them through
//! [`make_note`] first, so the arithmetic always runs on canonical fields.
//! The same operations are available as methods on an already built
//! [`Note`] (`transpose_by`, `distance_to`, `compare_to`).
//!
//! ## Invalid operands
//! If any operand fails to build, the operation returns that construction
//! error. Nothing is computed from sentinel defaults.
//!
//! ## Distances are not circular
//! `distance(B4, C4, chroma)` is `0 - 11 = -11`, not `+1`.

use std::fmt;
use std::str::FromStr;

use crate::convert::{chroma_to_pc, midi_to_octave};
use crate::error::NoteError;
use crate::note::{make_note, Note, NoteInit};
use crate::record::{NoteRecord, Property, Value};
use crate::settings::{Settings, Spelling};
use crate::validate::{is_integer, is_midi};

/// Relational operator for [`compare`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lt,
    Leq,
    Eq,
    Neq,
    Gt,
    Geq,
}

impl Operator {
    pub fn apply<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Operator::Lt => left < right,
            Operator::Leq => left <= right,
            Operator::Eq => left == right,
            Operator::Neq => left != right,
            Operator::Gt => left > right,
            Operator::Geq => left >= right,
        }
    }
}

impl FromStr for Operator {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lt" | "<" => Ok(Operator::Lt),
            "leq" | "<=" => Ok(Operator::Leq),
            "eq" | "==" => Ok(Operator::Eq),
            "neq" | "!=" => Ok(Operator::Neq),
            "gt" | ">" => Ok(Operator::Gt),
            "geq" | ">=" => Ok(Operator::Geq),
            other => Err(NoteError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Lt => "lt",
            Operator::Leq => "leq",
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Geq => "geq",
        };
        write!(f, "{}", name)
    }
}

impl Note {
    /// A new note `amount` away from this one.
    ///
    /// - `Midi`: semitones, spelled per `settings.spelling`
    /// - `Frequency`: Hz, then rounded up to the next MIDI number
    /// - `Octave`: whole octaves, keeping this note's spelling
    pub fn transpose_by(&self, amount: f64, property: Property, settings: &Settings) -> Result<Note, NoteError> {
        settings.validate()?;
        let invalid_amount = || NoteError::InvalidAmount {
            amount,
            property: property.to_string(),
        };

        match property {
            Property::Midi => {
                if !is_integer(amount) {
                    return Err(invalid_amount());
                }
                let midi = self.midi() as f64 + amount;
                if !is_midi(midi) {
                    return Err(NoteError::MidiOutOfRange(midi));
                }
                Note::from_midi(midi as i32, settings)
            }
            Property::Frequency => Note::from_frequency(self.frequency() + amount, settings),
            Property::Octave => {
                if !is_integer(amount) || amount.abs() > i32::MAX as f64 {
                    return Err(invalid_amount());
                }
                self.octave()
                    .checked_add(amount as i32)
                    .and_then(|octave| self.with_octave(octave, settings.tuning))
                    .ok_or_else(invalid_amount)
            }
            other => Err(NoteError::UnsupportedProperty {
                operation: "transpose",
                property: other.to_string(),
            }),
        }
    }

    /// `other[property] - self[property]` for midi, frequency, chroma or octave
    pub fn distance_to(&self, other: &Note, property: Property) -> Result<f64, NoteError> {
        match property {
            Property::Midi | Property::Frequency | Property::Chroma | Property::Octave => {
                let from = self.get(property).as_f64().unwrap_or_default();
                let to = other.get(property).as_f64().unwrap_or_default();
                Ok(to - from)
            }
            other => Err(NoteError::UnsupportedProperty {
                operation: "distance",
                property: other.to_string(),
            }),
        }
    }

    /// Apply `operator` to `self[property]` and `other[property]`
    pub fn compare_to(&self, operator: Operator, other: &Note, property: Property) -> bool {
        operator.apply(&self.get(property), &other.get(property))
    }
}

/// Transpose a note by `amount` of `property` (midi, frequency or octave).
///
/// # Example
/// ```rust
/// use pitch::{transpose, NoteInit, Property, Settings};
///
/// let note = transpose(&NoteInit::name("A4"), 1.0, Property::Midi, &Settings::default())?;
/// assert_eq!(note.name(), "A#4");
/// # Ok::<(), pitch::NoteError>(())
/// ```
pub fn transpose(note: &NoteInit, amount: f64, property: Property, settings: &Settings) -> Result<Note, NoteError> {
    make_note(note, settings)?.transpose_by(amount, property, settings)
}

/// Signed difference `other[property] - note[property]`.
///
/// # Example
/// ```rust
/// use pitch::{distance, NoteInit, Property, Settings};
///
/// let semitones = distance(
///     &NoteInit::name("C4"),
///     &NoteInit::name("C5"),
///     Property::Midi,
///     &Settings::default(),
/// )?;
/// assert_eq!(semitones, 12.0);
/// # Ok::<(), pitch::NoteError>(())
/// ```
pub fn distance(note: &NoteInit, other: &NoteInit, property: Property, settings: &Settings) -> Result<f64, NoteError> {
    let from = make_note(note, settings)?;
    let to = make_note(other, settings)?;
    from.distance_to(&to, property)
}

/// Compare one field of two notes.
///
/// There is no default property: pass `Property::Midi` for pitch order, or
/// use [`compare_midi`].
pub fn compare(
    operator: Operator,
    note: &NoteInit,
    other: &NoteInit,
    property: Property,
    settings: &Settings,
) -> Result<bool, NoteError> {
    let left = make_note(note, settings)?;
    let right = make_note(other, settings)?;
    Ok(left.compare_to(operator, &right, property))
}

/// Compare two notes by pitch (their MIDI numbers).
///
/// # Example
/// ```rust
/// use pitch::{compare_midi, NoteInit, Operator, Settings};
///
/// let same = compare_midi(Operator::Eq, &NoteInit::name("C#4"), &NoteInit::name("Db4"), &Settings::default())?;
/// assert!(same);
/// # Ok::<(), pitch::NoteError>(())
/// ```
pub fn compare_midi(operator: Operator, note: &NoteInit, other: &NoteInit, settings: &Settings) -> Result<bool, NoteError> {
    compare(operator, note, other, Property::Midi, settings)
}

/// Respell a note name at the same pitch.
///
/// With `keep_accidental` the result keeps the kind of accidental the note
/// was written with (`"B#4"` becomes `"C5"`, `"Cb4"` becomes `"B3"`). Without
/// it the other kind is used (`"C#4"` becomes `"Db4"`). Naturals stay natural
/// either way.
pub fn simplify(name: &str, keep_accidental: bool) -> Result<String, NoteError> {
    let note = Note::from_name(name, Settings::default().tuning)?;
    let sharp_signed = note.alteration() > 0;
    let spelling = if sharp_signed { Spelling::Sharps } else { Spelling::Flats };
    let spelling = if keep_accidental { spelling } else { spelling.flipped() };

    // naturals never need a spelling change
    let spelling = if note.alteration() == 0 { Spelling::Sharps } else { spelling };

    Ok(format!(
        "{}{}",
        chroma_to_pc(note.chroma(), spelling),
        midi_to_octave(note.midi())
    ))
}

/// The other spelling of a note name: `"C#4"` <-> `"Db4"`
pub fn enharmonic(name: &str) -> Result<String, NoteError> {
    simplify(name, false)
}

/// Accessor for one record field by name.
///
/// The returned function never fails: notes that cannot be built read from
/// the empty record (`""`, `0`, `false`).
///
/// # Example
/// ```rust
/// use pitch::{property, NoteInit, Settings, Value};
///
/// let midi = property("midi", Settings::default())?;
/// assert_eq!(midi(&NoteInit::name("C4")), Value::Integer(60));
/// assert_eq!(midi(&NoteInit::name("H4")), Value::Integer(0));
/// # Ok::<(), pitch::NoteError>(())
/// ```
pub fn property(key: &str, settings: Settings) -> Result<impl Fn(&NoteInit) -> Value, NoteError> {
    let property: Property = key.parse()?;
    Ok(move |init: &NoteInit| NoteRecord::from(make_note(init, &settings)).get(property))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    fn name(s: &str) -> NoteInit {
        NoteInit::name(s)
    }

    #[test]
    fn test_transpose_midi() {
        let note = transpose(&name("A4"), 1.0, Property::Midi, &settings()).unwrap();
        assert_eq!(note.name(), "A#4");
        let note = transpose(&name("C4"), -1.0, Property::Midi, &settings()).unwrap();
        assert_eq!(note.name(), "B3");
        let flats = settings().with_spelling(Spelling::Flats);
        let note = transpose(&name("A4"), 1.0, Property::Midi, &flats).unwrap();
        assert_eq!(note.name(), "Bb4");
    }

    #[test]
    fn test_transpose_midi_rejects_bad_amounts() {
        assert!(matches!(
            transpose(&name("A4"), 0.5, Property::Midi, &settings()),
            Err(NoteError::InvalidAmount { .. })
        ));
        assert_eq!(
            transpose(&NoteInit::midi(130), 10.0, Property::Midi, &settings()),
            Err(NoteError::MidiOutOfRange(140.0))
        );
    }

    #[test]
    fn test_transpose_frequency() {
        let note = transpose(&name("A4"), 440.0, Property::Frequency, &settings()).unwrap();
        assert_eq!(note.name(), "A5");
        let note = transpose(&name("A4"), 5.0, Property::Frequency, &settings()).unwrap();
        assert_eq!(note.name(), "A#4");
        assert!(transpose(&name("A4"), -500.0, Property::Frequency, &settings()).is_err());
    }

    #[test]
    fn test_transpose_frequency_by_a_fraction_of_a_hertz() {
        let note = transpose(&name("A4"), 0.1, Property::Frequency, &settings()).unwrap();
        assert_eq!(note.name(), "A#4");
        let note = transpose(&name("A4"), 0.0, Property::Frequency, &settings()).unwrap();
        assert_eq!(note.name(), "A4");
    }

    #[test]
    fn test_transpose_octave_keeps_spelling() {
        let note = transpose(&name("Db4"), 2.0, Property::Octave, &settings()).unwrap();
        assert_eq!(note.name(), "Db6");
        assert_eq!(note.midi(), 85);

        let note = transpose(&name("Eb4"), -1.0, Property::Octave, &settings()).unwrap();
        assert_eq!(note.name(), "Eb3");

        let cb = make_note(&name("Cb4"), &settings()).unwrap();
        let up = cb.transpose_by(1.0, Property::Octave, &settings()).unwrap();
        assert_eq!(up.pc(), "Cb");
        assert_eq!(up.octave(), cb.octave() + 1);
        assert_eq!(up.midi(), cb.midi() + 12);
    }

    #[test]
    fn test_transpose_unsupported() {
        assert_eq!(
            transpose(&name("A4"), 1.0, Property::Chroma, &settings()),
            Err(NoteError::UnsupportedProperty {
                operation: "transpose",
                property: "chroma".to_string(),
            })
        );
        assert!(matches!(
            transpose(&name("A4"), 1.5, Property::Octave, &settings()),
            Err(NoteError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_transpose_invalid_note() {
        assert_eq!(
            transpose(&name("H4"), 1.0, Property::Midi, &settings()),
            Err(NoteError::InvalidName("H4".to_string()))
        );
    }

    #[test]
    fn test_distance() {
        let d = |a: &str, b: &str, p| distance(&name(a), &name(b), p, &settings()).unwrap();
        assert_eq!(d("C4", "C5", Property::Midi), 12.0);
        assert_eq!(d("C5", "C4", Property::Midi), -12.0);
        assert_eq!(d("A4", "A5", Property::Frequency), 440.0);
        assert_eq!(d("C4", "E4", Property::Chroma), 4.0);
        assert_eq!(d("B4", "C4", Property::Chroma), -11.0);
        assert_eq!(d("C2", "C5", Property::Octave), 3.0);
    }

    #[test]
    fn test_distance_errors() {
        assert!(matches!(
            distance(&name("C4"), &name("C5"), Property::Name, &settings()),
            Err(NoteError::UnsupportedProperty { .. })
        ));
        assert_eq!(
            distance(&name("C4"), &NoteInit::midi(200), Property::Midi, &settings()),
            Err(NoteError::MidiOutOfRange(200.0))
        );
    }

    #[test]
    fn test_distance_across_inputs() {
        let d = distance(&NoteInit::midi(60), &NoteInit::frequency(440.0), Property::Midi, &settings()).unwrap();
        assert_eq!(d, 9.0);
    }

    #[test]
    fn test_compare() {
        let c = |op: &str, a: &str, b: &str| {
            compare(op.parse().unwrap(), &name(a), &name(b), Property::Midi, &settings()).unwrap()
        };
        assert!(c("lt", "C4", "D4"));
        assert!(!c("gt", "C4", "D4"));
        assert!(c("eq", "C#4", "Db4"));
        assert!(c("leq", "C#4", "Db4"));
        assert!(c("geq", "B#3", "C4"));
        assert!(c("neq", "C4", "C5"));
    }

    #[test]
    fn test_compare_midi_orders_by_pitch() {
        let s = settings();
        assert!(compare_midi(Operator::Eq, &name("B#3"), &name("C4"), &s).unwrap());
        assert!(compare_midi(Operator::Lt, &name("Cb4"), &NoteInit::midi(60), &s).unwrap());
        assert!(!compare_midi(Operator::Gt, &name("A4"), &NoteInit::frequency(440.0), &s).unwrap());
        assert!(compare_midi(Operator::Eq, &name("H4"), &name("C4"), &s).is_err());
    }

    #[test]
    fn test_compare_other_properties() {
        let s = settings();
        assert!(compare(Operator::Eq, &name("C4"), &name("C6"), Property::Chroma, &s).unwrap());
        assert!(compare(Operator::Neq, &name("C#4"), &name("Db4"), Property::Name, &s).unwrap());
        assert!(compare(Operator::Lt, &name("A3"), &name("A4"), Property::Frequency, &s).unwrap());
    }

    #[test]
    fn test_compare_invalid_note() {
        assert!(compare(Operator::Lt, &name("C4"), &NoteInit::frequency(-5.0), Property::Midi, &settings()).is_err());
    }

    #[test]
    fn test_operator_parsing() {
        for op in ["lt", "leq", "eq", "neq", "gt", "geq"] {
            assert_eq!(op.parse::<Operator>().unwrap().to_string(), op);
        }
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::Leq);
        assert_eq!(
            "lte".parse::<Operator>(),
            Err(NoteError::UnknownOperator("lte".to_string()))
        );
    }

    #[test]
    fn test_simplify() {
        assert_eq!(simplify("C#4", true).unwrap(), "C#4");
        assert_eq!(simplify("B#4", true).unwrap(), "C5");
        assert_eq!(simplify("Cb4", true).unwrap(), "B3");
        assert_eq!(simplify("C##4", true).unwrap(), "D4");
        assert_eq!(simplify("Dbb4", true).unwrap(), "C4");
        assert_eq!(simplify("Ebb4", true).unwrap(), "D4");
        assert_eq!(simplify("E#4", true).unwrap(), "F4");
        assert_eq!(simplify("Fbb4", true).unwrap(), "Eb4");
        assert_eq!(simplify("G##4", true).unwrap(), "A4");
        assert_eq!(simplify("A4", true).unwrap(), "A4");
        assert!(simplify("H4", true).is_err());
    }

    #[test]
    fn test_enharmonic() {
        assert_eq!(enharmonic("C#4").unwrap(), "Db4");
        assert_eq!(enharmonic("Db4").unwrap(), "C#4");
        assert_eq!(enharmonic("Bb2").unwrap(), "A#2");
        assert_eq!(enharmonic("E4").unwrap(), "E4");
        assert_eq!(enharmonic("C##4").unwrap(), "D4");
    }

    #[test]
    fn test_property_accessor() {
        let chroma = property("chroma", settings()).unwrap();
        assert_eq!(chroma(&name("E4")), Value::Integer(4));
        let valid = property("valid", settings()).unwrap();
        assert_eq!(valid(&NoteInit::midi(60)), Value::Bool(true));
        assert_eq!(valid(&NoteInit::midi(-1)), Value::Bool(false));
        let name_of = property("name", settings()).unwrap();
        assert_eq!(name_of(&NoteInit::frequency(-5.0)), Value::Text(String::new()));
        assert!(property("colour", settings()).is_err());
    }
}
