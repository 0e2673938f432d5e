//! # pitch
//!
//! Build, compare and transpose single musical notes.
//!
//! A [`Note`] is an immutable record derived from one of a name (`"C#4"`), a
//! MIDI number (`61`) or a frequency (`277.18`). Every operation builds its
//! inputs through [`make_note`] and returns a new value.
//!
//! ```rust
//! use pitch::{distance, enharmonic, make_note, NoteInit, Property, Settings};
//!
//! let settings = Settings::default();
//! let note = make_note(&NoteInit::name("Bb3"), &settings)?;
//! assert_eq!(note.midi(), 58);
//! assert_eq!(enharmonic("Bb3")?, "A#3");
//!
//! let up = distance(&NoteInit::name("C4"), &NoteInit::midi(72), Property::Midi, &settings)?;
//! assert_eq!(up, 12.0);
//! # Ok::<(), pitch::NoteError>(())
//! ```
//!
//! ## Modules
//! - `theory` - pitch-class tables, tuning reference, name pattern
//! - `convert` - letter/accidental/octave/frequency conversions
//! - `validate` - guards for names, MIDI numbers and frequencies
//! - `note` - the note constructor
//! - `record` - flat records and property lookup
//! - `operations` - transpose, distance, compare, simplify
//! - `settings` - tuning and spelling options, YAML loading

pub mod convert;
pub mod error;
pub mod note;
pub mod operations;
pub mod record;
pub mod settings;
pub mod theory;
pub mod validate;

pub use error::*;
pub use note::{make_note, Letter, Note, NoteInit};
pub use operations::{compare, compare_midi, distance, enharmonic, property, simplify, transpose, Operator};
pub use record::{NoteRecord, Property, Value};
pub use settings::{Settings, Spelling};
pub use validate::{is_chroma, is_frequency, is_key, is_midi, is_name};
