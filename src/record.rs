//! # Note Records
//!
//! The flat, field-by-field view of a note, used for reflection-style access
//! (`property("midi")`) and for printing.
//!
//! A [`NoteRecord`] always exists, even when construction failed: every
//! failure maps to the same [`NoteRecord::empty`] sentinel with `valid: false`
//! and an empty name. Code that works with real notes should use
//! `Result<Note, NoteError>` instead and only flatten at the edges.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::NoteError;
use crate::note::Note;

/// A field of a note record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Name,
    Letter,
    Step,
    Octave,
    Accidental,
    Alteration,
    Pc,
    Chroma,
    Midi,
    Frequency,
    Valid,
}

impl Property {
    pub const ALL: [Property; 11] = [
        Property::Name,
        Property::Letter,
        Property::Step,
        Property::Octave,
        Property::Accidental,
        Property::Alteration,
        Property::Pc,
        Property::Chroma,
        Property::Midi,
        Property::Frequency,
        Property::Valid,
    ];

    /// Field name as used in records and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Property::Name => "name",
            Property::Letter => "letter",
            Property::Step => "step",
            Property::Octave => "octave",
            Property::Accidental => "accidental",
            Property::Alteration => "alteration",
            Property::Pc => "pc",
            Property::Chroma => "chroma",
            Property::Midi => "midi",
            Property::Frequency => "frequency",
            Property::Valid => "valid",
        }
    }
}

impl FromStr for Property {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|property| property.key() == s)
            .ok_or_else(|| NoteError::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The value of one record field
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Numeric value, `None` for text and booleans
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) | Value::Bool(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Every field of a note, or the sentinel when there is no note
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NoteRecord {
    pub name: String,
    pub letter: String,
    pub step: u8,
    pub octave: i32,
    pub accidental: String,
    pub alteration: i32,
    pub pc: String,
    pub chroma: u8,
    pub midi: i32,
    pub frequency: f64,
    pub valid: bool,
}

impl NoteRecord {
    /// The "no note" record that every failed construction produces
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::Name => Value::Text(self.name.clone()),
            Property::Letter => Value::Text(self.letter.clone()),
            Property::Step => Value::Integer(self.step as i64),
            Property::Octave => Value::Integer(self.octave as i64),
            Property::Accidental => Value::Text(self.accidental.clone()),
            Property::Alteration => Value::Integer(self.alteration as i64),
            Property::Pc => Value::Text(self.pc.clone()),
            Property::Chroma => Value::Integer(self.chroma as i64),
            Property::Midi => Value::Integer(self.midi as i64),
            Property::Frequency => Value::Float(self.frequency),
            Property::Valid => Value::Bool(self.valid),
        }
    }
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            name: note.name().to_string(),
            letter: note.letter().to_string(),
            step: note.step(),
            octave: note.octave(),
            accidental: note.accidental().to_string(),
            alteration: note.alteration(),
            pc: note.pc().to_string(),
            chroma: note.chroma(),
            midi: note.midi(),
            frequency: note.frequency(),
            valid: true,
        }
    }
}

impl From<Result<Note, NoteError>> for NoteRecord {
    fn from(result: Result<Note, NoteError>) -> Self {
        match result {
            Ok(note) => NoteRecord::from(&note),
            Err(_) => NoteRecord::empty(),
        }
    }
}

impl Note {
    /// Look up a field by property
    pub fn get(&self, property: Property) -> Value {
        NoteRecord::from(self).get(property)
    }
}
