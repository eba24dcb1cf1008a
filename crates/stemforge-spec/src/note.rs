//! Pitch names and musical-time duration tokens.
//!
//! Pitches are spelled scientific-pitch style (`"C4"`, `"F#3"`, `"Bb2"`)
//! with A4 = 440 Hz. Durations are symbolic note values resolved against the
//! active tempo at render time, never absolute seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Resolves a pitch name to a frequency in Hz (equal temperament, A4 = 440).
///
/// # Arguments
/// * `name` - Pitch name such as `"C4"`, `"F#3"` or `"Eb5"`
///
/// # Returns
/// Frequency in Hz, or an error for unrecognized spellings
pub fn pitch_to_frequency(name: &str) -> SpecResult<f32> {
    let unknown = || SpecError::UnknownPitch {
        name: name.to_string(),
    };

    let trimmed = name.trim();
    let mut chars = trimmed.chars();

    let letter = chars.next().ok_or_else(unknown)?;
    let base_semitone: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(unknown()),
    };

    let rest: String = chars.collect();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest.as_str()),
    };

    let octave: i32 = octave_str.parse().map_err(|_| unknown())?;
    if !(-1..=9).contains(&octave) {
        return Err(unknown());
    }

    // MIDI note number; C-1 = 0, A4 = 69
    let midi = (octave + 1) * 12 + base_semitone + accidental;
    Ok(440.0 * 2.0_f32.powf((midi - 69) as f32 / 12.0))
}

/// Symbolic note value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteValue {
    /// Four beats.
    Whole,
    /// Two beats.
    Half,
    /// One beat.
    Quarter,
    /// Half a beat.
    Eighth,
    /// A quarter of a beat.
    Sixteenth,
}

impl NoteValue {
    /// Length in beats (a beat is one quarter note).
    pub fn beats(&self) -> f64 {
        match self {
            NoteValue::Whole => 4.0,
            NoteValue::Half => 2.0,
            NoteValue::Quarter => 1.0,
            NoteValue::Eighth => 0.5,
            NoteValue::Sixteenth => 0.25,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NoteValue::Whole => "whole",
            NoteValue::Half => "half",
            NoteValue::Quarter => "quarter",
            NoteValue::Eighth => "eighth",
            NoteValue::Sixteenth => "sixteenth",
        }
    }
}

/// A musical-time duration token, e.g. `"half note"` or `"dotted quarter"`.
///
/// Serialized as the string form to match composition JSON produced by
/// front-end tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DurationToken {
    /// Base note value.
    pub value: NoteValue,
    /// Dotted durations are 1.5x their base value.
    pub dotted: bool,
}

impl DurationToken {
    /// Creates a plain (non-dotted) duration token.
    pub fn plain(value: NoteValue) -> Self {
        Self {
            value,
            dotted: false,
        }
    }

    /// Creates a dotted duration token.
    pub fn dotted(value: NoteValue) -> Self {
        Self {
            value,
            dotted: true,
        }
    }

    /// Length in beats.
    pub fn beats(&self) -> f64 {
        if self.dotted {
            self.value.beats() * 1.5
        } else {
            self.value.beats()
        }
    }

    /// Parses a duration token.
    ///
    /// Accepts `"half"`, `"half note"` and `"dotted half"` style spellings,
    /// case-insensitively.
    pub fn parse(token: &str) -> SpecResult<Self> {
        let unknown = || SpecError::UnknownDuration {
            token: token.to_string(),
        };

        let mut text = token.trim().to_ascii_lowercase();
        if let Some(stripped) = text.strip_suffix(" note") {
            text = stripped.trim_end().to_string();
        }

        let dotted = if let Some(stripped) = text.strip_prefix("dotted ") {
            text = stripped.trim_start().to_string();
            true
        } else {
            false
        };

        let value = match text.as_str() {
            "whole" => NoteValue::Whole,
            "half" => NoteValue::Half,
            "quarter" => NoteValue::Quarter,
            "eighth" => NoteValue::Eighth,
            "sixteenth" => NoteValue::Sixteenth,
            _ => return Err(unknown()),
        };

        Ok(Self { value, dotted })
    }
}

impl Default for DurationToken {
    fn default() -> Self {
        Self::plain(NoteValue::Quarter)
    }
}

impl fmt::Display for DurationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dotted {
            write!(f, "dotted {}", self.value.name())
        } else {
            write!(f, "{}", self.value.name())
        }
    }
}

impl TryFrom<String> for DurationToken {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DurationToken::parse(&value)
    }
}

impl From<DurationToken> for String {
    fn from(token: DurationToken) -> Self {
        token.to_string()
    }
}
