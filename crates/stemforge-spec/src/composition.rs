//! The validated symbolic composition model.
//!
//! Front-end tooling passes compositions around as loose JSON; everything in
//! this module is the result of validating that JSON exactly once at the
//! boundary. The renderer only ever sees these types, never raw JSON.
//!
//! A composition is either a 16-step [`DrumPattern`] or an ordered
//! [`Melody`] of note events. Step indices outside `[0, 16)` and unknown
//! instrument keys are filtered out during parsing rather than rejected;
//! structurally malformed JSON is an error.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};
use crate::note::{pitch_to_frequency, DurationToken};

/// Number of steps in one pattern bar.
pub const PATTERN_STEPS: u8 = 16;

/// Lowest accepted tempo in BPM.
pub const TEMPO_MIN: u32 = 40;

/// Highest accepted tempo in BPM.
pub const TEMPO_MAX: u32 = 220;

/// Validates a tempo against the supported musical range.
pub fn validate_tempo(bpm: u32) -> SpecResult<()> {
    if (TEMPO_MIN..=TEMPO_MAX).contains(&bpm) {
        Ok(())
    } else {
        Err(SpecError::TempoOutOfRange {
            bpm,
            min: TEMPO_MIN,
            max: TEMPO_MAX,
        })
    }
}

/// A percussion instrument slot in the step grid.
///
/// The set is open on the wire: pattern JSON may carry additional keys,
/// which are ignored during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Kick,
    Snare,
    Hihat,
    Clap,
}

impl Instrument {
    /// All known instruments, in mix order.
    pub const ALL: [Instrument; 4] = [
        Instrument::Kick,
        Instrument::Snare,
        Instrument::Hihat,
        Instrument::Clap,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Kick => "kick",
            Instrument::Snare => "snare",
            Instrument::Hihat => "hihat",
            Instrument::Clap => "clap",
        }
    }

    /// Resolves a pattern JSON key. Unknown keys return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "kick" => Some(Instrument::Kick),
            "snare" => Some(Instrument::Snare),
            "hihat" => Some(Instrument::Hihat),
            "clap" => Some(Instrument::Clap),
            _ => None,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A 16-step percussion grid.
///
/// Maps each instrument to the set of steps on which it triggers. The map is
/// ordered so iteration (and therefore rendering) is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrumPattern {
    steps: BTreeMap<Instrument, BTreeSet<u8>>,
}

impl DrumPattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses pattern JSON text.
    ///
    /// The expected shape is an object mapping instrument names to arrays of
    /// step indices. Unknown instrument keys are ignored; indices outside
    /// `[0, 16)`, fractional numbers and non-numeric entries are filtered
    /// out. Anything structurally different is an error.
    pub fn from_json(text: &str) -> SpecResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Parses an already-deserialized pattern JSON value.
    pub fn from_value(value: &serde_json::Value) -> SpecResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| SpecError::pattern_schema("pattern must be a JSON object"))?;

        let mut pattern = Self::new();
        for (key, steps) in object {
            let Some(instrument) = Instrument::from_name(key) else {
                continue;
            };
            let array = steps.as_array().ok_or_else(|| {
                SpecError::pattern_schema(format!("steps for {:?} must be an array", key))
            })?;
            for step in array {
                // Filter rather than reject: out-of-range and non-integer
                // indices degrade gracefully.
                let Some(index) = step.as_u64() else { continue };
                if index < PATTERN_STEPS as u64 {
                    pattern.add_hit(instrument, index as u8);
                }
            }
        }
        Ok(pattern)
    }

    /// Adds a hit. Out-of-range steps are ignored.
    pub fn add_hit(&mut self, instrument: Instrument, step: u8) {
        if step < PATTERN_STEPS {
            self.steps.entry(instrument).or_default().insert(step);
        }
    }

    /// Returns whether `instrument` triggers on `step`.
    pub fn has_hit(&self, instrument: Instrument, step: u8) -> bool {
        self.steps
            .get(&instrument)
            .is_some_and(|set| set.contains(&step))
    }

    /// Steps on which `instrument` triggers, ascending.
    pub fn hits(&self, instrument: Instrument) -> impl Iterator<Item = u8> + '_ {
        self.steps
            .get(&instrument)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Total number of hits across all instruments.
    pub fn hit_count(&self) -> usize {
        self.steps.values().map(|set| set.len()).sum()
    }

    /// Returns true if no instrument has any hit.
    pub fn is_empty(&self) -> bool {
        self.steps.values().all(|set| set.is_empty())
    }
}

impl Serialize for DrumPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len()))?;
        for (instrument, steps) in &self.steps {
            let indices: Vec<u8> = steps.iter().copied().collect();
            map.serialize_entry(instrument.name(), &indices)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DrumPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// One or more simultaneous pitches starting at a musical-time offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Onset in beats from the start of the melody.
    #[serde(rename = "onsetBeatPosition")]
    pub onset_beats: f64,
    /// Pitch names sounding together, e.g. `["C4", "E4", "G4"]`.
    #[serde(rename = "pitchNames")]
    pub pitches: Vec<String>,
    /// Symbolic duration, resolved against tempo at render time.
    #[serde(rename = "durationToken")]
    pub duration: DurationToken,
}

impl NoteEvent {
    /// Creates a note event.
    pub fn new(onset_beats: f64, pitches: Vec<String>, duration: DurationToken) -> Self {
        Self {
            onset_beats,
            pitches,
            duration,
        }
    }

    /// End of the event in beats.
    pub fn end_beats(&self) -> f64 {
        self.onset_beats + self.duration.beats()
    }

    /// Resolves every pitch name to a frequency in Hz.
    pub fn frequencies(&self) -> SpecResult<Vec<f32>> {
        self.pitches
            .iter()
            .map(|name| pitch_to_frequency(name))
            .collect()
    }
}

/// An ordered sequence of note events.
///
/// Ordering drives scheduling order, but events may overlap or arrive with
/// out-of-order onsets; the renderer handles both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Melody {
    /// The note events, in authored order.
    pub events: Vec<NoteEvent>,
}

impl Melody {
    /// Creates a melody from events.
    pub fn new(events: Vec<NoteEvent>) -> Self {
        Self { events }
    }

    /// Parses melody JSON text and validates every pitch name.
    ///
    /// An empty event list is rejected here; empty in-memory melodies are
    /// still representable for callers that build compositions directly.
    pub fn from_json(text: &str) -> SpecResult<Self> {
        let melody: Melody = serde_json::from_str(text)?;
        melody.validate()?;
        Ok(melody)
    }

    /// Validates the melody: non-empty, with resolvable pitch names.
    pub fn validate(&self) -> SpecResult<()> {
        if self.events.is_empty() {
            return Err(SpecError::EmptyMelody);
        }
        for event in &self.events {
            event.frequencies()?;
        }
        Ok(())
    }

    /// End of the last-sounding event in beats, or `None` when empty.
    pub fn end_beats(&self) -> Option<f64> {
        self.events
            .iter()
            .map(NoteEvent::end_beats)
            .fold(None, |acc, end| Some(acc.map_or(end, |a: f64| a.max(end))))
    }
}

/// A validated composition: the input to every render job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Composition {
    /// A 16-step percussion grid (JSON object on the wire).
    Pattern(DrumPattern),
    /// A note-event melody (JSON array on the wire).
    Melody(Melody),
}

impl Composition {
    /// Parses composition JSON, accepting either shape.
    ///
    /// Objects parse as drum patterns, arrays as melodies; melodies are
    /// validated for resolvable pitches.
    pub fn from_json(text: &str) -> SpecResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        match value {
            serde_json::Value::Object(_) => {
                Ok(Composition::Pattern(DrumPattern::from_value(&value)?))
            }
            serde_json::Value::Array(_) => {
                let melody: Melody = serde_json::from_value(value)?;
                melody.validate()?;
                Ok(Composition::Melody(melody))
            }
            _ => Err(SpecError::pattern_schema(
                "composition must be a JSON object (pattern) or array (melody)",
            )),
        }
    }

    /// Returns the pattern, if this composition is one.
    pub fn as_pattern(&self) -> Option<&DrumPattern> {
        match self {
            Composition::Pattern(pattern) => Some(pattern),
            Composition::Melody(_) => None,
        }
    }

    /// Returns the melody, if this composition is one.
    pub fn as_melody(&self) -> Option<&Melody> {
        match self {
            Composition::Melody(melody) => Some(melody),
            Composition::Pattern(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::note::NoteValue;

    #[test]
    fn test_pattern_parsing_filters_invalid_steps() {
        let json = r#"{"kick": [0, 4, 8, 12, 16, 99, -3, 2.5], "snare": [4, 12]}"#;
        let pattern = DrumPattern::from_json(json).unwrap();

        let kick: Vec<u8> = pattern.hits(Instrument::Kick).collect();
        assert_eq!(kick, vec![0, 4, 8, 12]);
        assert!(pattern.has_hit(Instrument::Snare, 4));
        assert!(!pattern.has_hit(Instrument::Snare, 5));
    }

    #[test]
    fn test_pattern_parsing_ignores_unknown_instruments() {
        let json = r#"{"kick": [0], "cowbell": [1, 2, 3]}"#;
        let pattern = DrumPattern::from_json(json).unwrap();
        assert_eq!(pattern.hit_count(), 1);
    }

    #[test]
    fn test_pattern_parsing_rejects_non_object() {
        assert!(DrumPattern::from_json("[1, 2, 3]").is_err());
        assert!(DrumPattern::from_json("not json at all").is_err());
    }

    #[test]
    fn test_pattern_parsing_rejects_non_array_steps() {
        let err = DrumPattern::from_json(r#"{"kick": "0,4,8"}"#).unwrap_err();
        assert!(err.to_string().contains("kick"));
    }

    #[test]
    fn test_pattern_serde_roundtrip() {
        let mut pattern = DrumPattern::new();
        pattern.add_hit(Instrument::Kick, 0);
        pattern.add_hit(Instrument::Hihat, 2);
        pattern.add_hit(Instrument::Hihat, 6);

        let json = serde_json::to_string(&pattern).unwrap();
        let parsed: DrumPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pattern);
    }

    #[test]
    fn test_melody_parsing() {
        let json = r#"[
            {"onsetBeatPosition": 0.0, "pitchNames": ["C4", "E4"], "durationToken": "half note"},
            {"onsetBeatPosition": 2.0, "pitchNames": ["G4"], "durationToken": "quarter"}
        ]"#;
        let melody = Melody::from_json(json).unwrap();

        assert_eq!(melody.events.len(), 2);
        assert_eq!(melody.events[0].duration.value, NoteValue::Half);
        assert_eq!(melody.end_beats(), Some(3.0));
    }

    #[test]
    fn test_melody_rejects_unknown_pitch() {
        let json = r#"[{"onsetBeatPosition": 0.0, "pitchNames": ["X9"], "durationToken": "half"}]"#;
        assert!(matches!(
            Melody::from_json(json),
            Err(SpecError::UnknownPitch { .. })
        ));
    }

    #[test]
    fn test_melody_rejects_empty() {
        assert!(matches!(Melody::from_json("[]"), Err(SpecError::EmptyMelody)));
    }

    #[test]
    fn test_melody_tolerates_out_of_order_onsets() {
        let json = r#"[
            {"onsetBeatPosition": 4.0, "pitchNames": ["C4"], "durationToken": "quarter"},
            {"onsetBeatPosition": 0.0, "pitchNames": ["E4"], "durationToken": "whole"}
        ]"#;
        let melody = Melody::from_json(json).unwrap();
        assert_eq!(melody.end_beats(), Some(5.0));
    }

    #[test]
    fn test_composition_dispatch() {
        let pattern = Composition::from_json(r#"{"kick": [0]}"#).unwrap();
        assert!(pattern.as_pattern().is_some());

        let melody = Composition::from_json(
            r#"[{"onsetBeatPosition": 0.0, "pitchNames": ["A4"], "durationToken": "whole"}]"#,
        )
        .unwrap();
        assert!(melody.as_melody().is_some());

        assert!(Composition::from_json("42").is_err());
    }

    #[test]
    fn test_tempo_validation() {
        assert!(validate_tempo(40).is_ok());
        assert!(validate_tempo(120).is_ok());
        assert!(validate_tempo(220).is_ok());
        assert!(validate_tempo(39).is_err());
        assert!(validate_tempo(221).is_err());
    }
}
