//! Stemforge Composition Model
//!
//! This crate provides the validated in-memory form of everything the
//! rendering engine consumes: drum patterns, note-event melodies, stem
//! requests and mastering-style parameter tables.
//!
//! # Overview
//!
//! Front ends pass compositions around as loosely-typed JSON. That JSON is
//! validated exactly once, here, at the boundary:
//!
//! - A pattern is a JSON object mapping instrument names to step indices in
//!   `[0, 16)`. Unknown instruments and out-of-range indices are filtered,
//!   not rejected; structurally malformed JSON is an error.
//! - A melody is a JSON array of note events with musical-time onsets,
//!   pitch names and duration tokens, resolved against tempo at render time.
//!
//! The renderer only ever operates on the validated [`Composition`] type.
//!
//! # Example
//!
//! ```
//! use stemforge_spec::{Composition, StemRequest};
//!
//! let composition = Composition::from_json(r#"{"kick": [0, 4, 8, 12]}"#)?;
//! assert!(composition.as_pattern().is_some());
//!
//! let request = StemRequest { drums: true, kick: true, ..StemRequest::default() };
//! assert_eq!(request.requested().len(), 2);
//! # Ok::<(), stemforge_spec::SpecError>(())
//! ```
//!
//! # Modules
//!
//! - [`composition`]: patterns, melodies and the tagged composition type
//! - [`note`]: pitch-name and duration-token resolution
//! - [`stems`]: tracks, stem kinds and the export request
//! - [`style`]: mastering-style parameter tables
//! - [`error`]: validation error types

pub mod composition;
pub mod error;
pub mod note;
pub mod stems;
pub mod style;

// Re-export commonly used types at the crate root
pub use composition::{
    validate_tempo, Composition, DrumPattern, Instrument, Melody, NoteEvent, PATTERN_STEPS,
    TEMPO_MAX, TEMPO_MIN,
};
pub use error::{SpecError, SpecResult};
pub use note::{pitch_to_frequency, DurationToken, NoteValue};
pub use stems::{StemKind, StemRequest, Track};
pub use style::{
    MasterStyle, StyleParameters, LIMITER_CEILING_DB, REFERENCE_GAIN_MAX_DB, REFERENCE_GAIN_MIN_DB,
};
