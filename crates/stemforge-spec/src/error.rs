//! Error types for composition parsing and validation.

use thiserror::Error;

/// Result type for composition operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while validating a symbolic composition.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The composition text is not valid JSON.
    #[error("invalid composition JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The composition JSON parsed but does not match the expected shape.
    #[error("invalid pattern data: {message}")]
    PatternSchema {
        /// Description of the schema violation.
        message: String,
    },

    /// A pitch name could not be resolved to a frequency.
    #[error("unknown pitch name: {name:?}")]
    UnknownPitch {
        /// The offending pitch name.
        name: String,
    },

    /// A duration token could not be resolved to a note value.
    #[error("unknown duration token: {token:?}")]
    UnknownDuration {
        /// The offending token.
        token: String,
    },

    /// Tempo outside the supported musical range.
    #[error("tempo {bpm} BPM is outside the supported range {min}-{max}")]
    TempoOutOfRange {
        /// The rejected tempo.
        bpm: u32,
        /// Lowest accepted BPM.
        min: u32,
        /// Highest accepted BPM.
        max: u32,
    },

    /// A melody was supplied with no note events.
    #[error("melody contains no note events")]
    EmptyMelody,
}

impl SpecError {
    /// Creates a pattern schema error.
    pub fn pattern_schema(message: impl Into<String>) -> Self {
        Self::PatternSchema {
            message: message.into(),
        }
    }
}
