//! Error types for the rendering engine.

use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering, mastering or encoding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A stereo-only operation was given a buffer with too few channels.
    #[error(
        "stereo decomposition requires at least 2 channels, got {channels}: \
         phase cancellation is undefined for mono input"
    )]
    NotStereo {
        /// Channel count of the rejected buffer.
        channels: usize,
    },

    /// Buffer channels of unequal length.
    #[error("buffer channels must be the same length ({expected} frames, found {found})")]
    MismatchedChannels {
        /// Frame count of the first channel.
        expected: usize,
        /// Frame count of the offending channel.
        found: usize,
    },

    /// Invalid render duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Composition failed validation.
    #[error(transparent)]
    Composition(#[from] stemforge_spec::SpecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}
