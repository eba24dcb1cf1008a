//! Multi-channel sample buffers.
//!
//! An [`AudioBuffer`] is immutable once produced: stages hand buffers to one
//! another by reference and build new buffers rather than mutating in place.

use crate::error::{RenderError, RenderResult};

/// A multi-channel buffer of 32-bit float samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Creates a mono buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Creates a stereo buffer from left/right channels.
    ///
    /// The shorter channel determines the frame count.
    pub fn stereo(left: Vec<f32>, right: Vec<f32>, sample_rate: u32) -> Self {
        let frames = left.len().min(right.len());
        let mut left = left;
        let mut right = right;
        left.truncate(frames);
        right.truncate(frames);
        Self {
            channels: vec![left, right],
            sample_rate,
        }
    }

    /// Creates a buffer from arbitrary channels of equal length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> RenderResult<Self> {
        if let Some(first) = channels.first() {
            let expected = first.len();
            for channel in &channels {
                if channel.len() != expected {
                    return Err(RenderError::MismatchedChannels {
                        expected,
                        found: channel.len(),
                    });
                }
            }
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Samples of one channel.
    ///
    /// # Panics
    /// Panics if `index` is out of range; callers check `num_channels` first.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_truncates_to_shorter_channel() {
        let buffer = AudioBuffer::stereo(vec![0.0; 100], vec![0.0; 90], 44100);
        assert_eq!(buffer.frames(), 90);
        assert_eq!(buffer.num_channels(), 2);
    }

    #[test]
    fn test_from_channels_rejects_unequal_lengths() {
        let result = AudioBuffer::from_channels(vec![vec![0.0; 10], vec![0.0; 11]], 44100);
        assert!(matches!(
            result,
            Err(RenderError::MismatchedChannels { .. })
        ));
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::mono(vec![0.0; 22050], 44100);
        assert!((buffer.duration_seconds() - 0.5).abs() < 1e-9);
    }
}
