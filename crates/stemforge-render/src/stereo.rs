//! Mid/side decomposition of stereo audio.
//!
//! Splits a stereo buffer into a center (sum) and side (difference) mono
//! buffer. Center-panned content such as a lead vocal cancels out of the
//! side signal, so the pair acts as a cheap vocal/instrumental separator.
//! This is a heuristic, not true source separation: it only isolates
//! vocals when they are the dominant center-panned element.

use crate::buffer::AudioBuffer;
use crate::error::{RenderError, RenderResult};

/// The two mono halves of a decomposed stereo buffer.
#[derive(Debug)]
pub struct Decomposition {
    /// `(left + right) / 2` — shared, center-panned content.
    pub center: AudioBuffer,
    /// `(left - right) / 2` — off-center content.
    pub side: AudioBuffer,
}

/// Decomposes a stereo buffer into center and side mono buffers.
///
/// Fails with [`RenderError::NotStereo`] for buffers with fewer than two
/// channels, since phase cancellation is undefined for mono input. Extra
/// channels beyond the first two are ignored.
pub fn decompose(buffer: &AudioBuffer) -> RenderResult<Decomposition> {
    if buffer.num_channels() < 2 {
        return Err(RenderError::NotStereo {
            channels: buffer.num_channels(),
        });
    }

    let left = buffer.channel(0);
    let right = buffer.channel(1);

    let mut center = Vec::with_capacity(left.len());
    let mut side = Vec::with_capacity(left.len());
    for i in 0..left.len() {
        center.push((left[i] + right[i]) / 2.0);
        side.push((left[i] - right[i]) / 2.0);
    }

    Ok(Decomposition {
        center: AudioBuffer::mono(center, buffer.sample_rate()),
        side: AudioBuffer::mono(side, buffer.sample_rate()),
    })
}
