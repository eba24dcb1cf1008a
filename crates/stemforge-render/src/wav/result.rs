//! WAV encoding result type.

use super::format::WavFormat;
use super::writer::{buffer_to_pcm16, write_wav_to_vec};
use crate::buffer::AudioBuffer;

/// Result of encoding a buffer to WAV.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel.
    pub num_frames: usize,
}

impl WavResult {
    /// Encodes an audio buffer.
    pub fn from_buffer(buffer: &AudioBuffer) -> Self {
        let pcm = buffer_to_pcm16(buffer);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let format = WavFormat::for_buffer(buffer);
        let wav_data = write_wav_to_vec(&format, &pcm);

        Self {
            wav_data,
            pcm_hash,
            channels: format.channels,
            sample_rate: format.sample_rate,
            num_frames: buffer.frames(),
        }
    }

    /// Duration of the encoded audio in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames as f64 / self.sample_rate as f64
    }
}
