//! WAV decoding back into audio buffers.
//!
//! Only 16-bit integer PCM is accepted, matching what the writer produces.
//! Files from other encoders decode as long as they carry a standard fmt
//! chunk and a data chunk.

use super::pcm::extract_pcm_data;
use crate::buffer::AudioBuffer;
use crate::error::{RenderError, RenderResult};

fn find_chunk<'a>(wav_data: &'a [u8], id: &[u8; 4]) -> Option<&'a [u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }
    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;
        if &wav_data[pos..pos + 4] == id {
            let start = pos + 8;
            let end = start.checked_add(chunk_size)?;
            return (end <= wav_data.len()).then(|| &wav_data[start..end]);
        }
        pos += 8 + chunk_size + (chunk_size % 2);
    }
    None
}

/// Converts one 16-bit PCM sample back to float.
///
/// The inverse of the writer's asymmetric scaling, so a write/read
/// round trip stays within one quantization step.
#[inline]
pub fn i16_to_sample(value: i16) -> f32 {
    if value < 0 {
        value as f32 / 32768.0
    } else {
        value as f32 / 32767.0
    }
}

/// Decodes a 16-bit PCM WAV file into an audio buffer.
pub fn read_wav(wav_data: &[u8]) -> RenderResult<AudioBuffer> {
    let fmt = find_chunk(wav_data, b"fmt ")
        .filter(|chunk| chunk.len() >= 16)
        .ok_or_else(|| RenderError::invalid_param("wav_data", "missing or truncated fmt chunk"))?;

    let format_code = u16::from_le_bytes([fmt[0], fmt[1]]);
    let channels = u16::from_le_bytes([fmt[2], fmt[3]]) as usize;
    let sample_rate = u32::from_le_bytes([fmt[4], fmt[5], fmt[6], fmt[7]]);
    let bits_per_sample = u16::from_le_bytes([fmt[14], fmt[15]]);

    if format_code != 1 || bits_per_sample != 16 {
        return Err(RenderError::invalid_param(
            "wav_data",
            format!("only 16-bit integer PCM is supported (format {format_code}, {bits_per_sample} bits)"),
        ));
    }
    if channels == 0 {
        return Err(RenderError::invalid_param("wav_data", "zero channels"));
    }

    let pcm = extract_pcm_data(wav_data)
        .ok_or_else(|| RenderError::invalid_param("wav_data", "missing data chunk"))?;

    let frames = pcm.len() / (channels * 2);
    let mut channel_samples = vec![Vec::with_capacity(frames); channels];
    for frame in 0..frames {
        for (channel, samples) in channel_samples.iter_mut().enumerate() {
            let offset = (frame * channels + channel) * 2;
            let value = i16::from_le_bytes([pcm[offset], pcm[offset + 1]]);
            samples.push(i16_to_sample(value));
        }
    }

    AudioBuffer::from_channels(channel_samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::WavResult;

    #[test]
    fn test_write_read_round_trip() {
        let left = vec![0.0, 0.5, -0.5, 1.0, -1.0];
        let right = vec![0.25, -0.25, 0.75, -0.75, 0.0];
        let buffer = AudioBuffer::stereo(left.clone(), right.clone(), 44100);

        let encoded = WavResult::from_buffer(&buffer);
        let decoded = read_wav(&encoded.wav_data).unwrap();

        assert_eq!(decoded.num_channels(), 2);
        assert_eq!(decoded.sample_rate(), 44100);
        for i in 0..left.len() {
            assert!((decoded.channel(0)[i] - left[i]).abs() < 1.0 / 32767.0);
            assert!((decoded.channel(1)[i] - right[i]).abs() < 1.0 / 32767.0);
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(read_wav(b"definitely not a wav file").is_err());
    }

    #[test]
    fn test_rejects_unsupported_bit_depth() {
        let buffer = AudioBuffer::mono(vec![0.0; 8], 44100);
        let mut wav = WavResult::from_buffer(&buffer).wav_data;
        // Patch bits-per-sample to 24
        wav[34] = 24;
        assert!(read_wav(&wav).is_err());
    }
}
