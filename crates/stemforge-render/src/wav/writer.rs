//! WAV header writing and float-to-PCM conversion.

use std::io::{self, Write};

use super::format::{WavFormat, BITS_PER_SAMPLE};
use crate::buffer::AudioBuffer;

/// Converts one float sample to a signed 16-bit PCM value.
///
/// The sample is clamped to `[-1.0, 1.0]`; negative values scale by 32768
/// and non-negative values by 32767, so both ends of the float range map
/// onto the full i16 range.
#[inline]
pub fn sample_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Converts a buffer to interleaved little-endian 16-bit PCM bytes.
///
/// Frames are written in order; within each frame, channels in order.
pub fn buffer_to_pcm16(buffer: &AudioBuffer) -> Vec<u8> {
    let frames = buffer.frames();
    let channels = buffer.channels();
    let mut pcm = Vec::with_capacity(frames * channels.len() * 2);

    for frame in 0..frames {
        for channel in channels {
            let value = sample_to_i16(channel[frame]);
            pcm.extend_from_slice(&value.to_le_bytes());
        }
    }

    pcm
}

/// Writes a complete WAV file: 44-byte header followed by the PCM payload.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;

    // RIFF header; size field excludes "RIFF" and itself
    writer.write_all(b"RIFF")?;
    writer.write_all(&(36 + data_size).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk, 16 bytes, format code 1 = integer PCM
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(44 + pcm_data.len());
    write_wav(&mut bytes, format, pcm_data).expect("writing to Vec cannot fail");
    bytes
}
