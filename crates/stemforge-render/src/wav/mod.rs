//! Deterministic WAV (RIFF/PCM) encoder.
//!
//! Writes 16-bit PCM WAV files with a fixed 44-byte header and no metadata
//! chunks, so identical buffers always encode to identical bytes. The BLAKE3
//! hash of the PCM payload is exposed for determinism checks.

mod format;
mod pcm;
mod reader;
mod result;
mod writer;


// Re-export public API
pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use reader::{i16_to_sample, read_wav};
pub use result::WavResult;
pub use writer::{buffer_to_pcm16, sample_to_i16, write_wav, write_wav_to_vec};
