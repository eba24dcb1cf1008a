//! Stemforge Rendering Engine
//!
//! This crate implements the offline audio engine for stemforge: it renders
//! validated compositions (drum patterns and note-event melodies) into
//! stereo buffers, masters them through style-driven signal chains, splits
//! stereo files into vocal/instrumental halves, and encodes everything as
//! 16-bit PCM WAV.
//!
//! # Determinism
//!
//! All rendering is deterministic. Given the same composition, tempo,
//! track subset, duration and seed, the output is byte-identical across
//! runs. The crate uses PCG32 for all random number generation, with
//! per-voice seeds derived via BLAKE3 hashing, and hashes every encode
//! result's PCM payload with BLAKE3 for verification.
//!
//! # Example
//!
//! ```ignore
//! use stemforge_render::stems::{export_stems, StemBatch};
//! use stemforge_spec::StemRequest;
//!
//! let batch = StemBatch::new(pattern_json, 120, 42, StemRequest::everything());
//! let result = export_stems(&batch);
//!
//! for (filename, wav) in &result.outputs {
//!     std::fs::write(filename, &wav.wav_data)?;
//! }
//! for skip in &result.skipped {
//!     eprintln!("skipped {}: {}", skip.kind.filename(), skip.reason);
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`render`] - The offline renderer and duration policy
//! - [`stems`] - Parallel stem orchestration and batch export
//! - [`master`] - Single-file mastering and splitting façades
//! - [`effects`] - EQ, dynamics and the assembled signal chain
//! - [`stereo`] - Mid/side decomposition
//! - [`loudness`] - RMS loudness estimation and reference matching
//! - [`synthesis`] - Percussion and lead synthesis voices
//! - [`envelope`] - ADSR and exponential-decay envelopes
//! - [`filter`] - Biquad filter implementations
//! - [`mixer`] - Layer mixing with volume/pan/delay
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`wav`] - Deterministic WAV encoding and PCM hashing

pub mod buffer;
pub mod effects;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod loudness;
pub mod master;
pub mod mixer;
pub mod render;
pub mod rng;
pub mod stems;
pub mod stereo;
pub mod synthesis;
pub mod wav;

pub use buffer::AudioBuffer;
pub use error::{RenderError, RenderResult};
pub use render::{infer_duration, render, RenderJob, SAMPLE_RATE};
pub use stems::{export_stems, SkippedStem, StemBatch, StemExportResult};
pub use wav::{compute_pcm_hash, extract_pcm_data, read_wav, write_wav, WavFormat, WavResult};
