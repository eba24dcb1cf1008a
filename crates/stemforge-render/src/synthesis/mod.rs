//! Synthesis voices for the renderer.
//!
//! Each module implements one virtual instrument:
//! - `kick` - Pitch-swept sine drum with attack click
//! - `snare` - Tonal body plus band-filtered noise
//! - `hihat` - High-passed noise burst
//! - `clap` - Multi-burst band-filtered noise
//! - `lead` - Harmonic melodic voice used for the vocal/lead track
//!
//! Voices are pure functions of their parameters plus a seeded RNG, so
//! repeated renders with the same seed produce identical samples.

pub mod clap;
pub mod hihat;
pub mod kick;
pub mod lead;
pub mod snare;

use rand_pcg::Pcg32;

pub use clap::ClapSynth;
pub use hihat::HihatSynth;
pub use kick::KickSynth;
pub use lead::LeadSynth;
pub use snare::SnareSynth;

/// Common trait for all synthesis voices.
pub trait Synthesizer {
    /// Generates audio samples.
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples to generate
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `rng` - Deterministic RNG for any randomness
    ///
    /// # Returns
    /// Vector of audio samples in range [-1.0, 1.0]
    fn synthesize(&self, num_samples: usize, sample_rate: f32, rng: &mut Pcg32) -> Vec<f32>;
}

/// Normalizes samples in place to a peak of 1.0. Silence is left as is.
pub(crate) fn normalize_peak(samples: &mut [f32]) {
    let max = samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max);
    if max > 0.0 {
        for s in samples.iter_mut() {
            *s /= max;
        }
    }
}
