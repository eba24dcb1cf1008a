//! Hi-hat synthesis.
//!
//! A high-passed white noise burst with a fast exponential decay. The
//! closed/open character is entirely in the decay time.

use rand::Rng;
use rand_pcg::Pcg32;

use super::{normalize_peak, Synthesizer};
use crate::envelope::exponential_decay;
use crate::filter::{BiquadCoeffs, BiquadFilter};

/// Hi-hat synthesizer.
#[derive(Debug, Clone)]
pub struct HihatSynth {
    /// High-pass cutoff in Hz.
    pub cutoff_hz: f32,
    /// Amplitude decay time constant in seconds.
    pub decay_sec: f32,
}

impl HihatSynth {
    pub fn new(cutoff_hz: f32, decay_sec: f32) -> Self {
        Self {
            cutoff_hz: cutoff_hz.max(1000.0),
            decay_sec: decay_sec.max(0.005),
        }
    }

    /// Closed hi-hat, the drum machine default.
    pub fn closed() -> Self {
        Self::new(7000.0, 0.05)
    }

    /// Open hi-hat with a longer ring.
    pub fn open() -> Self {
        Self::new(6000.0, 0.25)
    }
}

impl Synthesizer for HihatSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f32, rng: &mut Pcg32) -> Vec<f32> {
        if num_samples == 0 {
            return vec![];
        }

        let duration = num_samples as f32 / sample_rate;
        let envelope = exponential_decay(self.decay_sec, sample_rate, duration);

        let coeffs = BiquadCoeffs::highpass(self.cutoff_hz, 0.707, sample_rate);
        let mut filter = BiquadFilter::new(coeffs);

        let mut output: Vec<f32> = (0..num_samples)
            .map(|i| filter.process(rng.gen::<f32>() * 2.0 - 1.0) * envelope[i])
            .collect();

        normalize_peak(&mut output);
        output
    }
}
