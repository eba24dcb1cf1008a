//! Hand clap synthesis.
//!
//! Several short band-filtered noise bursts a few milliseconds apart,
//! followed by a longer decaying burst. The stagger between the early
//! bursts is what reads as multiple hands.

use rand::Rng;
use rand_pcg::Pcg32;

use super::{normalize_peak, Synthesizer};
use crate::filter::{BiquadCoeffs, BiquadFilter};

/// Spacing between the pre-echo bursts, in seconds.
const BURST_SPACING_SEC: f32 = 0.011;

/// Number of short bursts before the main body.
const NUM_BURSTS: usize = 3;

/// Hand clap synthesizer.
#[derive(Debug, Clone)]
pub struct ClapSynth {
    /// Noise band center frequency in Hz.
    pub band_hz: f32,
    /// Decay time constant of the final burst, in seconds.
    pub decay_sec: f32,
}

impl ClapSynth {
    pub fn new(band_hz: f32, decay_sec: f32) -> Self {
        Self {
            band_hz: band_hz.max(200.0),
            decay_sec: decay_sec.max(0.02),
        }
    }

    /// The voice used by the drum machine.
    pub fn standard() -> Self {
        Self::new(1200.0, 0.12)
    }
}

impl Synthesizer for ClapSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f32, rng: &mut Pcg32) -> Vec<f32> {
        if num_samples == 0 {
            return vec![];
        }

        let spacing = (BURST_SPACING_SEC * sample_rate) as usize;
        let body_start = NUM_BURSTS * spacing;

        let mut envelope = vec![0.0_f32; num_samples];
        for burst in 0..NUM_BURSTS {
            let start = burst * spacing;
            for i in start..num_samples.min(start + spacing) {
                let t = (i - start) as f32 / sample_rate;
                // Short sharp decay inside each pre-echo
                let level = (-t / 0.004).exp();
                envelope[i] = envelope[i].max(level);
            }
        }
        for (i, level) in envelope.iter_mut().enumerate().skip(body_start) {
            let t = (i - body_start) as f32 / sample_rate;
            *level = level.max((-t / self.decay_sec).exp());
        }

        let coeffs = BiquadCoeffs::bandpass(self.band_hz, 1.5, sample_rate);
        let mut filter = BiquadFilter::new(coeffs);

        let mut output: Vec<f32> = envelope
            .iter()
            .map(|&level| filter.process(rng.gen::<f32>() * 2.0 - 1.0) * level)
            .collect();

        normalize_peak(&mut output);
        output
    }
}
