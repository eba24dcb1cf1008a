//! Snare drum synthesis.
//!
//! Two components: a short tonal body (decaying sine around the shell
//! resonance) and a band-passed noise burst standing in for the snare
//! wires. The noise fraction dominates, which is what makes it read as a
//! snare rather than a tom.

use std::f32::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use super::{normalize_peak, Synthesizer};
use crate::envelope::exponential_decay;
use crate::filter::{BiquadCoeffs, BiquadFilter};

/// Snare drum synthesizer.
#[derive(Debug, Clone)]
pub struct SnareSynth {
    /// Shell resonance frequency in Hz.
    pub body_hz: f32,
    /// Noise band center frequency in Hz.
    pub noise_hz: f32,
    /// Amplitude decay time constant in seconds.
    pub decay_sec: f32,
    /// Noise fraction of the mix (0.0-1.0).
    pub snap: f32,
}

impl SnareSynth {
    pub fn new(body_hz: f32, noise_hz: f32, decay_sec: f32, snap: f32) -> Self {
        Self {
            body_hz: body_hz.max(20.0),
            noise_hz: noise_hz.max(100.0),
            decay_sec: decay_sec.max(0.01),
            snap: snap.clamp(0.0, 1.0),
        }
    }

    /// The voice used by the drum machine.
    pub fn standard() -> Self {
        Self::new(180.0, 2500.0, 0.18, 0.7)
    }
}

impl Synthesizer for SnareSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f32, rng: &mut Pcg32) -> Vec<f32> {
        if num_samples == 0 {
            return vec![];
        }

        let duration = num_samples as f32 / sample_rate;
        let body_env = exponential_decay(self.decay_sec / 4.0, sample_rate, duration);
        let noise_env = exponential_decay(self.decay_sec / 3.0, sample_rate, duration);

        let coeffs = BiquadCoeffs::bandpass(self.noise_hz, 1.2, sample_rate);
        let mut noise_filter = BiquadFilter::new(coeffs);

        let dt = 1.0 / sample_rate;
        let mut phase = 0.0_f32;
        let mut output = Vec::with_capacity(num_samples);

        for i in 0..num_samples {
            let body = phase.sin() * body_env[i] * (1.0 - self.snap);
            let noise = noise_filter.process(rng.gen::<f32>() * 2.0 - 1.0);
            let wires = noise * noise_env[i] * self.snap;
            output.push(body + wires);

            phase += TAU * self.body_hz * dt;
            if phase >= TAU {
                phase -= TAU;
            }
        }

        normalize_peak(&mut output);
        output
    }
}
