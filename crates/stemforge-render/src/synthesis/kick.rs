//! Kick drum synthesis.
//!
//! A sine oscillator swept exponentially from a high start pitch down to
//! the body pitch, with a short noise click on the attack. The sweep is
//! what reads as the "punch"; the sustained low end comes from the body
//! frequency.

use std::f32::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use super::{normalize_peak, Synthesizer};
use crate::envelope::exponential_decay;

/// Kick drum synthesizer with an exponential pitch sweep.
#[derive(Debug, Clone)]
pub struct KickSynth {
    /// Sweep start frequency in Hz.
    pub start_hz: f32,
    /// Body frequency the sweep settles at, in Hz.
    pub body_hz: f32,
    /// Amplitude decay time constant in seconds.
    pub decay_sec: f32,
    /// Click strength (0.0-1.0).
    pub click: f32,
}

impl KickSynth {
    pub fn new(start_hz: f32, body_hz: f32, decay_sec: f32, click: f32) -> Self {
        Self {
            start_hz: start_hz.max(20.0),
            body_hz: body_hz.max(20.0),
            decay_sec: decay_sec.max(0.01),
            click: click.clamp(0.0, 1.0),
        }
    }

    /// The voice used by the drum machine.
    pub fn standard() -> Self {
        Self::new(150.0, 50.0, 0.25, 0.4)
    }
}

impl Synthesizer for KickSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f32, rng: &mut Pcg32) -> Vec<f32> {
        if num_samples == 0 {
            return vec![];
        }

        let duration = num_samples as f32 / sample_rate;
        let envelope = exponential_decay(self.decay_sec / 3.0, sample_rate, duration);
        // Pitch sweep time constant, fast relative to the amplitude decay
        let sweep_rate = 25.0;

        let click_samples = ((sample_rate * 0.003) as usize).min(num_samples);
        let dt = 1.0 / sample_rate;

        let mut output = Vec::with_capacity(num_samples);
        let mut phase = 0.0_f32;
        for i in 0..num_samples {
            let t = i as f32 * dt;
            let freq = self.body_hz + (self.start_hz - self.body_hz) * (-sweep_rate * t).exp();

            let mut sample = phase.sin() * envelope[i];
            if i < click_samples {
                let fade = 1.0 - i as f32 / click_samples as f32;
                sample += (rng.gen::<f32>() * 2.0 - 1.0) * self.click * fade;
            }
            output.push(sample);

            phase += TAU * freq * dt;
            if phase >= TAU {
                phase -= TAU;
            }
        }

        normalize_peak(&mut output);
        output
    }
}
