//! Melodic lead voice.
//!
//! Additive synthesis: a fundamental plus a few rolled-off harmonics,
//! shaped by an ADSR sized to the note length. Carries the vocal/lead
//! track of a melody; chords render as one voice per pitch mixed by the
//! caller.

use std::f32::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use super::{normalize_peak, Synthesizer};
use crate::envelope::{adsr, AdsrParams};

/// Harmonic amplitudes relative to the fundamental.
const HARMONIC_LEVELS: [f32; 4] = [1.0, 0.4, 0.2, 0.1];

/// Melodic lead synthesizer.
#[derive(Debug, Clone)]
pub struct LeadSynth {
    /// Fundamental frequency in Hz.
    pub frequency: f32,
    /// Envelope applied over the note length.
    pub envelope: AdsrParams,
    /// Detune depth for subtle phase variation (0.0-1.0).
    pub drift: f32,
}

impl LeadSynth {
    pub fn new(frequency: f32, envelope: AdsrParams) -> Self {
        Self {
            frequency: frequency.max(20.0),
            envelope,
            drift: 0.002,
        }
    }

    /// The voice used for melody notes.
    pub fn note(frequency: f32) -> Self {
        Self::new(frequency, AdsrParams::new(0.02, 0.08, 0.6, 0.15))
    }
}

impl Synthesizer for LeadSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f32, rng: &mut Pcg32) -> Vec<f32> {
        if num_samples == 0 {
            return vec![];
        }

        let duration = num_samples as f32 / sample_rate;
        let env = adsr(&self.envelope, sample_rate, duration);
        let dt = 1.0 / sample_rate;

        let mut output = vec![0.0_f32; num_samples];
        for (harmonic, &level) in HARMONIC_LEVELS.iter().enumerate() {
            let detune = 1.0 + (rng.gen::<f32>() * 2.0 - 1.0) * self.drift;
            let freq = self.frequency * (harmonic + 1) as f32 * detune;
            let mut phase = rng.gen::<f32>() * TAU;

            for (i, sample) in output.iter_mut().enumerate() {
                *sample += phase.sin() * level * env[i];
                phase += TAU * freq * dt;
                if phase >= TAU {
                    phase -= TAU;
                }
            }
        }

        normalize_peak(&mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_lead_basic() {
        let synth = LeadSynth::note(440.0);
        let mut rng = create_rng(42);
        let samples = synth.synthesize(22050, 44100.0, &mut rng);

        assert_eq!(samples.len(), 22050);
        for &s in &samples {
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_lead_determinism() {
        let synth = LeadSynth::note(261.63);
        let mut rng1 = create_rng(5);
        let mut rng2 = create_rng(5);

        assert_eq!(
            synth.synthesize(8000, 44100.0, &mut rng1),
            synth.synthesize(8000, 44100.0, &mut rng2)
        );
    }

    #[test]
    fn test_lead_envelope_closes() {
        let synth = LeadSynth::note(440.0);
        let mut rng = create_rng(42);
        let samples = synth.synthesize(44100, 44100.0, &mut rng);

        assert!(samples[44099].abs() < 0.05);
    }

    #[test]
    fn test_lead_frequency_floor() {
        let synth = LeadSynth::note(1.0);
        assert!(synth.frequency >= 20.0);
    }
}
