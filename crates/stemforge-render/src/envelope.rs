//! Amplitude envelope generators.
//!
//! Fixed-duration ADSR for melodic notes and exponential decay for
//! percussive one-shots.

/// ADSR envelope parameters, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    /// Attack time.
    pub attack: f32,
    /// Decay time.
    pub decay: f32,
    /// Sustain level (0.0 to 1.0).
    pub sustain: f32,
    /// Release time.
    pub release: f32,
}

impl AdsrParams {
    /// Creates new ADSR parameters, clamped to valid ranges.
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
        }
    }

    /// A percussive envelope: instant attack, no sustain.
    pub fn percussive(decay: f32) -> Self {
        Self {
            attack: 0.001,
            decay,
            sustain: 0.0,
            release: decay,
        }
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.5,
            release: 0.2,
        }
    }
}

/// Generates a fixed-duration ADSR envelope.
///
/// The release phase is anchored at the end of the duration so the envelope
/// always closes to zero; the release start never precedes the end of
/// attack + decay.
pub fn adsr(params: &AdsrParams, sample_rate: f32, duration: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate).ceil() as usize;
    let mut envelope = Vec::with_capacity(num_samples);

    let release_start = (duration - params.release).max(params.attack + params.decay);
    let release_start_sample = (release_start * sample_rate) as usize;

    let mut release_level = params.sustain;

    for i in 0..num_samples {
        let t = i as f32 / sample_rate;
        let level = if t < params.attack {
            t / params.attack
        } else if t < params.attack + params.decay {
            let progress = (t - params.attack) / params.decay;
            1.0 - (1.0 - params.sustain) * progress
        } else if i < release_start_sample {
            params.sustain
        } else {
            let release_t = (i - release_start_sample) as f32 / sample_rate;
            if params.release > 0.0 {
                release_level * (1.0 - release_t / params.release).max(0.0)
            } else {
                0.0
            }
        };

        // Remember where the release picks up from when attack+decay overrun
        // the nominal sustain window.
        if i < release_start_sample {
            release_level = level;
        }
        envelope.push(level);
    }

    envelope
}

/// Generates an exponential decay envelope `e^(-t / time_constant)`.
pub fn exponential_decay(time_constant: f32, sample_rate: f32, duration: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate).ceil() as usize;
    (0..num_samples)
        .map(|i| (-(i as f32 / sample_rate) / time_constant).exp())
        .collect()
}
