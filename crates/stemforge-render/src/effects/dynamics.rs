//! Dynamics processing: compressor, gain, and brick-wall limiter.

use crate::error::{RenderError, RenderResult};
use crate::mixer::StereoOutput;

/// Converts decibels to a linear amplitude factor.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

fn envelope_coefficient(time_sec: f32, sample_rate: f32) -> f32 {
    if time_sec <= 0.0 {
        0.0
    } else {
        (-1.0 / (time_sec * sample_rate)).exp()
    }
}

/// Applies feed-forward compression to stereo audio in place.
///
/// The detector tracks the peak of the linked stereo pair with separate
/// attack and release time constants, so both channels always receive the
/// same gain and the stereo image is preserved.
pub fn apply_compressor(
    stereo: &mut StereoOutput,
    threshold_db: f32,
    ratio: f32,
    attack_sec: f32,
    release_sec: f32,
    sample_rate: f32,
) -> RenderResult<()> {
    if !(-60.0..=0.0).contains(&threshold_db) {
        return Err(RenderError::invalid_param(
            "threshold_db",
            format!("must be in -60..=0 dB, got {threshold_db}"),
        ));
    }
    if !(1.0..=20.0).contains(&ratio) {
        return Err(RenderError::invalid_param(
            "ratio",
            format!("must be in 1..=20, got {ratio}"),
        ));
    }

    let threshold = db_to_linear(threshold_db);
    let attack_coeff = envelope_coefficient(attack_sec, sample_rate);
    let release_coeff = envelope_coefficient(release_sec, sample_rate);

    let mut envelope = 0.0_f32;
    for i in 0..stereo.left.len() {
        let detector = stereo.left[i].abs().max(stereo.right[i].abs());
        let coeff = if detector > envelope {
            attack_coeff
        } else {
            release_coeff
        };
        envelope = coeff * envelope + (1.0 - coeff) * detector;

        let gain = if envelope > threshold {
            let over = envelope / threshold;
            over.powf(1.0 / ratio - 1.0)
        } else {
            1.0
        };

        stereo.left[i] *= gain;
        stereo.right[i] *= gain;
    }

    Ok(())
}

/// Applies a flat gain in decibels to stereo audio in place.
pub fn apply_gain(stereo: &mut StereoOutput, gain_db: f32) {
    let gain = db_to_linear(gain_db);
    for sample in stereo.left.iter_mut().chain(stereo.right.iter_mut()) {
        *sample *= gain;
    }
}

/// Applies a brick-wall limiter with the given ceiling in dBFS.
///
/// An instant-attack envelope follower pulls gain down when the linked
/// peak exceeds the ceiling and releases it smoothly; a final hard clamp
/// guarantees no sample escapes the ceiling.
pub fn apply_limiter(stereo: &mut StereoOutput, ceiling_db: f32, sample_rate: f32) {
    let ceiling = db_to_linear(ceiling_db);
    let release_coeff = envelope_coefficient(0.05, sample_rate);

    let mut envelope = 0.0_f32;
    for i in 0..stereo.left.len() {
        let detector = stereo.left[i].abs().max(stereo.right[i].abs());
        if detector > envelope {
            envelope = detector;
        } else {
            envelope = release_coeff * envelope + (1.0 - release_coeff) * detector;
        }

        let gain = if envelope > ceiling {
            ceiling / envelope
        } else {
            1.0
        };

        stereo.left[i] = (stereo.left[i] * gain).clamp(-ceiling, ceiling);
        stereo.right[i] = (stereo.right[i] * gain).clamp(-ceiling, ceiling);
    }
}
