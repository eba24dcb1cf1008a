//! Reference loudness estimation and matching.
//!
//! Loudness is estimated as the RMS of the left channel, expressed in
//! decibels. This is a deliberate simplification rather than a perceptual
//! loudness standard; it matches what the mastering styles were tuned
//! against.

use stemforge_spec::{REFERENCE_GAIN_MAX_DB, REFERENCE_GAIN_MIN_DB};

use crate::buffer::AudioBuffer;
use crate::error::{RenderError, RenderResult};

/// Floor applied to silent signals so the decibel conversion stays finite.
const SILENCE_FLOOR_DB: f32 = -120.0;

/// Root-mean-square of a sample slice.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Estimates loudness in dB from the left channel of a buffer.
pub fn measure_db(buffer: &AudioBuffer) -> RenderResult<f32> {
    if buffer.num_channels() == 0 {
        return Err(RenderError::invalid_param("buffer", "has no channels"));
    }
    let value = rms(buffer.channel(0));
    if value <= 0.0 {
        Ok(SILENCE_FLOOR_DB)
    } else {
        Ok(20.0 * value.log10())
    }
}

/// Computes the gain that matches `source` to the loudness of `reference`.
///
/// The raw delta `referenceDb - sourceDb` is clamped to
/// [[`REFERENCE_GAIN_MIN_DB`], [`REFERENCE_GAIN_MAX_DB`]] so an extreme
/// mismatch never produces a destructive boost or cut.
pub fn matching_gain_db(source: &AudioBuffer, reference: &AudioBuffer) -> RenderResult<f32> {
    let source_db = measure_db(source)?;
    let reference_db = measure_db(reference)?;
    Ok((reference_db - source_db).clamp(REFERENCE_GAIN_MIN_DB, REFERENCE_GAIN_MAX_DB))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono_buffer(samples: Vec<f32>) -> AudioBuffer {
        AudioBuffer::mono(samples, 44100)
    }

    #[test]
    fn test_rms_of_constant_signal() {
        assert!((rms(&[0.5; 100]) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rms_of_empty_is_zero() {
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_measure_full_scale_is_zero_db() {
        let buffer = mono_buffer(vec![1.0; 1000]);
        assert!(measure_db(&buffer).unwrap().abs() < 1e-4);
    }

    #[test]
    fn test_measure_silence_hits_floor() {
        let buffer = mono_buffer(vec![0.0; 1000]);
        assert_eq!(measure_db(&buffer).unwrap(), SILENCE_FLOOR_DB);
    }

    #[test]
    fn test_matching_gain_for_equal_loudness_is_zero() {
        let a = mono_buffer(vec![0.25; 1000]);
        let b = mono_buffer(vec![0.25; 1000]);
        assert!(matching_gain_db(&a, &b).unwrap().abs() < 1e-5);
    }

    #[test]
    fn test_matching_gain_clamped_against_loud_reference() {
        // Near-silent source against full-scale reference wants a huge
        // boost; the clamp holds it at the ceiling.
        let source = mono_buffer(vec![1e-5; 1000]);
        let reference = mono_buffer(vec![1.0; 1000]);
        assert_eq!(
            matching_gain_db(&source, &reference).unwrap(),
            REFERENCE_GAIN_MAX_DB
        );
    }

    #[test]
    fn test_matching_gain_clamped_against_silent_reference() {
        let source = mono_buffer(vec![1.0; 1000]);
        let reference = mono_buffer(vec![0.0; 1000]);
        assert_eq!(
            matching_gain_db(&source, &reference).unwrap(),
            REFERENCE_GAIN_MIN_DB
        );
    }

    #[test]
    fn test_small_delta_passes_unclamped() {
        let source = mono_buffer(vec![0.25; 1000]);
        let reference = mono_buffer(vec![0.5; 1000]);
        let gain = matching_gain_db(&source, &reference).unwrap();
        // 20*log10(2) ~ 6.02 clamps to the +6 ceiling
        assert_eq!(gain, REFERENCE_GAIN_MAX_DB);

        let reference = mono_buffer(vec![0.35; 1000]);
        let gain = matching_gain_db(&source, &reference).unwrap();
        assert!((gain - 20.0 * (0.35_f32 / 0.25).log10()).abs() < 1e-4);
    }
}
