//! Mastering and splitting façades for single-file workflows.
//!
//! These wrap the signal chain and the stereo decomposition for callers
//! that bypass the stem orchestrator: master one file with a named style,
//! match one file against a reference, or split one file into a vocal and
//! an instrumental half.

use stemforge_spec::MasterStyle;

use crate::buffer::AudioBuffer;
use crate::effects::SignalChain;
use crate::error::{RenderError, RenderResult};
use crate::loudness;
use crate::mixer::StereoOutput;
use crate::stereo::{self, Decomposition};

fn to_stereo(buffer: &AudioBuffer) -> RenderResult<StereoOutput> {
    match buffer.num_channels() {
        0 => Err(RenderError::invalid_param("buffer", "has no channels")),
        1 => Ok(StereoOutput::from_mono(buffer.channel(0).to_vec())),
        _ => Ok(StereoOutput {
            left: buffer.channel(0).to_vec(),
            right: buffer.channel(1).to_vec(),
        }),
    }
}

fn from_stereo(stereo: StereoOutput, sample_rate: u32) -> AudioBuffer {
    AudioBuffer::stereo(stereo.left, stereo.right, sample_rate)
}

/// Masters a buffer with a named style's signal chain.
///
/// Mono input is widened to stereo first; the output is always stereo.
pub fn master_with_style(input: &AudioBuffer, style: MasterStyle) -> RenderResult<AudioBuffer> {
    let mut stereo = to_stereo(input)?;
    SignalChain::for_style(style).apply(&mut stereo, input.sample_rate() as f32)?;
    Ok(from_stereo(stereo, input.sample_rate()))
}

/// Masters a buffer to match a reference track's loudness.
///
/// Runs the fixed reference chain (gentle smile EQ and moderate
/// compression) with a loudness-matching gain computed from both tracks,
/// clamped to a safe range.
pub fn master_with_reference(
    input: &AudioBuffer,
    reference: &AudioBuffer,
) -> RenderResult<AudioBuffer> {
    let gain_db = loudness::matching_gain_db(input, reference)?;
    log::debug!("reference match gain: {gain_db:.2} dB");

    let mut stereo = to_stereo(input)?;
    SignalChain::for_reference(gain_db).apply(&mut stereo, input.sample_rate() as f32)?;
    Ok(from_stereo(stereo, input.sample_rate()))
}

/// Splits a stereo buffer into vocal (center) and instrumental (side)
/// halves via phase cancellation.
///
/// A heuristic, not true source separation: the center buffer isolates
/// vocals only when they are the dominant center-panned element.
pub fn split(input: &AudioBuffer) -> RenderResult<Decomposition> {
    stereo::decompose(input)
}

#[cfg(test)]
mod tests {
    use stemforge_spec::LIMITER_CEILING_DB;

    use super::*;
    use crate::effects::dynamics::db_to_linear;

    fn test_tone(len: usize) -> AudioBuffer {
        let samples: Vec<f32> = (0..len)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();
        AudioBuffer::stereo(samples.clone(), samples, 44100)
    }

    #[test]
    fn test_master_with_style_output_is_stereo_and_limited() {
        let input = test_tone(44100);
        let output = master_with_style(&input, MasterStyle::BassHeavy).unwrap();

        assert_eq!(output.num_channels(), 2);
        assert_eq!(output.frames(), input.frames());

        let ceiling = db_to_linear(LIMITER_CEILING_DB);
        for channel in output.channels() {
            assert!(channel.iter().all(|s| s.abs() <= ceiling + 1e-6));
        }
    }

    #[test]
    fn test_master_widens_mono_input() {
        let input = AudioBuffer::mono(vec![0.3; 22050], 44100);
        let output = master_with_style(&input, MasterStyle::Punchy).unwrap();
        assert_eq!(output.num_channels(), 2);
    }

    #[test]
    fn test_master_with_reference_boosts_quiet_source() {
        let quiet = {
            let samples: Vec<f32> = (0..44100).map(|i| (i as f32 * 0.05).sin() * 0.05).collect();
            AudioBuffer::stereo(samples.clone(), samples, 44100)
        };
        let loud = test_tone(44100);

        let matched = master_with_reference(&quiet, &loud).unwrap();
        let unmatched = master_with_reference(&quiet, &quiet).unwrap();

        let matched_rms = loudness::rms(matched.channel(0));
        let unmatched_rms = loudness::rms(unmatched.channel(0));
        assert!(matched_rms > unmatched_rms);
    }

    #[test]
    fn test_split_rejects_mono() {
        let input = AudioBuffer::mono(vec![0.1; 100], 44100);
        assert!(matches!(split(&input), Err(RenderError::NotStereo { .. })));
    }

    #[test]
    fn test_split_produces_two_mono_buffers() {
        let input = test_tone(1000);
        let parts = split(&input).unwrap();
        assert_eq!(parts.center.num_channels(), 1);
        assert_eq!(parts.side.num_channels(), 1);
        assert_eq!(parts.center.frames(), 1000);
    }
}
