//! The mastering signal chain: EQ, compression, gain, limiter.

use stemforge_spec::{MasterStyle, StyleParameters, LIMITER_CEILING_DB};

use crate::effects::{dynamics, eq};
use crate::error::RenderResult;
use crate::mixer::StereoOutput;

/// A configured mastering chain applied to rendered stereo audio.
///
/// The processing order is fixed: three-band EQ, then compression, then
/// an optional make-up or matching gain, then a brick-wall limiter at
/// [`LIMITER_CEILING_DB`].
#[derive(Debug, Clone)]
pub struct SignalChain {
    params: StyleParameters,
    extra_gain_db: f32,
}

impl SignalChain {
    /// Builds the chain for a named mastering style.
    pub fn for_style(style: MasterStyle) -> Self {
        Self {
            params: style.parameters(),
            extra_gain_db: 0.0,
        }
    }

    /// Builds the reference chain with a loudness-matching gain.
    ///
    /// Callers compute `gain_db` from the reference loudness measurement;
    /// it is applied between the compressor and the limiter.
    pub fn for_reference(gain_db: f32) -> Self {
        Self {
            params: StyleParameters::reference_mode(),
            extra_gain_db: gain_db,
        }
    }

    /// Style parameters this chain applies.
    pub fn parameters(&self) -> &StyleParameters {
        &self.params
    }

    /// Runs the full chain over stereo audio in place.
    pub fn apply(&self, stereo: &mut StereoOutput, sample_rate: f32) -> RenderResult<()> {
        eq::apply(
            stereo,
            self.params.eq_low_db,
            self.params.eq_mid_db,
            self.params.eq_high_db,
            sample_rate,
        );
        dynamics::apply_compressor(
            stereo,
            self.params.comp_threshold_db,
            self.params.comp_ratio,
            self.params.comp_attack_sec,
            self.params.comp_release_sec,
            sample_rate,
        )?;
        if self.extra_gain_db != 0.0 {
            dynamics::apply_gain(stereo, self.extra_gain_db);
        }
        dynamics::apply_limiter(stereo, LIMITER_CEILING_DB, sample_rate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::dynamics::db_to_linear;

    #[test]
    fn test_chain_output_respects_ceiling() {
        let mut stereo = StereoOutput {
            left: vec![1.2; 44100],
            right: vec![-1.2; 44100],
        };
        let chain = SignalChain::for_style(MasterStyle::Punchy);
        chain.apply(&mut stereo, 44100.0).unwrap();

        let ceiling = db_to_linear(LIMITER_CEILING_DB);
        for sample in stereo.left.iter().chain(stereo.right.iter()) {
            assert!(sample.abs() <= ceiling + 1e-6);
        }
    }

    #[test]
    fn test_all_styles_run() {
        for style in [
            MasterStyle::Punchy,
            MasterStyle::Warm,
            MasterStyle::Bright,
            MasterStyle::Open,
            MasterStyle::BassHeavy,
            MasterStyle::VocalFocus,
        ] {
            let mut stereo = StereoOutput {
                left: vec![0.5; 4410],
                right: vec![0.5; 4410],
            };
            SignalChain::for_style(style)
                .apply(&mut stereo, 44100.0)
                .unwrap();
            assert!(stereo.left.iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn test_reference_chain_applies_match_gain() {
        let mut boosted = StereoOutput {
            left: vec![0.05; 44100],
            right: vec![0.05; 44100],
        };
        let mut flat = boosted.clone();

        SignalChain::for_reference(6.0)
            .apply(&mut boosted, 44100.0)
            .unwrap();
        SignalChain::for_reference(0.0)
            .apply(&mut flat, 44100.0)
            .unwrap();

        assert!(boosted.left[44099].abs() > flat.left[44099].abs());
    }
}
