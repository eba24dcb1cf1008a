//! Mastering style presets.
//!
//! Pure parameter tables: each named style maps to fixed three-band EQ and
//! compressor settings. The DSP that applies them lives in the render crate;
//! nothing here touches audio.

use serde::{Deserialize, Serialize};

/// Ceiling of the terminal brick-wall limiter, in dBFS.
///
/// Every mastering chain ends here regardless of style.
pub const LIMITER_CEILING_DB: f32 = -0.3;

/// Lower bound of the reference loudness-matching gain, in dB.
pub const REFERENCE_GAIN_MIN_DB: f32 = -12.0;

/// Upper bound of the reference loudness-matching gain, in dB.
pub const REFERENCE_GAIN_MAX_DB: f32 = 6.0;

/// Dynamics and three-band EQ settings for one mastering style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleParameters {
    /// Low-shelf gain in dB.
    pub eq_low_db: f32,
    /// Mid-peak gain in dB.
    pub eq_mid_db: f32,
    /// High-shelf gain in dB.
    pub eq_high_db: f32,
    /// Compressor threshold in dB.
    pub comp_threshold_db: f32,
    /// Compressor ratio (n:1).
    pub comp_ratio: f32,
    /// Compressor attack in seconds.
    pub comp_attack_sec: f32,
    /// Compressor release in seconds.
    pub comp_release_sec: f32,
}

/// A named mastering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterStyle {
    /// Tight low end and fast compression. The default.
    #[default]
    Punchy,
    /// Boosted lows, softened highs, gentle glue.
    Warm,
    /// Lifted top end with moderate control.
    Bright,
    /// Light-touch dynamics, scooped mids.
    Open,
    /// Heavy low-shelf boost.
    BassHeavy,
    /// Mid-forward presence for vocal material.
    VocalFocus,
}

impl MasterStyle {
    /// All styles, for table-completeness checks.
    pub const ALL: [MasterStyle; 6] = [
        MasterStyle::Punchy,
        MasterStyle::Warm,
        MasterStyle::Bright,
        MasterStyle::Open,
        MasterStyle::BassHeavy,
        MasterStyle::VocalFocus,
    ];

    /// Resolves a style name; unknown names fall back to the default.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "warm" => MasterStyle::Warm,
            "bright" => MasterStyle::Bright,
            "open" => MasterStyle::Open,
            "bass_heavy" => MasterStyle::BassHeavy,
            "vocal_focus" => MasterStyle::VocalFocus,
            _ => MasterStyle::Punchy,
        }
    }

    /// The fixed signal-chain parameters for this style.
    pub fn parameters(&self) -> StyleParameters {
        match self {
            MasterStyle::Punchy => StyleParameters {
                eq_low_db: 1.5,
                eq_mid_db: 0.0,
                eq_high_db: 1.0,
                comp_threshold_db: -14.0,
                comp_ratio: 5.0,
                comp_attack_sec: 0.002,
                comp_release_sec: 0.15,
            },
            MasterStyle::Warm => StyleParameters {
                eq_low_db: 2.0,
                eq_mid_db: 0.5,
                eq_high_db: -1.0,
                comp_threshold_db: -16.0,
                comp_ratio: 3.0,
                comp_attack_sec: 0.01,
                comp_release_sec: 0.3,
            },
            MasterStyle::Bright => StyleParameters {
                eq_low_db: -0.5,
                eq_mid_db: 0.0,
                eq_high_db: 2.5,
                comp_threshold_db: -16.0,
                comp_ratio: 3.5,
                comp_attack_sec: 0.005,
                comp_release_sec: 0.2,
            },
            MasterStyle::Open => StyleParameters {
                eq_low_db: 0.0,
                eq_mid_db: -1.0,
                eq_high_db: 1.0,
                comp_threshold_db: -20.0,
                comp_ratio: 2.0,
                comp_attack_sec: 0.02,
                comp_release_sec: 0.4,
            },
            MasterStyle::BassHeavy => StyleParameters {
                eq_low_db: 4.0,
                eq_mid_db: 0.0,
                eq_high_db: -0.5,
                comp_threshold_db: -14.0,
                comp_ratio: 4.0,
                comp_attack_sec: 0.005,
                comp_release_sec: 0.2,
            },
            MasterStyle::VocalFocus => StyleParameters {
                eq_low_db: -1.0,
                eq_mid_db: 2.0,
                eq_high_db: 0.5,
                comp_threshold_db: -18.0,
                comp_ratio: 3.0,
                comp_attack_sec: 0.008,
                comp_release_sec: 0.25,
            },
        }
    }
}

impl StyleParameters {
    /// The fixed chain used in reference-matching mode: a gentle smile EQ
    /// and a moderate compressor, applied ahead of the computed match gain.
    pub fn reference_mode() -> Self {
        Self {
            eq_low_db: 0.0,
            eq_mid_db: -0.5,
            eq_high_db: 0.5,
            comp_threshold_db: -18.0,
            comp_ratio: 4.0,
            comp_attack_sec: 0.01,
            comp_release_sec: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_parameters() {
        for style in MasterStyle::ALL {
            let params = style.parameters();
            assert!(params.comp_ratio >= 1.0, "{:?}", style);
            assert!(params.comp_threshold_db < 0.0, "{:?}", style);
            assert!(params.comp_attack_sec > 0.0, "{:?}", style);
            assert!(params.comp_release_sec > 0.0, "{:?}", style);
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(MasterStyle::from_name("nonsense"), MasterStyle::Punchy);
        assert_eq!(MasterStyle::from_name("punchy"), MasterStyle::Punchy);
        assert_eq!(MasterStyle::from_name("Bass_Heavy"), MasterStyle::BassHeavy);
    }

    #[test]
    fn test_reference_mode_is_the_documented_smile_curve() {
        let params = StyleParameters::reference_mode();
        assert_eq!(params.eq_low_db, 0.0);
        assert_eq!(params.eq_mid_db, -0.5);
        assert_eq!(params.eq_high_db, 0.5);
        assert_eq!(params.comp_threshold_db, -18.0);
        assert_eq!(params.comp_ratio, 4.0);
    }

    #[test]
    fn test_style_serde_names() {
        let style: MasterStyle = serde_json::from_str("\"bass_heavy\"").unwrap();
        assert_eq!(style, MasterStyle::BassHeavy);
    }
}
