//! Stem selection: tracks, stem kinds and the export request.
//!
//! The track-subset table is fixed: the full mix is every track, `drums` is
//! the four percussion tracks, and each percussion flag maps to itself.
//! Output filenames are fixed lowercase snake case so bundling callers can
//! rely on them.

use serde::{Deserialize, Serialize};

use crate::composition::Instrument;

/// A renderable track in the synthesis graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// The melodic lead voice.
    Vocal,
    Kick,
    Snare,
    Hihat,
    Clap,
}

impl Track {
    /// All tracks, in voice-allocation order.
    pub const ALL: [Track; 5] = [
        Track::Vocal,
        Track::Kick,
        Track::Snare,
        Track::Hihat,
        Track::Clap,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Track::Vocal => "vocal",
            Track::Kick => "kick",
            Track::Snare => "snare",
            Track::Hihat => "hihat",
            Track::Clap => "clap",
        }
    }

    /// The percussion instrument this track renders, if any.
    pub fn instrument(&self) -> Option<Instrument> {
        match self {
            Track::Vocal => None,
            Track::Kick => Some(Instrument::Kick),
            Track::Snare => Some(Instrument::Snare),
            Track::Hihat => Some(Instrument::Hihat),
            Track::Clap => Some(Instrument::Clap),
        }
    }
}

/// A named stem with its fixed track subset and output filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemKind {
    FullMix,
    Vocals,
    Drums,
    Kick,
    Snare,
    Hihat,
    Clap,
}

impl StemKind {
    /// All stem kinds, in request order.
    pub const ALL: [StemKind; 7] = [
        StemKind::FullMix,
        StemKind::Vocals,
        StemKind::Drums,
        StemKind::Kick,
        StemKind::Snare,
        StemKind::Hihat,
        StemKind::Clap,
    ];

    /// The tracks rendered for this stem. Never empty.
    pub fn tracks(&self) -> &'static [Track] {
        match self {
            StemKind::FullMix => &Track::ALL,
            StemKind::Vocals => &[Track::Vocal],
            StemKind::Drums => &[Track::Kick, Track::Snare, Track::Hihat, Track::Clap],
            StemKind::Kick => &[Track::Kick],
            StemKind::Snare => &[Track::Snare],
            StemKind::Hihat => &[Track::Hihat],
            StemKind::Clap => &[Track::Clap],
        }
    }

    /// The fixed output filename for this stem.
    pub fn filename(&self) -> &'static str {
        match self {
            StemKind::FullMix => "full_mix.wav",
            StemKind::Vocals => "vocals.wav",
            StemKind::Drums => "drums_combined.wav",
            StemKind::Kick => "kick.wav",
            StemKind::Snare => "snare.wav",
            StemKind::Hihat => "hihat.wav",
            StemKind::Clap => "clap.wav",
        }
    }
}

/// The set of stems a caller wants exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StemRequest {
    pub full_mix: bool,
    pub vocals: bool,
    pub drums: bool,
    pub kick: bool,
    pub snare: bool,
    pub hihat: bool,
    pub clap: bool,
}

impl StemRequest {
    /// Requests only the full mix.
    pub fn full_mix_only() -> Self {
        Self {
            full_mix: true,
            ..Self::default()
        }
    }

    /// Requests every stem.
    pub fn everything() -> Self {
        Self {
            full_mix: true,
            vocals: true,
            drums: true,
            kick: true,
            snare: true,
            hihat: true,
            clap: true,
        }
    }

    /// The requested stem kinds, in fixed order.
    pub fn requested(&self) -> Vec<StemKind> {
        StemKind::ALL
            .iter()
            .copied()
            .filter(|kind| match kind {
                StemKind::FullMix => self.full_mix,
                StemKind::Vocals => self.vocals,
                StemKind::Drums => self.drums,
                StemKind::Kick => self.kick,
                StemKind::Snare => self.snare,
                StemKind::Hihat => self.hihat,
                StemKind::Clap => self.clap,
            })
            .collect()
    }

    /// Returns true if no stem is requested.
    pub fn is_empty(&self) -> bool {
        self.requested().is_empty()
    }
}
