//! Shared fixtures and helpers for the integration tests.

use stemforge_render::{AudioBuffer, SAMPLE_RATE};

/// A four-on-the-floor pattern with backbeat snare and offbeat hats.
pub const HOUSE_PATTERN_JSON: &str = r#"{
    "kick": [0, 4, 8, 12],
    "snare": [4, 12],
    "hihat": [2, 6, 10, 14],
    "clap": [12]
}"#;

/// A short two-event melody.
pub const SHORT_MELODY_JSON: &str = r#"[
    {"onsetBeatPosition": 0.0, "pitchNames": ["C4"], "durationToken": "half note"},
    {"onsetBeatPosition": 2.0, "pitchNames": ["E4", "G4"], "durationToken": "whole"}
]"#;

/// Mean squared energy of a sample window.
pub fn window_energy(samples: &[f32], start: usize, len: usize) -> f32 {
    let end = (start + len).min(samples.len());
    if start >= end {
        return 0.0;
    }
    let sum: f32 = samples[start..end].iter().map(|s| s * s).sum();
    sum / (end - start) as f32
}

/// The sample index of a pattern step at a tempo.
pub fn step_sample(step: u32, tempo_bpm: u32) -> usize {
    let step_sec = (60.0 / tempo_bpm as f64) / 4.0;
    (step as f64 * step_sec * SAMPLE_RATE as f64) as usize
}

/// A stereo test-tone buffer with slightly different channels.
pub fn stereo_tone(frames: usize) -> AudioBuffer {
    let left: Vec<f32> = (0..frames).map(|i| (i as f32 * 0.041).sin() * 0.5).collect();
    let right: Vec<f32> = (0..frames).map(|i| (i as f32 * 0.059).sin() * 0.4).collect();
    AudioBuffer::stereo(left, right, SAMPLE_RATE)
}
