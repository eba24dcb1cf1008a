//! Partial-failure behavior of the stem orchestrator.
//!
//! One corrupted stem must never abort the batch: the remaining stems are
//! returned and the failure is reported in the skip list.

use stemforge_render::stems::{export_stems, StemBatch};
use stemforge_spec::{StemKind, StemRequest};
use stemforge_tests::HOUSE_PATTERN_JSON;

fn five_stem_request() -> StemRequest {
    StemRequest {
        full_mix: true,
        vocals: true,
        drums: true,
        kick: true,
        snare: true,
        ..StemRequest::default()
    }
}

#[test]
fn test_one_corrupted_stem_returns_the_other_four() {
    let batch = StemBatch::new(HOUSE_PATTERN_JSON, 120, 42, five_stem_request())
        .with_override(StemKind::Drums, "{ corrupted: [not json");

    let result = export_stems(&batch);

    assert_eq!(result.outputs.len(), 4);
    assert!(result.outputs.contains_key("full_mix.wav"));
    assert!(result.outputs.contains_key("vocals.wav"));
    assert!(result.outputs.contains_key("kick.wav"));
    assert!(result.outputs.contains_key("snare.wav"));
    assert!(!result.outputs.contains_key("drums_combined.wav"));

    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].kind, StemKind::Drums);
    assert!(!result.skipped[0].reason.is_empty());
}

#[test]
fn test_schema_violation_skips_like_parse_failure() {
    // Valid JSON, wrong shape: steps as a string instead of an array
    let batch = StemBatch::new(HOUSE_PATTERN_JSON, 120, 42, five_stem_request())
        .with_override(StemKind::Kick, r#"{"kick": "0,4,8,12"}"#);

    let result = export_stems(&batch);

    assert_eq!(result.outputs.len(), 4);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].kind, StemKind::Kick);
}

#[test]
fn test_unknown_pitch_in_melody_override_is_skipped() {
    let bad_melody =
        r#"[{"onsetBeatPosition": 0.0, "pitchNames": ["Z9"], "durationToken": "half"}]"#;
    let batch = StemBatch::new(HOUSE_PATTERN_JSON, 120, 42, five_stem_request())
        .with_override(StemKind::Vocals, bad_melody);

    let result = export_stems(&batch);

    assert_eq!(result.outputs.len(), 4);
    assert_eq!(result.skipped[0].kind, StemKind::Vocals);
    assert!(result.skipped[0].reason.contains("Z9"));
}

#[test]
fn test_fully_valid_batch_skips_nothing() {
    let batch = StemBatch::new(HOUSE_PATTERN_JSON, 120, 42, five_stem_request());
    let result = export_stems(&batch);

    assert!(result.is_complete());
    assert_eq!(result.outputs.len(), 5);
}
