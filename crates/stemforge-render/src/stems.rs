//! The stem orchestrator.
//!
//! Fans one export request out into parallel render jobs, one per requested
//! stem, encodes each result and collects the outputs under their fixed
//! filenames. A stem whose composition JSON fails validation is logged and
//! skipped; the batch always completes with whatever succeeded.

use std::collections::BTreeMap;

use rayon::prelude::*;
use stemforge_spec::{Composition, StemKind, StemRequest};

use crate::error::RenderResult;
use crate::render::{infer_duration, render, RenderJob};
use crate::wav::WavResult;

/// One export batch: composition JSON, tempo, seed and the requested stems.
///
/// The composition text is kept as raw JSON and parsed per stem, because a
/// caller may override individual stems with their own (possibly invalid)
/// source; validation failures then cost only that stem.
#[derive(Debug, Clone)]
pub struct StemBatch {
    /// Composition JSON used for every stem without an override.
    pub composition_json: String,
    /// Per-stem composition JSON overrides.
    pub overrides: BTreeMap<StemKind, String>,
    /// Tempo in BPM.
    pub tempo_bpm: u32,
    /// Base render seed.
    pub seed: u32,
    /// Which stems to export.
    pub request: StemRequest,
}

impl StemBatch {
    /// Creates a batch with no per-stem overrides.
    pub fn new(composition_json: impl Into<String>, tempo_bpm: u32, seed: u32, request: StemRequest) -> Self {
        Self {
            composition_json: composition_json.into(),
            overrides: BTreeMap::new(),
            tempo_bpm,
            seed,
            request,
        }
    }

    /// Overrides the composition JSON for one stem.
    pub fn with_override(mut self, kind: StemKind, json: impl Into<String>) -> Self {
        self.overrides.insert(kind, json.into());
        self
    }

    fn json_for(&self, kind: StemKind) -> &str {
        self.overrides
            .get(&kind)
            .map_or(self.composition_json.as_str(), String::as_str)
    }
}

/// A stem that was requested but could not be rendered.
#[derive(Debug, Clone)]
pub struct SkippedStem {
    /// The stem that was skipped.
    pub kind: StemKind,
    /// Human-readable reason, from the underlying error.
    pub reason: String,
}

/// The outcome of a batch export: encoded outputs plus skipped stems.
#[derive(Debug)]
pub struct StemExportResult {
    /// Encoded WAV outputs keyed by fixed filename, in stable order.
    pub outputs: BTreeMap<String, WavResult>,
    /// Stems that failed, in request order.
    pub skipped: Vec<SkippedStem>,
}

impl StemExportResult {
    /// Returns true if every requested stem rendered.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn render_stem(batch: &StemBatch, kind: StemKind) -> RenderResult<WavResult> {
    let composition = Composition::from_json(batch.json_for(kind))?;
    let duration = infer_duration(&composition, batch.tempo_bpm);
    let job = RenderJob::new(
        composition,
        batch.tempo_bpm,
        kind.tracks().to_vec(),
        duration,
        batch.seed,
    )?;
    let buffer = render(&job)?;
    Ok(WavResult::from_buffer(&buffer))
}

/// Exports every requested stem in parallel.
///
/// Stems render independently via the rayon pool; per-stem failures are
/// logged with `warn` and reported in the skip list rather than aborting
/// the batch. Output ordering is by filename, independent of completion
/// order.
pub fn export_stems(batch: &StemBatch) -> StemExportResult {
    let requested = batch.request.requested();

    let results: Vec<(StemKind, RenderResult<WavResult>)> = requested
        .par_iter()
        .map(|&kind| (kind, render_stem(batch, kind)))
        .collect();

    let mut outputs = BTreeMap::new();
    let mut skipped = Vec::new();
    for (kind, result) in results {
        match result {
            Ok(wav) => {
                log::debug!(
                    "rendered {}: {} frames, pcm hash {}",
                    kind.filename(),
                    wav.num_frames,
                    wav.pcm_hash
                );
                outputs.insert(kind.filename().to_string(), wav);
            }
            Err(err) => {
                log::warn!("skipping stem {}: {}", kind.filename(), err);
                skipped.push(SkippedStem {
                    kind,
                    reason: err.to_string(),
                });
            }
        }
    }

    StemExportResult { outputs, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN_JSON: &str = r#"{"kick": [0, 4, 8, 12], "snare": [4, 12], "hihat": [0, 2, 4, 6, 8, 10, 12, 14]}"#;

    #[test]
    fn test_export_all_stems() {
        let batch = StemBatch::new(PATTERN_JSON, 120, 42, StemRequest::everything());
        let result = export_stems(&batch);

        assert!(result.is_complete());
        assert_eq!(result.outputs.len(), 7);
        assert!(result.outputs.contains_key("full_mix.wav"));
        assert!(result.outputs.contains_key("drums_combined.wav"));
    }

    #[test]
    fn test_export_is_deterministic() {
        let batch = StemBatch::new(PATTERN_JSON, 120, 7, StemRequest::full_mix_only());

        let first = export_stems(&batch);
        let second = export_stems(&batch);

        assert_eq!(
            first.outputs["full_mix.wav"].pcm_hash,
            second.outputs["full_mix.wav"].pcm_hash
        );
        assert_eq!(
            first.outputs["full_mix.wav"].wav_data,
            second.outputs["full_mix.wav"].wav_data
        );
    }

    #[test]
    fn test_corrupted_override_skips_only_that_stem() {
        let request = StemRequest {
            full_mix: true,
            vocals: true,
            drums: true,
            kick: true,
            snare: true,
            ..StemRequest::default()
        };
        let batch = StemBatch::new(PATTERN_JSON, 120, 42, request)
            .with_override(StemKind::Snare, "{ this is not json");

        let result = export_stems(&batch);

        assert_eq!(result.outputs.len(), 4);
        assert!(!result.outputs.contains_key("snare.wav"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].kind, StemKind::Snare);
    }

    #[test]
    fn test_empty_request_yields_empty_result() {
        let batch = StemBatch::new(PATTERN_JSON, 120, 42, StemRequest::default());
        let result = export_stems(&batch);
        assert!(result.outputs.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_bad_tempo_skips_every_stem() {
        let batch = StemBatch::new(PATTERN_JSON, 999, 42, StemRequest::everything());
        let result = export_stems(&batch);
        assert!(result.outputs.is_empty());
        assert_eq!(result.skipped.len(), 7);
    }
}
