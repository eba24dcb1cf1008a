//! The offline renderer.
//!
//! Turns a validated composition plus a track subset into a stereo buffer,
//! faster than real time and bit-deterministic for identical inputs. Every
//! synthesis voice is always instantiated and its one-shot synthesized,
//! whether or not its track is in the subset; the subset only gates the
//! trigger decision. This keeps voice allocation (and therefore RNG
//! consumption) identical across subsets, so a kick one-shot sounds the
//! same in `full_mix.wav` and `kick.wav`.
//!
//! Scheduling is realized through the mixer: each triggered event becomes
//! one delayed [`Layer`], and a single mix pass resolves the whole
//! timeline.

use stemforge_spec::{
    validate_tempo, Composition, Instrument, Melody, Track, PATTERN_STEPS,
};

use crate::buffer::AudioBuffer;
use crate::error::{RenderError, RenderResult};
use crate::mixer::{normalize_stereo, Layer, Mixer};
use crate::rng::create_voice_rng;
use crate::synthesis::{ClapSynth, HihatSynth, KickSynth, LeadSynth, SnareSynth, Synthesizer};

/// Engine sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Beats per bar; patterns are strictly 4/4.
pub const BEATS_PER_BAR: f64 = 4.0;

/// Default length of a pattern-driven render, in bars.
pub const DEFAULT_PATTERN_BARS: u32 = 8;

/// Trailing tail appended after the last melody note, in seconds.
pub const MELODY_TAIL_SEC: f64 = 2.0;

/// Shortest allowed render.
pub const DURATION_MIN_SEC: f64 = 5.0;

/// Longest allowed render.
pub const DURATION_MAX_SEC: f64 = 300.0;

/// One render invocation: a composition, a tempo, a track subset, a
/// duration and a seed. Consumed exactly once, producing one buffer.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// The validated composition to render.
    pub composition: Composition,
    /// Tempo in BPM, within the supported range.
    pub tempo_bpm: u32,
    /// Tracks allowed to trigger. Everything else renders silence.
    pub track_subset: Vec<Track>,
    /// Render length in seconds.
    pub duration_sec: f64,
    /// Base seed for voice RNG derivation.
    pub seed: u32,
}

impl RenderJob {
    /// Creates a job, validating tempo and duration.
    pub fn new(
        composition: Composition,
        tempo_bpm: u32,
        track_subset: Vec<Track>,
        duration_sec: f64,
        seed: u32,
    ) -> RenderResult<Self> {
        validate_tempo(tempo_bpm)?;
        if !duration_sec.is_finite() || duration_sec <= 0.0 {
            return Err(RenderError::InvalidDuration {
                duration: duration_sec,
            });
        }
        Ok(Self {
            composition,
            tempo_bpm,
            track_subset,
            duration_sec,
            seed,
        })
    }
}

/// Infers the render duration for a composition at a tempo.
///
/// Melodies run to the end of the last-sounding note plus a fixed tail;
/// patterns default to [`DEFAULT_PATTERN_BARS`] bars. The result is always
/// clamped to [[`DURATION_MIN_SEC`], [`DURATION_MAX_SEC`]].
pub fn infer_duration(composition: &Composition, tempo_bpm: u32) -> f64 {
    let seconds_per_beat = 60.0 / tempo_bpm as f64;
    let raw = match composition {
        Composition::Melody(melody) => {
            melody.end_beats().unwrap_or(0.0) * seconds_per_beat + MELODY_TAIL_SEC
        }
        Composition::Pattern(_) => {
            DEFAULT_PATTERN_BARS as f64 * BEATS_PER_BAR * seconds_per_beat
        }
    };
    raw.clamp(DURATION_MIN_SEC, DURATION_MAX_SEC)
}

/// Per-track mix placement.
fn track_mix(track: Track) -> (f32, f32) {
    match track {
        Track::Vocal => (0.8, 0.0),
        Track::Kick => (0.9, 0.0),
        Track::Snare => (0.7, 0.1),
        Track::Hihat => (0.4, -0.3),
        Track::Clap => (0.5, 0.25),
    }
}

/// One-shot length per percussion voice, in seconds.
fn one_shot_seconds(instrument: Instrument) -> f32 {
    match instrument {
        Instrument::Kick => 0.5,
        Instrument::Snare => 0.4,
        Instrument::Hihat => 0.15,
        Instrument::Clap => 0.4,
    }
}

fn synthesize_one_shot(instrument: Instrument, seed: u32) -> Vec<f32> {
    let num_samples = (one_shot_seconds(instrument) * SAMPLE_RATE as f32) as usize;
    let mut rng = create_voice_rng(seed, instrument.name());
    match instrument {
        Instrument::Kick => KickSynth::standard().synthesize(num_samples, SAMPLE_RATE as f32, &mut rng),
        Instrument::Snare => {
            SnareSynth::standard().synthesize(num_samples, SAMPLE_RATE as f32, &mut rng)
        }
        Instrument::Hihat => {
            HihatSynth::closed().synthesize(num_samples, SAMPLE_RATE as f32, &mut rng)
        }
        Instrument::Clap => {
            ClapSynth::standard().synthesize(num_samples, SAMPLE_RATE as f32, &mut rng)
        }
    }
}

fn schedule_pattern(
    mixer: &mut Mixer,
    pattern: &stemforge_spec::DrumPattern,
    job: &RenderJob,
    one_shots: &[(Instrument, Vec<f32>)],
) {
    let step_sec = (60.0 / job.tempo_bpm as f64) / 4.0;
    let total_steps = (job.duration_sec / step_sec).ceil() as u64;

    for (instrument, one_shot) in one_shots {
        let track = match instrument {
            Instrument::Kick => Track::Kick,
            Instrument::Snare => Track::Snare,
            Instrument::Hihat => Track::Hihat,
            Instrument::Clap => Track::Clap,
        };
        // Gating happens here, never at voice construction
        if !job.track_subset.contains(&track) {
            continue;
        }
        let (volume, pan) = track_mix(track);

        for global_step in 0..total_steps {
            let step = (global_step % PATTERN_STEPS as u64) as u8;
            if !pattern.has_hit(*instrument, step) {
                continue;
            }
            let onset_sec = global_step as f64 * step_sec;
            let delay = (onset_sec * SAMPLE_RATE as f64) as usize;
            mixer.add_layer(Layer::new(one_shot.clone(), volume).with_pan(pan).at_sample(delay));
        }
    }
}

fn schedule_melody(mixer: &mut Mixer, melody: &Melody, job: &RenderJob) -> RenderResult<()> {
    let vocal_enabled = job.track_subset.contains(&Track::Vocal);
    let seconds_per_beat = 60.0 / job.tempo_bpm as f64;
    let (volume, pan) = track_mix(Track::Vocal);

    // One RNG stream for the whole voice, consumed in authored order so
    // renders are reproducible regardless of onset ordering.
    let mut rng = create_voice_rng(job.seed, Track::Vocal.name());

    for event in &melody.events {
        let frequencies = event.frequencies()?;
        let onset_sec = event.onset_beats * seconds_per_beat;
        let note_sec = event.duration.beats() * seconds_per_beat;
        let num_samples = (note_sec * SAMPLE_RATE as f64) as usize;
        let delay = (onset_sec * SAMPLE_RATE as f64) as usize;

        let chord_scale = 1.0 / (frequencies.len() as f32).sqrt();
        for frequency in frequencies {
            // The voice is always synthesized so RNG consumption does not
            // depend on the subset; gating only drops the layer.
            let samples =
                LeadSynth::note(frequency).synthesize(num_samples, SAMPLE_RATE as f32, &mut rng);
            if vocal_enabled {
                mixer.add_layer(
                    Layer::new(samples, volume * chord_scale)
                        .with_pan(pan)
                        .at_sample(delay),
                );
            }
        }
    }
    Ok(())
}

/// Renders a job to a stereo buffer of exactly
/// `duration_sec × SAMPLE_RATE` frames.
pub fn render(job: &RenderJob) -> RenderResult<AudioBuffer> {
    validate_tempo(job.tempo_bpm)?;
    if !job.duration_sec.is_finite() || job.duration_sec <= 0.0 {
        return Err(RenderError::InvalidDuration {
            duration: job.duration_sec,
        });
    }

    let num_frames = (job.duration_sec * SAMPLE_RATE as f64).round() as usize;
    let mut mixer = Mixer::new(num_frames);

    // All percussion one-shots are synthesized up front, for every voice,
    // before any trigger decision is made.
    let one_shots: Vec<(Instrument, Vec<f32>)> = Instrument::ALL
        .iter()
        .map(|&instrument| (instrument, synthesize_one_shot(instrument, job.seed)))
        .collect();

    match &job.composition {
        Composition::Pattern(pattern) => {
            schedule_pattern(&mut mixer, pattern, job, &one_shots);
        }
        Composition::Melody(melody) => {
            schedule_melody(&mut mixer, melody, job)?;
        }
    }

    let mut stereo = mixer.mix();

    // Pull overlapping hits back under full scale; quiet mixes are left
    // untouched so subset renders keep their relative level.
    let peak = stereo
        .left
        .iter()
        .chain(stereo.right.iter())
        .map(|s| s.abs())
        .fold(0.0_f32, f32::max);
    if peak > 1.0 {
        normalize_stereo(&mut stereo, -0.5);
    }

    Ok(AudioBuffer::stereo(stereo.left, stereo.right, SAMPLE_RATE))
}

#[cfg(test)]
mod tests {
    use stemforge_spec::{DrumPattern, DurationToken, NoteEvent};

    use super::*;

    fn four_on_the_floor() -> DrumPattern {
        let mut pattern = DrumPattern::new();
        for step in [0, 4, 8, 12] {
            pattern.add_hit(Instrument::Kick, step);
        }
        pattern.add_hit(Instrument::Snare, 4);
        pattern.add_hit(Instrument::Snare, 12);
        pattern
    }

    fn simple_melody() -> Melody {
        Melody::new(vec![
            NoteEvent::new(0.0, vec!["C4".into()], DurationToken::parse("half").unwrap()),
            NoteEvent::new(2.0, vec!["E4".into(), "G4".into()], DurationToken::parse("whole").unwrap()),
        ])
    }

    fn job(composition: Composition, tracks: Vec<Track>, duration: f64) -> RenderJob {
        RenderJob::new(composition, 120, tracks, duration, 42).unwrap()
    }

    #[test]
    fn test_render_frame_count_is_exact() {
        let job = job(
            Composition::Pattern(four_on_the_floor()),
            Track::ALL.to_vec(),
            5.0,
        );
        let buffer = render(&job).unwrap();

        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.frames(), 5 * SAMPLE_RATE as usize);
    }

    #[test]
    fn test_render_is_deterministic() {
        let job = job(
            Composition::Pattern(four_on_the_floor()),
            Track::ALL.to_vec(),
            5.0,
        );
        assert_eq!(render(&job).unwrap(), render(&job).unwrap());
    }

    #[test]
    fn test_empty_subset_renders_silence() {
        let job = job(Composition::Pattern(four_on_the_floor()), vec![], 5.0);
        let buffer = render(&job).unwrap();
        assert!(buffer.channel(0).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_subset_gates_at_trigger_level() {
        let everything = job(
            Composition::Pattern(four_on_the_floor()),
            Track::ALL.to_vec(),
            5.0,
        );
        let kick_only = job(
            Composition::Pattern(four_on_the_floor()),
            vec![Track::Kick],
            5.0,
        );

        let full = render(&everything).unwrap();
        let isolated = render(&kick_only).unwrap();

        // Kick hits land at step 0 in both renders
        assert!(isolated.channel(0)[100].abs() > 0.0);
        assert!(full.channel(0)[100].abs() > 0.0);

        // Snare-only step (step 4 at 120 BPM = 0.5 s) is silent in the
        // kick-only render once the kick one-shot has died out
        let snare_step = SAMPLE_RATE as usize / 2 + 100;
        assert!(full.channel(0)[snare_step].abs() > 0.0);
    }

    #[test]
    fn test_melody_renders_notes() {
        let job = job(
            Composition::Melody(simple_melody()),
            vec![Track::Vocal],
            6.0,
        );
        let buffer = render(&job).unwrap();

        // Sound present shortly after the first onset
        assert!(buffer.channel(0)[4410].abs() > 0.0);
        // Second event (onset beat 2 = 1.0 s at 120 BPM) also sounds
        assert!(buffer.channel(0)[SAMPLE_RATE as usize + 4410].abs() > 0.0);
    }

    #[test]
    fn test_melody_without_vocal_track_is_silent() {
        let job = job(
            Composition::Melody(simple_melody()),
            vec![Track::Kick, Track::Snare],
            6.0,
        );
        let buffer = render(&job).unwrap();
        assert!(buffer.channel(0).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_invalid_tempo_is_rejected() {
        let result = RenderJob::new(
            Composition::Pattern(four_on_the_floor()),
            500,
            Track::ALL.to_vec(),
            5.0,
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let result = RenderJob::new(
            Composition::Pattern(four_on_the_floor()),
            120,
            Track::ALL.to_vec(),
            0.0,
            0,
        );
        assert!(matches!(result, Err(RenderError::InvalidDuration { .. })));
    }

    #[test]
    fn test_infer_duration_pattern_is_eight_bars() {
        let composition = Composition::Pattern(four_on_the_floor());
        // 8 bars * 4 beats * 0.5 s/beat = 16 s at 120 BPM
        assert!((infer_duration(&composition, 120) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_infer_duration_melody_adds_tail() {
        let composition = Composition::Melody(simple_melody());
        // Last note ends at beat 6 = 3 s at 120 BPM, plus 2 s tail, below
        // the 5 s floor so the clamp applies
        assert_eq!(infer_duration(&composition, 120), 5.0);
    }

    #[test]
    fn test_infer_duration_clamps_to_ceiling() {
        let melody = Melody::new(vec![NoteEvent::new(
            2000.0,
            vec!["C4".into()],
            DurationToken::parse("whole").unwrap(),
        )]);
        assert_eq!(infer_duration(&Composition::Melody(melody), 120), 300.0);
    }

    #[test]
    fn test_infer_duration_clamps_to_floor() {
        let melody = Melody::new(vec![NoteEvent::new(
            0.0,
            vec!["C4".into()],
            DurationToken::parse("quarter").unwrap(),
        )]);
        assert_eq!(infer_duration(&Composition::Melody(melody), 120), 5.0);
    }
}
