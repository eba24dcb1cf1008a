//! Stemforge CLI - command-line interface for the offline audio engine.
//!
//! Thin file-in/file-out wrappers over the engine façades: export stems
//! from composition JSON, render a beat to one file, master a WAV with a
//! style or against a reference, and split a stereo WAV into vocal and
//! instrumental halves.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use stemforge_render::master::{master_with_reference, master_with_style, split};
use stemforge_render::stems::{export_stems, StemBatch};
use stemforge_render::wav::{read_wav, WavResult};
use stemforge_render::{infer_duration, render, RenderJob};
use stemforge_spec::{Composition, MasterStyle, StemRequest, Track};

/// Stemforge - Offline Audio Rendering & Encoding Engine
#[derive(Parser)]
#[command(name = "stemforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export stems from a composition JSON file
    Stems {
        /// Path to composition JSON (pattern object or melody array)
        #[arg(short, long)]
        input: String,

        /// Tempo in BPM
        #[arg(short, long, default_value_t = 120)]
        tempo: u32,

        /// Render seed
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Output directory for the WAV files
        #[arg(short, long, default_value = ".")]
        output_dir: String,

        /// Stems to export (full_mix, vocals, drums, kick, snare, hihat, clap)
        #[arg(long, value_delimiter = ',', default_value = "full_mix")]
        stems: Vec<String>,
    },

    /// Render a composition to a single full-mix WAV
    Beat {
        /// Path to composition JSON
        #[arg(short, long)]
        input: String,

        /// Tempo in BPM
        #[arg(short, long, default_value_t = 120)]
        tempo: u32,

        /// Render seed
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Output WAV path
        #[arg(short, long)]
        output: String,
    },

    /// Master a WAV file with a named style or against a reference track
    Master {
        /// Input WAV path
        #[arg(short, long)]
        input: String,

        /// Mastering style (punchy, warm, bright, open, bass_heavy, vocal_focus)
        #[arg(short, long, conflicts_with = "reference")]
        style: Option<String>,

        /// Reference WAV to match loudness against
        #[arg(short, long)]
        reference: Option<String>,

        /// Output WAV path
        #[arg(short, long)]
        output: String,
    },

    /// Split a stereo WAV into vocal and instrumental halves
    Split {
        /// Input WAV path (must be stereo)
        #[arg(short, long)]
        input: String,

        /// Output directory for vocals.wav and instrumental.wav
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },
}

fn parse_stem_flags(names: &[String]) -> Result<StemRequest> {
    let mut request = StemRequest::default();
    for name in names {
        match name.as_str() {
            "all" => request = StemRequest::everything(),
            "full_mix" => request.full_mix = true,
            "vocals" => request.vocals = true,
            "drums" => request.drums = true,
            "kick" => request.kick = true,
            "snare" => request.snare = true,
            "hihat" => request.hihat = true,
            "clap" => request.clap = true,
            other => bail!("unknown stem '{other}'"),
        }
    }
    Ok(request)
}

fn read_wav_file(path: &str) -> Result<stemforge_render::AudioBuffer> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {path}"))?;
    read_wav(&bytes).with_context(|| format!("failed to decode {path}"))
}

fn write_wav_file(path: &Path, wav: &WavResult) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, &wav.wav_data).with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "{}: {} ch, {} Hz, {:.2} s, pcm hash {}",
        path.display(),
        wav.channels,
        wav.sample_rate,
        wav.duration_seconds(),
        wav.pcm_hash
    );
    Ok(())
}

fn cmd_stems(input: &str, tempo: u32, seed: u32, output_dir: &str, stems: &[String]) -> Result<()> {
    let request = parse_stem_flags(stems)?;
    if request.is_empty() {
        bail!("no stems requested");
    }
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?;

    let batch = StemBatch::new(json, tempo, seed, request);
    let result = export_stems(&batch);

    for (filename, wav) in &result.outputs {
        write_wav_file(&PathBuf::from(output_dir).join(filename), wav)?;
    }
    for skip in &result.skipped {
        eprintln!("skipped {}: {}", skip.kind.filename(), skip.reason);
    }
    if result.outputs.is_empty() {
        bail!("every requested stem failed");
    }
    Ok(())
}

fn cmd_beat(input: &str, tempo: u32, seed: u32, output: &str) -> Result<()> {
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?;
    let composition = Composition::from_json(&json).context("invalid composition")?;

    let duration = infer_duration(&composition, tempo);
    let job = RenderJob::new(composition, tempo, Track::ALL.to_vec(), duration, seed)?;
    let buffer = render(&job)?;

    write_wav_file(Path::new(output), &WavResult::from_buffer(&buffer))
}

fn cmd_master(
    input: &str,
    style: Option<&str>,
    reference: Option<&str>,
    output: &str,
) -> Result<()> {
    let buffer = read_wav_file(input)?;

    let mastered = match reference {
        Some(reference_path) => {
            let reference = read_wav_file(reference_path)?;
            master_with_reference(&buffer, &reference)?
        }
        None => {
            let style = MasterStyle::from_name(style.unwrap_or("punchy"));
            master_with_style(&buffer, style)?
        }
    };

    write_wav_file(Path::new(output), &WavResult::from_buffer(&mastered))
}

fn cmd_split(input: &str, output_dir: &str) -> Result<()> {
    let buffer = read_wav_file(input)?;
    let parts = split(&buffer)?;

    let dir = PathBuf::from(output_dir);
    write_wav_file(&dir.join("vocals.wav"), &WavResult::from_buffer(&parts.center))?;
    write_wav_file(
        &dir.join("instrumental.wav"),
        &WavResult::from_buffer(&parts.side),
    )?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Stems {
            input,
            tempo,
            seed,
            output_dir,
            stems,
        } => cmd_stems(&input, tempo, seed, &output_dir, &stems),
        Commands::Beat {
            input,
            tempo,
            seed,
            output,
        } => cmd_beat(&input, tempo, seed, &output),
        Commands::Master {
            input,
            style,
            reference,
            output,
        } => cmd_master(&input, style.as_deref(), reference.as_deref(), &output),
        Commands::Split { input, output_dir } => cmd_split(&input, &output_dir),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stem_flags() {
        let request = parse_stem_flags(&["kick".into(), "drums".into()]).unwrap();
        assert!(request.kick);
        assert!(request.drums);
        assert!(!request.full_mix);
    }

    #[test]
    fn test_parse_stem_flags_all() {
        let request = parse_stem_flags(&["all".into()]).unwrap();
        assert_eq!(request, StemRequest::everything());
    }

    #[test]
    fn test_parse_stem_flags_rejects_unknown() {
        assert!(parse_stem_flags(&["cowbell".into()]).is_err());
    }
}
