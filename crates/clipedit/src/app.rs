//! One editing pass: load, inspect, adjust, export
//!
//! Wires the core together the way the interactive editor does, with the
//! command line standing in for the controls:
//!
//! ```text
//! config ──► EditorSession (speed, volume)
//! input  ──► decode_file ──► session.load ──► overview peaks (optional)
//!                                 │
//!                                 ▼
//!                          session.export ──► DirectoryExport ──► edited.wav
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};

use clipedit_core::config::{default_config_path, load_config, load_config_strict, EditorConfig};
use clipedit_core::decode::decode_file;
use clipedit_core::export::{DirectoryExport, ExportTarget};
use clipedit_core::session::{EditorSession, NullEngine};
use clipedit_core::waveform::overview;
use clipedit_core::wav::RatePolicy;

use crate::cli::Cli;
use crate::waveform_text;

/// Text rows used for the waveform overview
const WAVEFORM_ROWS: usize = 12;

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// File that was edited
    pub input: PathBuf,
    /// Where the export landed
    pub output: PathBuf,
    /// Size of the exported file
    pub bytes: usize,
    /// Frames in the exported data chunk
    pub frames: u32,
    /// Sample rate declared in the export header
    pub declared_rate: u32,
    /// Speed control label, e.g. `1.5x`
    pub speed_label: String,
    /// Volume control label, e.g. `80%`
    pub volume_label: String,
    /// Rendered overview, when requested
    pub waveform: Option<Vec<String>>,
}

impl ExportReport {
    /// One-line human-readable result
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} ({} frames @ {} Hz, {} bytes, speed {}, volume {})",
            self.input.display(),
            self.output.display(),
            self.frames,
            self.declared_rate,
            self.bytes,
            self.speed_label,
            self.volume_label
        )
    }

    /// Everything printed for this export: the overview rows, then the summary
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.waveform.clone().unwrap_or_default();
        lines.push(self.summary());
        lines
    }
}

/// Load the config the command line asks for
fn resolve_config(cli: &Cli) -> Result<EditorConfig> {
    let mut config: EditorConfig = match &cli.config {
        Some(path) => load_config_strict(path)?,
        None => load_config(&default_config_path()),
    };
    config.validate();
    Ok(config)
}

/// Run one load → export pass
pub fn execute(cli: Cli) -> Result<ExportReport> {
    let config = resolve_config(&cli)?;
    log::info!("execute: Editing {}", cli.input.display());

    let rate_policy = if cli.preserve_rate {
        RatePolicy::Preserve
    } else {
        config.controls.rate_policy
    };
    let mut session = EditorSession::new(NullEngine)
        .with_controls(config.controls.default_speed, config.controls.default_volume)
        .with_rate_policy(rate_policy);
    if let Some(speed) = cli.speed {
        session.set_speed(speed);
    }
    if let Some(volume) = cli.volume {
        session.set_volume(volume);
    }

    let buffer = decode_file(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    session.load(buffer);

    let waveform = if cli.show_waveform {
        let width = cli.waveform_width.unwrap_or(config.display.waveform_width);
        session
            .buffer()
            .map(|buffer| waveform_text::render(&overview(buffer, width), WAVEFORM_ROWS))
    } else {
        None
    };

    let wav = session.export().context("Export aborted")?;

    let dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| config.export.resolved_directory());
    let file_name = cli.file_name.as_deref().unwrap_or(&config.export.file_name);
    let output = DirectoryExport::new(dir)
        .deliver(&wav, file_name)
        .context("Export aborted")?;

    let header = wav.header();
    Ok(ExportReport {
        input: cli.input,
        output,
        bytes: wav.len(),
        frames: header.frame_count(),
        declared_rate: header.sample_rate,
        speed_label: session.speed_label(),
        volume_label: session.volume_label(),
        waveform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
    use std::path::Path;

    fn write_input(path: &Path) {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..1000i32 {
            let s = ((i % 100) * 300 - 15000) as i16;
            writer.write_sample(s).unwrap();
            writer.write_sample(-s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("clipedit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_export_pass() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        write_input(&input);
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "export:\n  file_name: out.wav\n").unwrap();

        let report = execute(cli(&[
            input.to_str().unwrap(),
            "--speed",
            "2",
            "--volume",
            "0.5",
            "--out-dir",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(report.output, dir.path().join("out.wav"));
        assert_eq!(report.frames, 500);
        assert_eq!(report.declared_rate, 44102);
        assert_eq!(report.bytes, 44 + 500 * 4);
        assert_eq!(report.speed_label, "2x");
        assert_eq!(report.volume_label, "50%");
        assert!(report.waveform.is_none());
        assert_eq!(report.lines(), vec![report.summary()]);

        let reader = WavReader::open(&report.output).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.len(), 1000);
    }

    #[test]
    fn test_waveform_and_preserved_rate() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        write_input(&input);
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "{}\n").unwrap();

        let report = execute(cli(&[
            input.to_str().unwrap(),
            "--out-dir",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--show-waveform",
            "--waveform-width",
            "20",
            "--preserve-rate",
        ]))
        .unwrap();

        assert_eq!(report.output, dir.path().join("edited.wav"));
        assert_eq!(report.declared_rate, 44100);
        let waveform = report.waveform.clone().unwrap();
        assert_eq!(waveform.len(), WAVEFORM_ROWS);
        assert!(waveform.iter().all(|line| line.chars().count() == 20));

        let lines = report.lines();
        assert_eq!(lines.len(), WAVEFORM_ROWS + 1);
        assert_eq!(lines[..WAVEFORM_ROWS], waveform[..]);
        assert_eq!(lines[WAVEFORM_ROWS], report.summary());
    }

    #[test]
    fn test_missing_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "{}\n").unwrap();

        let result = execute(cli(&[
            dir.path().join("missing.wav").to_str().unwrap(),
            "--out-dir",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]));

        assert!(result.is_err());
        assert!(!dir.path().join("edited.wav").exists());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(cli(&[
            "in.wav",
            "--config",
            dir.path().join("nope.yaml").to_str().unwrap(),
        ]));
        assert!(result.is_err());
    }
}
