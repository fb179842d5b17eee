//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Change the speed and volume of an audio clip and export it as WAV
#[derive(Parser, Debug, Clone)]
#[command(name = "clipedit")]
#[command(version)]
pub struct Cli {
    /// Audio file to edit (WAV, FLAC, MP3, OGG, ...)
    pub input: PathBuf,

    /// Playback-rate multiplier (1.0 = unchanged) [default: from config]
    #[arg(short, long, value_parser = parse_speed)]
    pub speed: Option<f64>,

    /// Linear gain (1.0 = unchanged) [default: from config]
    #[arg(short, long, value_parser = parse_volume)]
    pub volume: Option<f64>,

    /// Directory to write the export to [default: from config, else downloads]
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Name of the exported file [default: from config, else edited.wav]
    #[arg(long)]
    pub file_name: Option<String>,

    /// Config file (must exist and parse) [default: platform config dir]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the waveform overview before exporting
    #[arg(long)]
    pub show_waveform: bool,

    /// Waveform overview width in columns [default: from config]
    #[arg(long)]
    pub waveform_width: Option<usize>,

    /// Declare the source sample rate in the export instead of rate + speed
    #[arg(long)]
    pub preserve_rate: bool,
}

fn parse_finite(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if !parsed.is_finite() {
        return Err(format!("`{}` is not a finite number", value));
    }
    Ok(parsed)
}

/// Speed must be strictly positive; rejected here before the encoder sees it
fn parse_speed(value: &str) -> Result<f64, String> {
    let speed = parse_finite(value)?;
    if speed <= 0.0 {
        return Err(format!("speed must be greater than 0, got {}", speed));
    }
    Ok(speed)
}

fn parse_volume(value: &str) -> Result<f64, String> {
    parse_finite(value)
}
