//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Audio-reactive line visualizer. Drop an audio file on the window to play it.
#[derive(Parser, Debug, Clone)]
#[command(name = "drop-radio", version, about, long_about = None)]
#[command(after_help = "Keys: Enter shows/hides the controls, Space plays/pauses, Shift saves a screenshot.")]
pub struct Args {
    /// Audio file to start playing (wav, mp3, flac, ogg)
    #[arg(value_name = "AUDIO_FILE")]
    pub file: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Seed for the line effect (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// FFT window length, a power of two
    #[arg(long, default_value_t = 2048, value_parser = parse_fft_size)]
    pub fft_size: usize,

    /// Alpha of the black wash drawn each frame; lower leaves longer trails
    #[arg(long, default_value_t = 0.12)]
    pub trail_fade: f32,

    /// Directory screenshots are saved to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub screenshot_dir: PathBuf,
}

fn parse_fft_size(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n < 256 || !n.is_power_of_two() {
        return Err(format!("{n} is not a power of two >= 256"));
    }
    Ok(n)
}
