use anyhow::Context;
use hound::{SampleFormat, WavReader};
use rodio::{Decoder, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Extensions the loader accepts. Anything else dropped on the window is ignored.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["wav", "mp3", "flac", "ogg"];

// progress is reported every this many frames
const PROGRESS_STEP: usize = 1 << 16;

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// A fully decoded track, downmixed to mono.
#[derive(Clone)]
pub struct AudioData {
    pub sample_rate: u32,
    pub samples_mono: Vec<f32>,
    pub duration_sec: f32,
}

impl AudioData {
    pub fn from_samples(sample_rate: u32, samples_mono: Vec<f32>) -> Self {
        let duration_sec = samples_mono.len() as f32 / sample_rate.max(1) as f32;
        Self {
            sample_rate,
            samples_mono,
            duration_sec,
        }
    }

    /// Decodes `path`, reporting progress in `[0, 1]` when the length is known.
    /// An error from `progress` aborts the decode and is returned as is.
    pub fn load<P: AsRef<Path>>(
        path: P,
        progress: impl FnMut(f32) -> anyhow::Result<()>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !is_supported(path) {
            anyhow::bail!("Unsupported audio file: {}", path.display());
        }
        let is_wav = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        if is_wav {
            Self::load_wav(path, progress)
        } else {
            Self::decode(path, progress)
        }
    }

    pub fn load_wav<P: AsRef<Path>>(
        path: P,
        mut progress: impl FnMut(f32) -> anyhow::Result<()>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut reader =
            WavReader::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let spec = reader.spec();

        let channels = spec.channels as usize;
        if channels == 0 {
            anyhow::bail!("WAV file declares zero channels");
        }
        let total = reader.len() as usize / channels;

        let samples: Box<dyn Iterator<Item = hound::Result<f32>> + '_> = match spec.sample_format {
            SampleFormat::Float => {
                if spec.bits_per_sample != 32 {
                    anyhow::bail!(
                        "Only 32-bit float WAV supported got ({}-bit)",
                        spec.bits_per_sample
                    );
                }
                Box::new(reader.samples::<f32>())
            }
            SampleFormat::Int => {
                if !(1..=32).contains(&spec.bits_per_sample) {
                    anyhow::bail!("Unsupported PCM bit depth ({})", spec.bits_per_sample);
                }
                let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
                Box::new(reader.samples::<i32>().map(move |s| s.map(|s| s as f32 * scale)))
            }
        };

        let mut mono = Vec::with_capacity(total);
        let mut acc = 0.0;
        let mut filled = 0;
        for s in samples {
            acc += s.context("Corrupt WAV sample data")?;
            filled += 1;
            if filled == channels {
                mono.push(acc / channels as f32);
                acc = 0.0;
                filled = 0;
                if mono.len() % PROGRESS_STEP == 0 && total > 0 {
                    progress(mono.len() as f32 / total as f32)?;
                }
            }
        }
        progress(1.0)?;

        Ok(Self::from_samples(spec.sample_rate, mono))
    }

    /// Compressed formats go through rodio's decoder.
    pub fn decode<P: AsRef<Path>>(
        path: P,
        mut progress: impl FnMut(f32) -> anyhow::Result<()>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        );
        let decoder = Decoder::new(file)
            .with_context(|| format!("Failed to decode {}", path.display()))?;

        let sample_rate = decoder.sample_rate();
        let channels = decoder.channels().max(1) as usize;
        let total = decoder
            .total_duration()
            .map(|d| (d.as_secs_f64() * sample_rate as f64) as usize);

        let mut mono = Vec::with_capacity(total.unwrap_or(0));
        let mut acc = 0.0;
        let mut filled = 0;
        for s in decoder.convert_samples::<f32>() {
            acc += s;
            filled += 1;
            if filled == channels {
                mono.push(acc / channels as f32);
                acc = 0.0;
                filled = 0;
                if let Some(total) = total.filter(|&t| t > 0) {
                    if mono.len() % PROGRESS_STEP == 0 {
                        progress((mono.len() as f32 / total as f32).min(1.0))?;
                    }
                }
            }
        }
        progress(1.0)?;

        if mono.is_empty() {
            anyhow::bail!("{} decoded to no audio", path.display());
        }
        Ok(Self::from_samples(sample_rate, mono))
    }

    pub fn frame_at(&self, t_sec: f32) -> usize {
        ((t_sec.max(0.0) * self.sample_rate as f32) as usize).min(self.samples_mono.len())
    }

    /// The `n` samples ending at `end_frame`, zero-padded outside the track.
    pub fn window_ending_at(&self, end_frame: usize, n: usize, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(n);

        let len = self.samples_mono.len() as isize;
        let start = end_frame as isize - n as isize;

        for i in 0..(n as isize) {
            let idx = start + i;
            out.push(if (0..len).contains(&idx) {
                self.samples_mono[idx as usize]
            } else {
                0.0
            });
        }
    }
}
