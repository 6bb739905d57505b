use rustfft::{FftPlanner, num_complex::Complex32};

use crate::effect::EnergyBands;

pub const BASS: (f32, f32) = (20.0, 140.0);
pub const LOW_MID: (f32, f32) = (140.0, 400.0);
pub const MID: (f32, f32) = (400.0, 2_600.0);
pub const HIGH_MID: (f32, f32) = (2_600.0, 5_200.0);
pub const TREBLE: (f32, f32) = (5_200.0, 14_000.0);

/// Turns a window of mono samples into a 0..255 spectrum, one value per bin.
///
/// Magnitudes are smoothed over time, converted to decibels and the range
/// `[min_db, max_db]` is stretched over `0..=255`.
pub struct SpectrumAnalyzer {
    pub fft_size: usize,
    pub sample_rate: u32,
    pub min_db: f32,
    pub max_db: f32,
    pub smoothing: f32,

    hann: Vec<f32>,
    fft_buf: Vec<Complex32>,
    magnitudes: Vec<f32>,
    spectrum: Vec<f32>,

    fft: std::sync::Arc<dyn rustfft::Fft<f32>>,
}

impl SpectrumAnalyzer {
    pub fn new(sample_rate: u32, fft_size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let hann = (0..fft_size)
            .map(|n| {
                let n = n as f32;
                let n_max = (fft_size.max(2) - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * n / n_max).cos())
            })
            .collect::<Vec<_>>();
        let half = fft_size / 2;

        Self {
            fft_size,
            sample_rate,
            min_db: -100.0,
            max_db: -30.0,
            smoothing: 0.8,

            hann,
            fft_buf: vec![Complex32::new(0.0, 0.0); fft_size],
            magnitudes: vec![0.0; half],
            spectrum: vec![0.0; half],

            fft,
        }
    }

    pub fn analyze(&mut self, window: &[f32]) -> &[f32] {
        debug_assert_eq!(window.len(), self.fft_size);

        //window + complex input, missing samples read as silence
        for i in 0..self.fft_size {
            let x = window.get(i).copied().unwrap_or(0.0) * self.hann[i];
            self.fft_buf[i] = Complex32::new(x, 0.0);
        }

        self.fft.process(&mut self.fft_buf);

        let norm = 1.0 / self.fft_size as f32;
        let range = (self.max_db - self.min_db).max(f32::EPSILON);
        for i in 0..self.magnitudes.len() {
            let c = self.fft_buf[i];
            let mag = (c.re * c.re + c.im * c.im).sqrt() * norm;
            self.magnitudes[i] = self.smoothing * self.magnitudes[i] + (1.0 - self.smoothing) * mag;

            let db = 20.0 * self.magnitudes[i].max(1e-12).log10();
            self.spectrum[i] = (255.0 * (db - self.min_db) / range).clamp(0.0, 255.0);
        }

        &self.spectrum
    }

    pub fn spectrum(&self) -> &[f32] {
        &self.spectrum
    }

    /// Mean spectrum value between two frequencies, both bins inclusive.
    pub fn energy(&self, f_low: f32, f_high: f32) -> f32 {
        if self.spectrum.is_empty() {
            return 0.0;
        }
        let (i0, i1) = self.freq_range_to_bin_range(f_low, f_high);
        let bins = &self.spectrum[i0..=i1];
        bins.iter().sum::<f32>() / bins.len() as f32
    }

    pub fn bands(&self) -> EnergyBands {
        let e = |(lo, hi): (f32, f32)| self.energy(lo, hi);
        EnergyBands::new(e(BASS), e(LOW_MID), e(MID), e(HIGH_MID), e(TREBLE))
    }

    /// Forgets the smoothing history, e.g. after a seek or a new track.
    pub fn reset(&mut self) {
        self.magnitudes.iter_mut().for_each(|m| *m = 0.0);
        self.spectrum.iter_mut().for_each(|s| *s = 0.0);
    }

    fn freq_range_to_bin_range(&self, f0: f32, f1: f32) -> (usize, usize) {
        let nyquist = (self.sample_rate as f32 * 0.5).max(1.0);
        let bins = self.spectrum.len();
        let last = bins - 1;

        let index = |f: f32| ((f / nyquist * bins as f32).round().max(0.0) as usize).min(last);
        let i0 = index(f0.min(f1));
        let i1 = index(f0.max(f1));

        (i0, i1)
    }
}
