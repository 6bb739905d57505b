use super::analyzer::SpectrumAnalyzer;

/// Onset detector over the broadband energy of a [`SpectrumAnalyzer`].
///
/// A peak fires when the normalised energy rises above both a fixed
/// threshold and an adaptive cutoff. After firing, the cutoff jumps to
/// `energy * cutoff_mult`, holds for `frames_per_peak` frames and then
/// decays back toward the threshold.
#[derive(Clone, Debug)]
pub struct BeatDetector {
    pub f_low: f32,
    pub f_high: f32,
    pub threshold: f32,
    pub frames_per_peak: u32,
    pub cutoff_mult: f32,
    pub decay_rate: f32,

    cutoff: f32,
    frames_since_peak: u32,
    previous: f32,
    detected: bool,
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self {
            f_low: 40.0,
            f_high: 20_000.0,
            threshold: 0.35,
            frames_per_peak: 20,
            cutoff_mult: 1.5,
            decay_rate: 0.95,

            cutoff: 0.0,
            frames_since_peak: 0,
            previous: 0.0,
            detected: false,
        }
    }
}

impl BeatDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, analyzer: &SpectrumAnalyzer) -> bool {
        let energy = analyzer.energy(self.f_low, self.f_high) / 255.0;
        self.push(energy)
    }

    /// Feeds one frame of energy in `[0, 1]`. Returns whether it is a peak.
    pub fn push(&mut self, energy: f32) -> bool {
        if energy > self.cutoff && energy > self.threshold && energy - self.previous > 0.0 {
            self.detected = true;
            self.cutoff = energy * self.cutoff_mult;
            self.frames_since_peak = 0;
        } else {
            self.detected = false;
            if self.frames_since_peak <= self.frames_per_peak {
                self.frames_since_peak += 1;
            } else {
                self.cutoff = (self.cutoff * self.decay_rate).max(self.threshold);
            }
        }
        self.previous = energy;
        self.detected
    }

    pub fn is_detected(&self) -> bool {
        self.detected
    }

    pub fn reset(&mut self) {
        *self = Self {
            f_low: self.f_low,
            f_high: self.f_high,
            threshold: self.threshold,
            frames_per_peak: self.frames_per_peak,
            cutoff_mult: self.cutoff_mult,
            decay_rate: self.decay_rate,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_never_fires() {
        let mut d = BeatDetector::new();
        assert!((0..200).all(|_| !d.push(0.0)));
    }

    #[test]
    fn rising_onset_fires_once_then_holds() {
        let mut d = BeatDetector::new();
        assert!(!d.push(0.1));
        assert!(d.push(0.5));
        // steady level: no rise, and cutoff is now 0.75
        assert!(!d.push(0.5));
        assert!(!d.push(0.6));
        assert!(d.push(0.8));
    }

    #[test]
    fn quiet_onsets_stay_below_threshold() {
        let mut d = BeatDetector::new();
        for i in 0..100 {
            let e = if i % 2 == 0 { 0.0 } else { 0.3 };
            assert!(!d.push(e));
        }
    }

    #[test]
    fn cutoff_relaxes_after_hold() {
        let mut d = BeatDetector::new();
        d.push(0.0);
        assert!(d.push(0.6));
        // 0.6 * 1.5 = 0.9 blocks a second 0.6 hit for a while
        d.push(0.0);
        assert!(!d.push(0.6));
        for _ in 0..60 {
            d.push(0.0);
        }
        assert!(d.push(0.6));
    }
}
