use rand::Rng;

pub const EPSILON: f32 = 1e-6;

pub const ENERGY_MAX: f32 = 255.0;

/// Linear rescale of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Unclamped. A degenerate source range is widened to `EPSILON`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let mut span = in_max - in_min;
    if span.abs() < EPSILON {
        span = EPSILON.copysign(span);
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

// bounds may be equal or reversed
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.gen_range(0.0f32..1.0) * (hi - lo)
}

/// Loudness of the five named frequency bands, each on a 0..255 scale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnergyBands {
    pub bass: f32,
    pub low_mid: f32,
    pub mid: f32,
    pub high_mid: f32,
    pub treble: f32,
}

impl EnergyBands {
    pub fn new(bass: f32, low_mid: f32, mid: f32, high_mid: f32, treble: f32) -> Self {
        Self {
            bass,
            low_mid,
            mid,
            high_mid,
            treble,
        }
    }

    /// Every band forced into `[0, 255]`. NaN reads as silence.
    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, ENERGY_MAX) };
        Self {
            bass: c(self.bass),
            low_mid: c(self.low_mid),
            mid: c(self.mid),
            high_mid: c(self.high_mid),
            treble: c(self.treble),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }.clamped()
    }

    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_nan() { EPSILON } else { v.max(EPSILON) };
        Self {
            width: c(self.width),
            height: c(self.height),
        }
    }
}

/// Everything the effect needs from the host for one frame.
#[derive(Clone, Copy, Debug)]
pub struct BeatFrame {
    pub beat: bool,
    pub energy: EnergyBands,
    pub canvas: Canvas,
}

impl BeatFrame {
    pub fn new(beat: bool, energy: EnergyBands, canvas: Canvas) -> Self {
        Self {
            beat,
            energy: energy.clamped(),
            canvas: canvas.clamped(),
        }
    }

    pub fn silent(canvas: Canvas) -> Self {
        Self::new(false, EnergyBands::default(), canvas)
    }
}
