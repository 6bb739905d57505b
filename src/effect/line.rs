use std::f32::consts::PI;

use nannou::prelude::{Vec2, vec2};
use rand::Rng;

use super::frame::uniform;
use super::point::Point;

// per-frame multipliers
pub const DECAY: f32 = 0.99;
pub const BLEND_GROWTH: f32 = 1.01;
pub const STROKE_FLOOR: f32 = 0.001;
// retired once `opacity * 255` reaches this
pub const RETIRE_OPACITY: f32 = 2.55;
pub const MAX_KICK_SCALE: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    pub const fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        let l = |a: f32, b: f32| a + (b - a) * t;
        Self {
            red: l(self.red, other.red),
            green: l(self.green, other.green),
            blue: l(self.blue, other.blue),
            alpha: l(self.alpha, other.alpha),
        }
    }
}

pub const CYAN: Rgba = Rgba::opaque(0.0, 1.0, 1.0);
pub const MAGENTA: Rgba = Rgba::opaque(1.0, 0.0, 1.0);
pub const YELLOW: Rgba = Rgba::opaque(1.0, 1.0, 0.0);
pub const LIME: Rgba = Rgba::opaque(0.0, 1.0, 0.0);

pub const PALETTE: [Rgba; 4] = [CYAN, MAGENTA, YELLOW, LIME];

pub fn pick_colors<R: Rng + ?Sized>(rng: &mut R) -> (Rgba, Rgba) {
    loop {
        let first = rng.gen_range(0..PALETTE.len());
        let second = rng.gen_range(0..PALETTE.len());
        if first != second {
            return (PALETTE[first], PALETTE[second]);
        }
    }
}

/// A fading segment between two drifting points.
///
/// The first beat seen after creation kicks the line with a random rotation
/// and scale about `a`; afterwards those relax back to identity while the
/// opacity fades and the color slides toward `secondary`.
#[derive(Clone, Debug)]
pub struct Line {
    pub a: Point,
    pub b: Point,
    primary: Rgba,
    secondary: Rgba,
    blend: f32,
    opacity: f32,
    stroke_weight: f32,
    rotation: f32,
    scale: f32,
    kicked: bool,
    expired: bool,
}

impl Line {
    pub fn new(
        a: Point,
        b: Point,
        (primary, secondary): (Rgba, Rgba),
        opacity: f32,
        blend: f32,
        stroke_weight: f32,
    ) -> Self {
        Self {
            a,
            b,
            primary,
            secondary,
            blend: blend.clamp(0.0, 1.0),
            opacity: opacity.clamp(0.0, 1.0),
            stroke_weight: stroke_weight.max(STROKE_FLOOR),
            rotation: 0.0,
            scale: 1.0,
            kicked: false,
            expired: false,
        }
    }

    pub fn randomized<R: Rng + ?Sized>(a: Point, b: Point, rng: &mut R) -> Self {
        let colors = pick_colors(rng);
        let opacity = uniform(rng, 0.0, 1.0);
        let blend = uniform(rng, 0.01, 0.25);
        let stroke_weight = uniform(rng, 0.0, 2.0);
        Self::new(a, b, colors, opacity, blend, stroke_weight)
    }

    /// Advances one frame. Returns true once the line has faded out.
    pub fn step<R: Rng + ?Sized>(&mut self, beat: bool, rng: &mut R) -> bool {
        if beat && !self.kicked {
            self.rotation = uniform(rng, -PI, PI);
            self.scale = uniform(rng, 1.0, MAX_KICK_SCALE);
            self.kicked = true;
        } else {
            self.stroke_weight = (self.stroke_weight * DECAY).max(STROKE_FLOOR);
            self.rotation *= DECAY;
            self.scale = (self.scale * DECAY).max(1.0);
        }

        self.opacity *= DECAY;
        self.blend = (self.blend * BLEND_GROWTH).min(1.0);

        self.a.step();
        self.b.step();

        self.expired = self.opacity_255() <= RETIRE_OPACITY;
        self.expired
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn opacity_255(&self) -> f32 {
        self.opacity * 255.0
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn stroke_weight(&self) -> f32 {
        self.stroke_weight
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn kicked(&self) -> bool {
        self.kicked
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn colors(&self) -> (Rgba, Rgba) {
        (self.primary, self.secondary)
    }

    /// Primary faded by the current opacity, then blended toward secondary.
    pub fn stroke_color(&self) -> Rgba {
        self.primary
            .with_alpha(self.opacity)
            .lerp(self.secondary, self.blend)
    }

    /// Segment endpoints after rotating and scaling `a -> b` about `a`.
    pub fn segment(&self) -> (Vec2, Vec2) {
        let start = self.a.position;
        let d = (self.b.position - start) * self.scale;
        let (sin, cos) = self.rotation.sin_cos();
        (start, start + vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos))
    }
}
