use nannou::prelude::{Vec2, vec2};
use rand::Rng;

use super::frame::{BeatFrame, EnergyBands, ENERGY_MAX, map_range, uniform};
use super::line::Line;
use super::point::Point;

pub const MAX_BURST: f32 = 5.0;
// jitter radius around the anchor for a full burst
pub const MAX_SPREAD: f32 = 100.0;
pub const MAX_SPEED: f32 = 0.5;
pub const MAX_ACCELERATION: f32 = 0.1;

/// Spawns a burst of lines around one random anchor on every detected beat.
#[derive(Clone, Copy, Debug, Default)]
pub struct Emitter;

impl Emitter {
    /// Lines a beat with these energies spawns: whichever of bass or treble
    /// is louder, mapped onto `0..=5`.
    pub fn burst_size(energy: &EnergyBands) -> usize {
        let energy = energy.clamped();
        let count = |e: f32| {
            map_range(e, 0.0, ENERGY_MAX, 0.0, MAX_BURST)
                .floor()
                .max(0.0) as usize
        };
        if energy.treble > energy.bass {
            count(energy.treble)
        } else {
            count(energy.bass)
        }
    }

    pub fn spread(n: usize) -> f32 {
        map_range(n as f32, 0.0, MAX_BURST, 0.0, MAX_SPREAD)
    }

    pub fn emit<R: Rng + ?Sized>(&self, frame: &BeatFrame, rng: &mut R) -> Vec<Line> {
        if !frame.beat {
            return Vec::new();
        }

        // fields are public, so a frame may not have come through BeatFrame::new
        let energy = frame.energy.clamped();
        let canvas = frame.canvas.clamped();

        let n = Self::burst_size(&energy);
        if n == 0 {
            return Vec::new();
        }
        let spread = Self::spread(n);
        let anchor = vec2(
            uniform(rng, 0.0, canvas.width),
            uniform(rng, 0.0, canvas.height),
        );

        (0..n)
            .map(|_| {
                let a = vec2(
                    anchor.x + uniform(rng, 0.0, spread),
                    anchor.y + uniform(rng, 0.0, spread),
                );
                let b = vec2(
                    anchor.x + uniform(rng, -spread, 0.0),
                    anchor.y + uniform(rng, -spread, 0.0),
                );
                let a = leading_point(a, &energy, rng);
                let b = trailing_point(b, &energy, rng);
                Line::randomized(a, b, rng)
            })
            .collect()
    }
}

// Maps `energy` into `[0, limit]` or `[-limit, 0]`.
fn one_sided<R: Rng + ?Sized>(rng: &mut R, energy: f32, limit: f32, positive: bool) -> f32 {
    let bound = uniform(rng, 0.0, limit);
    if positive {
        map_range(energy, 0.0, ENERGY_MAX, 0.0, bound)
    } else {
        map_range(energy, 0.0, ENERGY_MAX, -bound, 0.0)
    }
}

// Maps `energy` into `[-l, h]` with `l` and `h` drawn from `[0, limit]` separately.
fn symmetric<R: Rng + ?Sized>(rng: &mut R, energy: f32, limit: f32) -> f32 {
    let low = -uniform(rng, 0.0, limit);
    let high = uniform(rng, 0.0, limit);
    map_range(energy, 0.0, ENERGY_MAX, low, high)
}

// Endpoint A: velocity follows treble/low-mid, acceleration high-mid/mid.
fn leading_point<R: Rng + ?Sized>(position: Vec2, e: &EnergyBands, rng: &mut R) -> Point {
    let positive = rng.gen_bool(0.5);
    let velocity = vec2(
        one_sided(rng, e.treble, MAX_SPEED, positive),
        one_sided(rng, e.low_mid, MAX_SPEED, positive),
    );
    let positive = rng.gen_bool(0.5);
    let acceleration = vec2(
        one_sided(rng, e.high_mid, MAX_ACCELERATION, positive),
        one_sided(rng, e.mid, MAX_ACCELERATION, positive),
    );
    Point {
        position,
        velocity,
        acceleration,
    }
}

// Endpoint B: the bands of A swapped.
fn trailing_point<R: Rng + ?Sized>(position: Vec2, e: &EnergyBands, rng: &mut R) -> Point {
    let velocity = vec2(
        symmetric(rng, e.high_mid, MAX_SPEED),
        symmetric(rng, e.mid, MAX_SPEED),
    );
    let acceleration = vec2(
        symmetric(rng, e.treble, MAX_ACCELERATION),
        symmetric(rng, e.low_mid, MAX_ACCELERATION),
    );
    Point {
        position,
        velocity,
        acceleration,
    }
}
