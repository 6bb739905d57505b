use nannou::prelude::{Vec2, vec2};

use super::Pointer;
use crate::effect::map_range;

/// Vertical volume slider: top is full volume, bottom is silence.
#[derive(Clone, Debug)]
pub struct VolumeBar {
    pub position: Vec2,
    pub height: f32,
    pub knob_size: f32,
    knob_y: f32,
    dragging: bool,
}

impl VolumeBar {
    pub const KNOB_SIZE: f32 = 24.0;
    pub const ALPHA: f32 = 0.618;

    pub fn new(position: Vec2, height: f32) -> Self {
        Self {
            position,
            height,
            knob_size: Self::KNOB_SIZE,
            knob_y: position.y - height * 0.5,
            dragging: false,
        }
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.height * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height * 0.5
    }

    pub fn knob(&self) -> Vec2 {
        vec2(self.position.x, self.knob_y)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_over_knob(&self, p: Vec2) -> bool {
        (p - self.knob()).length() < self.knob_size * 0.5
    }

    pub fn press(&mut self, p: Vec2) {
        self.dragging = self.is_over_knob(p);
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Returns the new volume while being dragged; otherwise the knob
    /// follows `volume`.
    pub fn update(&mut self, pointer: &Pointer, volume: f32) -> Option<f32> {
        let mut changed = None;
        if self.dragging && pointer.left_down {
            self.knob_y = pointer.position.y.clamp(self.top(), self.bottom());
            let v = map_range(self.knob_y, self.top(), self.bottom(), 1.0, 0.0);
            changed = Some(v.clamp(0.0, 1.0));
        }

        if !self.dragging {
            self.knob_y = map_range(volume, 0.0, 1.0, self.bottom(), self.top());
        }
        changed
    }
}
