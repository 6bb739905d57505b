use std::f32::consts::FRAC_PI_2;

use nannou::prelude::{Vec2, vec2};

use super::Pointer;
use crate::effect::map_range;

/// Rotary pan knob. Dragging sideways turns it between -90° and +90°.
#[derive(Clone, Debug)]
pub struct PanControl {
    pub position: Vec2,
    pub size: f32,
    rotation: f32,
    dragging: bool,
}

impl PanControl {
    pub const SIZE: f32 = 36.0;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: Self::SIZE,
            rotation: 0.0,
            dragging: false,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn pan(&self) -> f32 {
        map_range(self.rotation, -FRAC_PI_2, FRAC_PI_2, -1.0, 1.0)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_over(&self, p: Vec2) -> bool {
        (p - self.position).length() < self.size * 0.5
    }

    pub fn press(&mut self, p: Vec2, enabled: bool) {
        self.dragging = enabled && self.is_over(p);
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Returns the new pan while being dragged.
    pub fn update(&mut self, pointer: &Pointer) -> Option<f32> {
        if !(self.dragging && pointer.left_down) {
            return None;
        }
        self.rotation = map_range(
            pointer.position.x,
            self.position.x - self.size,
            self.position.x + self.size,
            -FRAC_PI_2,
            FRAC_PI_2,
        )
        .clamp(-FRAC_PI_2, FRAC_PI_2);
        Some(self.pan())
    }

    /// Tip of the indicator line, straight up at zero rotation.
    pub fn indicator_tip(&self) -> Vec2 {
        let r = self.size * 0.5;
        self.position + vec2(r * self.rotation.sin(), -r * self.rotation.cos())
    }
}
