use nannou::prelude::{Vec2, vec2};

use super::Pointer;
use crate::effect::map_range;

/// Horizontal scrub bar. The knob follows playback until it is grabbed;
/// letting go seeks to wherever it was dropped.
#[derive(Clone, Debug)]
pub struct PlayBar {
    pub position: Vec2,
    pub width: f32,
    pub knob_size: f32,
    knob_x: f32,
    dragging: bool,
    // set on release so the knob holds still for one frame while the seek lands
    released: bool,
}

impl PlayBar {
    pub const KNOB_SIZE: f32 = 24.0;
    /// Background bar alpha relative to the HUD opacity.
    pub const ALPHA: f32 = 0.618;

    pub fn new(position: Vec2, width: f32) -> Self {
        Self {
            position,
            width,
            knob_size: Self::KNOB_SIZE,
            knob_x: position.x - width * 0.5,
            dragging: false,
            released: false,
        }
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.width * 0.5
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width * 0.5
    }

    pub fn knob(&self) -> Vec2 {
        vec2(self.knob_x, self.position.y)
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

    pub fn update(&mut self, pointer: &Pointer, current_time: f32, duration: f32) {
        if !self.dragging && !self.released {
            self.knob_x = map_range(current_time, 0.0, duration, self.left(), self.right())
                .clamp(self.left(), self.right());
        }
        self.released = false;

        if self.dragging && pointer.left_down {
            self.knob_x = pointer.position.x.clamp(self.left(), self.right());
        }
    }

    /// Ends a drag. Returns the time to seek to, if a drag was in progress.
    pub fn release(&mut self, duration: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.released = true;
        let t = map_range(self.knob_x, self.left(), self.right(), 0.0, duration);
        Some(t.clamp(0.0, duration.max(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(x: f32, down: bool) -> Pointer {
        Pointer {
            position: vec2(x, 500.0),
            left_down: down,
        }
    }

    #[test]
    fn knob_tracks_playback() {
        let mut bar = PlayBar::new(vec2(500.0, 500.0), 800.0);
        bar.update(&pointer(0.0, false), 30.0, 120.0);
        assert_eq!(bar.knob().x, 300.0);
    }

    #[test]
    fn drag_is_clamped_and_release_seeks() {
        let mut bar = PlayBar::new(vec2(500.0, 500.0), 800.0);
        bar.update(&pointer(0.0, false), 0.0, 120.0);

        bar.press(vec2(105.0, 500.0));
        assert!(bar.is_dragging());
        bar.update(&pointer(2_000.0, true), 0.0, 120.0);
        assert_eq!(bar.knob().x, 900.0);

        bar.update(&pointer(700.0, true), 0.0, 120.0);
        assert_eq!(bar.release(120.0), Some(90.0));
        assert!(!bar.is_dragging());

        // the seek has not landed yet; the knob holds for one frame
        bar.update(&pointer(700.0, false), 0.0, 120.0);
        assert_eq!(bar.knob().x, 700.0);
        bar.update(&pointer(700.0, false), 90.0, 120.0);
        assert_eq!(bar.knob().x, 700.0);
    }

    #[test]
    fn press_off_knob_does_nothing() {
        let mut bar = PlayBar::new(vec2(500.0, 500.0), 800.0);
        bar.update(&pointer(0.0, false), 0.0, 120.0);
        bar.press(vec2(400.0, 500.0));
        assert!(!bar.is_dragging());
        assert_eq!(bar.release(120.0), None);
    }

    #[test]
    fn zero_duration_does_not_poison_the_knob() {
        let mut bar = PlayBar::new(vec2(500.0, 500.0), 800.0);
        bar.update(&pointer(0.0, false), 0.0, 0.0);
        assert!(bar.knob().x.is_finite());
    }
}
