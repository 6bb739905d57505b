pub const FADE_STEP: f32 = 255.0 * 0.034;

/// Fade state of the whole HUD, on a 0..255 scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiFade {
    visible: bool,
    opacity: f32,
}

impl UiFade {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Widgets only take input while any of the HUD is on screen.
    pub fn is_interactive(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn toggle(&mut self, loaded: bool) {
        if loaded {
            self.visible = !self.visible;
        }
    }

    pub fn reset(&mut self) {
        self.opacity = 0.0;
    }

    pub fn step(&mut self, loaded: bool) {
        if !loaded {
            return;
        }
        self.opacity = if self.visible {
            (self.opacity + FADE_STEP).min(255.0)
        } else {
            (self.opacity - FADE_STEP).max(0.0)
        };
    }
}
