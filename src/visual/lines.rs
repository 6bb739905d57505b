use nannou::prelude::*;

use super::{to_srgba, to_world};
use crate::effect::ActiveLineSet;

pub struct LineRenderer {
    /// Alpha of the black wash laid over the previous frame; lower leaves
    /// longer trails, 1.0 leaves none.
    pub fade_alpha: f32,
}

impl LineRenderer {
    pub fn new(fade_alpha: f32) -> Self {
        Self {
            fade_alpha: fade_alpha.clamp(0.0, 1.0),
        }
    }

    pub fn draw(&self, draw: &Draw, win: Rect, lines: &ActiveLineSet) {
        // 1. trail fade
        draw.rect()
            .wh(win.wh())
            .color(srgba(0.0, 0.0, 0.0, self.fade_alpha));

        // 2. lines, oldest first
        for line in lines.lines() {
            let (start, end) = line.segment();
            draw.line()
                .start(to_world(win, start))
                .end(to_world(win, end))
                .weight(line.stroke_weight())
                .color(to_srgba(line.stroke_color()));
        }
    }
}
