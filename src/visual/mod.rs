pub mod hud;
pub mod layer;
pub mod lines;

use nannou::prelude::*;

use crate::effect;

pub use hud::HudRenderer;
pub use layer::LineLayer;
pub use lines::LineRenderer;

/// Screen space (origin top-left, y down) to nannou's centred, y-up space.
pub fn to_world(win: Rect, p: Vec2) -> Point2 {
    pt2(win.left() + p.x, win.top() - p.y)
}

/// Inverse of [`to_world`].
pub fn to_screen(win: Rect, p: Point2) -> Vec2 {
    vec2(p.x - win.left(), win.top() - p.y)
}

pub fn to_srgba(c: effect::Rgba) -> Srgba {
    srgba(c.red, c.green, c.blue, c.alpha)
}
