use nannou::prelude::{Vec2, vec2};

/// Where every HUD element sits for a given window size.
///
/// Screen space: origin top-left, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub play_button: Vec2,
    pub stop_button: Vec2,
    pub pan_control: Vec2,
    pub play_bar: Vec2,
    pub play_bar_width: f32,
    pub volume_bar: Vec2,
    pub volume_bar_height: f32,
    pub volume_text: Vec2,
    pub elapsed_text: Vec2,
    pub duration_text: Vec2,
    pub center_text: Vec2,
    pub center_text_box: Vec2,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let (w, h) = (width.max(1.0), height.max(1.0));
        Self {
            width: w,
            height: h,
            play_button: vec2(w * 0.5, h * 0.8),
            stop_button: vec2(w * 0.4, h * 0.8),
            pan_control: vec2(w * 0.6, h * 0.8),
            play_bar: vec2(w * 0.5, h * 0.9),
            play_bar_width: w * 0.9,
            volume_bar: vec2(w * 0.95, h * 0.45),
            volume_bar_height: h * 0.4,
            volume_text: vec2(w * 0.95, h * 0.7),
            elapsed_text: vec2(w * 0.05, h * 0.95),
            duration_text: vec2(w * 0.95, h * 0.95),
            center_text: vec2(w * 0.5, h * 0.5),
            center_text_box: vec2(w * 0.9, h * 0.9),
        }
    }
}
