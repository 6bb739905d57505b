use nannou::prelude::*;

use super::to_world;
use crate::ui::text::{format_time, volume_text};
use crate::ui::{Hud, Layout, PlayBar, TransportState, VolumeBar};

const BAR_THICKNESS: f32 = 6.0;
const SMALL_FONT: u32 = 16;
const LARGE_FONT: u32 = 64;

pub struct HudRenderer;

impl HudRenderer {
    pub fn draw(&self, draw: &Draw, win: Rect, hud: &Hud, transport: &TransportState) {
        let a = hud.fade.opacity() / 255.0;
        if a <= 0.0 {
            return;
        }
        let white = srgba(1.0, 1.0, 1.0, a);
        let at = |p: Vec2| to_world(win, p);

        // dim the lines behind the controls
        draw.rect()
            .wh(win.wh())
            .color(srgba(0.0, 0.0, 0.0, a / 4.0));

        // play / pause
        let play = &hud.play;
        let (c, half) = (play.position, play.size * 0.5);
        if play.paused {
            draw.tri()
                .points(
                    at(vec2(c.x - half, c.y - half)),
                    at(vec2(c.x + half, c.y)),
                    at(vec2(c.x - half, c.y + half)),
                )
                .color(white);
        } else {
            let w = play.size / 4.0;
            for dx in [-w, w] {
                draw.rect()
                    .xy(at(vec2(c.x + dx, c.y)))
                    .w_h(w, play.size)
                    .color(white);
            }
        }

        // stop
        draw.rect()
            .xy(at(hud.stop.position))
            .w_h(hud.stop.size, hud.stop.size)
            .color(white);

        // scrub bar
        let bar = &hud.bar;
        draw.rect()
            .xy(at(bar.position))
            .w_h(bar.width, BAR_THICKNESS)
            .color(srgba(1.0, 1.0, 1.0, a * PlayBar::ALPHA));
        draw.ellipse()
            .xy(at(bar.knob()))
            .w_h(bar.knob_size, bar.knob_size)
            .color(white);

        // pan knob
        let pan = &hud.pan;
        draw.ellipse()
            .xy(at(pan.position))
            .w_h(pan.size, pan.size)
            .color(white);
        draw.line()
            .start(at(pan.position))
            .end(at(pan.indicator_tip()))
            .weight(4.0)
            .color(srgba(0.0, 0.0, 0.0, a));

        // volume
        let volume = &hud.volume;
        draw.rect()
            .xy(at(volume.position))
            .w_h(BAR_THICKNESS, volume.height)
            .color(srgba(1.0, 1.0, 1.0, a * VolumeBar::ALPHA));
        draw.ellipse()
            .xy(at(volume.knob()))
            .w_h(volume.knob_size, volume.knob_size)
            .color(white);

        let layout = &hud.layout;
        let label = |text: String, p: Vec2| {
            draw.text(&text)
                .xy(at(p))
                .font_size(SMALL_FONT)
                .color(white);
        };
        label(format_time(transport.current_time), layout.elapsed_text);
        label(format_time(transport.duration), layout.duration_text);
        label(volume_text(transport.volume), layout.volume_text);
    }

    /// Full-opacity message in the middle of the window, shown while no
    /// track is loaded.
    pub fn draw_center_text(&self, draw: &Draw, win: Rect, layout: &Layout, text: &str) {
        draw.text(text)
            .xy(to_world(win, layout.center_text))
            .wh(layout.center_text_box)
            .font_size(LARGE_FONT)
            .center_justify()
            .align_text_middle_y()
            .color(WHITE);
    }
}
