//! Transport HUD: widget state machines with no drawing or audio attached.
//!
//! The host feeds pointer events and a [`TransportState`] in, and applies the
//! [`HudAction`]s that come back out.

pub mod buttons;
pub mod fade;
pub mod layout;
pub mod pan_control;
pub mod play_bar;
pub mod text;
pub mod volume_bar;

use nannou::prelude::Vec2;

pub use buttons::{PlayButton, StopButton};
pub use fade::UiFade;
pub use layout::Layout;
pub use pan_control::PanControl;
pub use play_bar::PlayBar;
pub use volume_bar::VolumeBar;

/// Mouse state in screen space (origin top-left, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub left_down: bool,
}

/// Snapshot of the player the HUD mirrors each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportState {
    pub loaded: bool,
    pub playing: bool,
    pub current_time: f32,
    pub duration: f32,
    pub volume: f32,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            loaded: false,
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HudAction {
    TogglePlayback,
    Stop,
    Seek(f32),
    Pan(f32),
    Volume(f32),
}

pub struct Hud {
    pub layout: Layout,
    pub play: PlayButton,
    pub stop: StopButton,
    pub bar: PlayBar,
    pub pan: PanControl,
    pub volume: VolumeBar,
    pub fade: UiFade,
}

impl Hud {
    pub fn new(width: f32, height: f32) -> Self {
        let layout = Layout::new(width, height);
        Self {
            play: PlayButton::new(layout.play_button),
            stop: StopButton::new(layout.stop_button),
            bar: PlayBar::new(layout.play_bar, layout.play_bar_width),
            pan: PanControl::new(layout.pan_control),
            volume: VolumeBar::new(layout.volume_bar, layout.volume_bar_height),
            fade: UiFade::default(),
            layout,
        }
    }

    /// Moves every widget for the new window size, keeping their state.
    pub fn resize(&mut self, width: f32, height: f32) {
        let layout = Layout::new(width, height);
        self.play.position = layout.play_button;
        self.stop.position = layout.stop_button;
        self.bar.position = layout.play_bar;
        self.bar.width = layout.play_bar_width;
        self.pan.position = layout.pan_control;
        self.volume.position = layout.volume_bar;
        self.volume.height = layout.volume_bar_height;
        self.layout = layout;
    }

    pub fn toggle_visible(&mut self, loaded: bool) {
        self.fade.toggle(loaded);
    }

    /// A new track starts with the HUD faded out.
    pub fn on_loaded(&mut self) {
        self.fade.reset();
    }

    pub fn mouse_pressed(&mut self, p: Vec2) {
        if !self.fade.is_interactive() {
            return;
        }
        self.pan.press(p, self.fade.visible());
        self.volume.press(p);
        self.bar.press(p);
    }

    /// Any button release ends every drag; a scrub drag turns into a seek.
    pub fn mouse_released(&mut self, duration: f32) -> Option<HudAction> {
        self.pan.release();
        self.volume.release();
        self.bar.release(duration).map(HudAction::Seek)
    }

    pub fn mouse_clicked(&mut self, p: Vec2) -> Vec<HudAction> {
        let mut actions = Vec::new();
        if !self.fade.is_interactive() {
            return actions;
        }
        if self.play.contains(p) {
            actions.push(HudAction::TogglePlayback);
        }
        if self.stop.contains(p) {
            actions.push(HudAction::Stop);
        }
        actions
    }

    pub fn update(&mut self, pointer: &Pointer, transport: &TransportState) -> Vec<HudAction> {
        self.fade.step(transport.loaded);
        self.play.paused = !transport.playing;

        let mut actions = Vec::new();
        if let Some(pan) = self.pan.update(pointer) {
            actions.push(HudAction::Pan(pan));
        }
        if let Some(volume) = self.volume.update(pointer, transport.volume) {
            actions.push(HudAction::Volume(volume));
        }
        self.bar
            .update(pointer, transport.current_time, transport.duration);
        actions
    }
}
