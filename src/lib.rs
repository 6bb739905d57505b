//! Audio-reactive line visualizer.
//!
//! - `effect`: beat-driven line emitter and decay model, host independent
//! - `analysis`: spectrum energy bands and beat detection
//! - `audio`: decoding, background loading and playback
//! - `ui`: transport widget state machines
//! - `visual`: nannou drawing of lines and widgets

pub mod analysis;
pub mod audio;
pub mod effect;
pub mod ui;
pub mod visual;
