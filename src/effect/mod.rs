//! Beat-driven line effect: a burst emitter and the per-line decay model.
//!
//! Nothing here touches audio or the window. The host hands in a
//! [`BeatFrame`] and a random source every frame and draws [`ActiveLineSet::lines`].

pub mod emitter;
pub mod frame;
pub mod line;
pub mod point;
pub mod set;

pub use emitter::Emitter;
pub use frame::{BeatFrame, Canvas, EnergyBands, map_range};
pub use line::{Line, Rgba};
pub use point::Point;
pub use set::{ActiveLineSet, FrameReport};
