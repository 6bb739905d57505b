pub mod loader;
pub mod player;
pub mod track;

pub use loader::Loader;
pub use player::Player;
pub use track::{AudioData, is_supported};
