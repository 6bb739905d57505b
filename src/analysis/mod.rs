pub mod analyzer;
pub mod beat;

pub use analyzer::SpectrumAnalyzer;
pub use beat::BeatDetector;
