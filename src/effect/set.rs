use rand::Rng;

use super::emitter::Emitter;
use super::frame::BeatFrame;
use super::line::Line;

/// What one call to [`ActiveLineSet::advance`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: usize,
    pub retired: usize,
}

/// Lines currently animating, in spawn order.
#[derive(Clone, Debug, Default)]
pub struct ActiveLineSet {
    lines: Vec<Line>,
    emitter: Emitter,
}

impl ActiveLineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame of the effect.
    ///
    /// Lines that faded out last frame were drawn once more and are dropped
    /// first; the survivors are stepped, then the beat's burst is appended.
    pub fn advance<R: Rng + ?Sized>(&mut self, frame: &BeatFrame, rng: &mut R) -> FrameReport {
        let before = self.lines.len();
        self.lines.retain(|l| !l.is_expired());
        let retired = before - self.lines.len();

        for line in &mut self.lines {
            line.step(frame.beat, rng);
        }

        let burst = self.emitter.emit(frame, rng);
        let spawned = burst.len();
        self.lines.extend(burst);

        FrameReport { spawned, retired }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
