use nannou::prelude::Vec2;

// edges inclusive
fn in_square(center: Vec2, size: f32, p: Vec2) -> bool {
    let half = size * 0.5;
    p.x >= center.x - half && p.x <= center.x + half && p.y >= center.y - half && p.y <= center.y + half
}

/// Play/pause toggle. Shows a triangle while paused, two bars while playing.
#[derive(Clone, Debug)]
pub struct PlayButton {
    pub position: Vec2,
    pub size: f32,
    pub paused: bool,
}

impl PlayButton {
    pub const SIZE: f32 = 36.0;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: Self::SIZE,
            paused: false,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        in_square(self.position, self.size, p)
    }
}

#[derive(Clone, Debug)]
pub struct StopButton {
    pub position: Vec2,
    pub size: f32,
}

impl StopButton {
    pub const SIZE: f32 = 24.0;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: Self::SIZE,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        in_square(self.position, self.size, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    #[test]
    fn hit_test_includes_edges() {
        let b = PlayButton::new(vec2(100.0, 100.0));
        assert!(b.contains(vec2(100.0, 100.0)));
        assert!(b.contains(vec2(82.0, 118.0)));
        assert!(!b.contains(vec2(81.9, 100.0)));
        assert!(!b.contains(vec2(100.0, 118.1)));

        let s = StopButton::new(vec2(10.0, 10.0));
        assert!(s.contains(vec2(22.0, -2.0)));
        assert!(!s.contains(vec2(23.0, 10.0)));
    }
}
