use nannou::prelude::Vec2;

/// One end of a line, moved with explicit Euler steps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Point {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn step(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
    }
}
