use glam::Vec2;

use crate::{Ball, Config, Paddle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only touch do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Square hitbox around the ball
pub fn ball_box(ball: &Ball, config: &Config) -> Aabb {
    Aabb::from_center_size(ball.pos, Vec2::splat(config.ball_size))
}

/// Rectangle covered by a paddle
pub fn paddle_box(paddle: &Paddle, config: &Config) -> Aabb {
    Aabb::from_center_size(
        paddle.pos,
        Vec2::new(config.paddle_width, config.paddle_height),
    )
}
