use glam::Vec2;
use serde::Serialize;

use crate::params::{Params, Scoring};

/// Which side a paddle (and its stats) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerId {
    /// Left paddle, W/S keys
    One,
    /// Right paddle, arrow keys or the CPU
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Effect color used for this player's hits and goals
    pub fn color(self) -> u32 {
        match self {
            PlayerId::One => Params::PLAYER_ONE_COLOR,
            PlayerId::Two => Params::PLAYER_TWO_COLOR,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paddle {
    pub player_id: PlayerId,
    pub pos: Vec2, // x is fixed per side, y clamped to the field
    pub boosting: bool,
}

impl Paddle {
    pub fn new(player_id: PlayerId, pos: Vec2) -> Self {
        Self {
            player_id,
            pos,
            boosting: false,
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2, // units per frame
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Park the ball at the centre spot
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::ZERO;
    }

    /// Serve from the current position at `speed`, up to 45° off horizontal,
    /// towards a random side
    pub fn launch(&mut self, speed: f32, rng: &mut crate::GameRng) {
        use rand::Rng;
        let spread = Params::BALL_LAUNCH_SPREAD;
        let angle: f32 = rng.0.gen_range(-spread..=spread);
        let dir = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };

        self.vel = Vec2::new(angle.cos() * dir, angle.sin()) * speed;
    }
}

/// Movement intent for a human paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub dir: i8, // 1 = up, 0 = stop, -1 = down
    pub boost: bool,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up(boost: bool) -> Self {
        Self { dir: 1, boost }
    }

    pub fn down(boost: bool) -> Self {
        Self { dir: -1, boost }
    }

    /// Resolve to a concrete step using the configured paddle speeds
    pub fn steer(&self, config: &crate::Config) -> Steer {
        let speed = if self.boost {
            config.paddle_boost_speed
        } else {
            config.paddle_speed
        };
        Steer {
            dir: self.dir.signum(),
            speed,
            boost: self.boost && self.dir != 0,
        }
    }
}

/// One frame of paddle motion: direction and distance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steer {
    pub dir: i8,
    pub speed: f32,
    pub boost: bool,
}

impl Steer {
    pub fn hold() -> Self {
        Self::default()
    }
}

/// Per-player scoring state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerStats {
    pub score: u32,       // goals won
    pub total_score: u32, // points, compared against the win score
    pub rally_bonus: u32,
    pub speed_bonus: u32,
    pub streak: u32,
    pub multiplier: f64,
    pub last_hit_ms: u64,
    pub consecutive_hits: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            score: 0,
            total_score: 0,
            rally_bonus: 0,
            speed_bonus: 0,
            streak: 0,
            multiplier: 1.0,
            last_hit_ms: 0,
            consecutive_hits: 0,
        }
    }
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the hit streak back to baseline
    pub fn break_streak(&mut self) {
        self.consecutive_hits = 0;
        self.multiplier = 1.0;
    }

    pub fn multiplier_for(consecutive_hits: u32) -> f64 {
        (1.0 + consecutive_hits as f64 * Scoring::STREAK_MULTIPLIER).min(Scoring::MAX_MULTIPLIER)
    }
}

/// Effect particle spawned by bounces, hits and goals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub opacity: f32,
}

/// Frames left before an entity is despawned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    pub frames_left: u32,
}

impl Lifetime {
    pub fn new(frames_left: u32) -> Self {
        Self { frames_left }
    }

    pub fn is_expired(&self) -> bool {
        self.frames_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    #[test]
    fn test_launch_uses_requested_speed() {
        let mut rng = GameRng::new(7);
        for _ in 0..50 {
            let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO);
            ball.launch(0.6, &mut rng);
            assert!((ball.speed() - 0.6).abs() < 1e-5);
        }
    }

    #[test]
    fn test_launch_stays_within_45_degrees() {
        let mut rng = GameRng::new(99);
        for _ in 0..200 {
            let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO);
            ball.launch(1.0, &mut rng);
            assert!(ball.vel.x.abs() >= ball.vel.y.abs() - 1e-5);
        }
    }

    #[test]
    fn test_launch_serves_both_sides() {
        let mut rng = GameRng::new(3);
        let mut left = false;
        let mut right = false;
        for _ in 0..100 {
            let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO);
            ball.launch(0.6, &mut rng);
            left |= ball.vel.x < 0.0;
            right |= ball.vel.x > 0.0;
        }
        assert!(left && right);
    }

    #[test]
    fn test_multiplier_caps() {
        assert_eq!(PlayerStats::multiplier_for(0), 1.0);
        assert!((PlayerStats::multiplier_for(5) - 1.5).abs() < 1e-9);
        assert_eq!(PlayerStats::multiplier_for(40), 5.0);
        assert_eq!(PlayerStats::multiplier_for(1000), 5.0);
    }

    #[test]
    fn test_intent_steer_picks_speed() {
        let config = crate::Config::new();
        let normal = PaddleIntent::up(false).steer(&config);
        assert_eq!(normal.dir, 1);
        assert_eq!(normal.speed, config.paddle_speed);
        assert!(!normal.boost);

        let boosted = PaddleIntent::down(true).steer(&config);
        assert_eq!(boosted.dir, -1);
        assert_eq!(boosted.speed, config.paddle_boost_speed);
        assert!(boosted.boost);
    }
}
