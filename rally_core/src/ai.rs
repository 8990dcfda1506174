//! CPU opponents.
//!
//! The default [`TrackingCpu`] is a deliberately naive reactive controller:
//! it chases the ball's current height and never predicts where the ball
//! will cross its goal line. Harder opponents can be plugged in through
//! [`PaddlePolicy`] without touching collision or scoring.

use hecs::World;

use crate::params::Params;
use crate::{Ball, Config, Paddle, PlayerId, Steer};

/// Decides how a computer-controlled paddle moves each frame
pub trait PaddlePolicy {
    fn steer(&mut self, ball: &Ball, paddle: &Paddle, config: &Config) -> Steer;
}

/// Follows the ball's Y at a fraction of paddle speed, holding still inside
/// a dead zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingCpu {
    pub speed_factor: f32,
    pub tolerance: f32,
}

impl Default for TrackingCpu {
    fn default() -> Self {
        Self {
            speed_factor: Params::CPU_SPEED_FACTOR,
            tolerance: Params::CPU_TOLERANCE,
        }
    }
}

impl PaddlePolicy for TrackingCpu {
    fn steer(&mut self, ball: &Ball, paddle: &Paddle, config: &Config) -> Steer {
        let target = ball.pos.y;
        let speed = config.paddle_speed * self.speed_factor;

        let dir = if paddle.pos.y < target - self.tolerance {
            1
        } else if paddle.pos.y > target + self.tolerance {
            -1
        } else {
            0
        };

        Steer {
            dir,
            speed,
            boost: false,
        }
    }
}

/// Let `policy` steer `player`'s paddle this frame
pub fn drive_cpu(world: &mut World, player: PlayerId, policy: &mut dyn PaddlePolicy, config: &Config) {
    let ball = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => *ball,
        None => return,
    };

    for (_entity, (paddle, steer)) in world.query_mut::<(&Paddle, &mut Steer)>() {
        if paddle.player_id == player {
            *steer = policy.steer(&ball, paddle, config);
        }
    }
}
