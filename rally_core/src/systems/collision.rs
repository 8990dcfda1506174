use crate::bounds::{ball_box, paddle_box};
use crate::params::Params;
use crate::{Ball, Config, Paddle, PlayerId, RallyState};
use glam::Vec2;
use hecs::World;

/// Below this speed a velocity is treated as zero and never rescaled
const SPEED_EPSILON: f32 = 1e-6;

/// Collision context handed from physics to scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub player: PlayerId,
    pub pos: Vec2,
    /// Ball offset from paddle centre in paddle half-heights, roughly [-1, 1]
    pub hit_position: f32,
    pub time_since_last_hit_ms: u64,
    /// Rally length before this hit
    pub rally_count: u32,
}

/// Rescale `vel` so its length does not exceed `max`
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed <= SPEED_EPSILON || speed <= max {
        return vel;
    }
    vel * (max / speed)
}

/// Bounce the ball off `paddle` if their boxes overlap.
///
/// Only a ball travelling towards the paddle is reflected, so a ball still
/// inside the paddle on the next frame is not flipped back. Returns the hit
/// position on a bounce.
pub fn resolve_paddle_collision(ball: &mut Ball, paddle: &Paddle, config: &Config) -> Option<f32> {
    if !ball_box(ball, config).overlaps(&paddle_box(paddle, config)) {
        return None;
    }

    let approaching = match paddle.player_id {
        PlayerId::One => ball.vel.x < 0.0,
        PlayerId::Two => ball.vel.x > 0.0,
    };
    if !approaching {
        return None;
    }

    let hit_position = (ball.pos.y - paddle.pos.y) / config.paddle_half_height();

    ball.vel.x *= -Params::BALL_SPEED_GAIN;
    ball.vel.y += hit_position * config.ball_speed_initial * Params::BALL_DEFLECTION;
    ball.vel = clamp_speed(ball.vel, config.ball_speed_max);

    Some(hit_position)
}

/// Check the ball against both paddles; at most one hit is reported per frame
pub fn check_collisions(
    world: &mut World,
    config: &Config,
    rally: &RallyState,
    now_ms: u64,
) -> Option<PaddleHit> {
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for paddle in &paddles {
            if let Some(hit_position) = resolve_paddle_collision(ball, paddle, config) {
                return Some(PaddleHit {
                    player: paddle.player_id,
                    pos: ball.pos,
                    hit_position,
                    time_since_last_hit_ms: now_ms.saturating_sub(rally.last_hit_ms),
                    rally_count: rally.rally_count,
                });
            }
        }
    }
    None
}

/// Report which player scored if the ball crossed a goal line
pub fn check_goal(world: &World, config: &Config) -> Option<PlayerId> {
    let goal = config.goal_x();
    let mut query = world.query::<&Ball>();
    let (_e, ball) = query.iter().next()?;

    if ball.pos.x < -goal {
        Some(PlayerId::Two)
    } else if ball.pos.x > goal {
        Some(PlayerId::One)
    } else {
        None
    }
}
