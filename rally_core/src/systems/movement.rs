use crate::{Ball, Config, Events, GameEvent, Paddle, PaddleIntent, Steer};
use glam::Vec2;
use hecs::World;

/// Move a paddle one frame along Y, then clamp it to the field
pub fn nudge_paddle(paddle: &mut Paddle, steer: Steer, config: &Config) {
    paddle.boosting = steer.boost;
    if steer.dir != 0 {
        paddle.pos.y += steer.dir as f32 * steer.speed;
        paddle.pos.y = config.clamp_paddle_y(paddle.pos.y);
    }
}

/// Apply a human intent: base speed, or boost speed while boosting
pub fn advance_paddle(paddle: &mut Paddle, intent: &PaddleIntent, config: &Config) {
    nudge_paddle(paddle, intent.steer(config), config);
}

/// Integrate the ball one frame and reflect it off the top and bottom borders.
///
/// Velocity is in units per frame, so no delta time is applied. Returns true
/// when the ball bounced.
pub fn advance_ball(ball: &mut Ball, config: &Config) -> bool {
    ball.pos += ball.vel;

    let wall = config.wall_y();
    if ball.pos.y >= wall {
        ball.pos.y = wall;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else if ball.pos.y <= -wall {
        ball.pos.y = -wall;
        ball.vel.y = ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Apply each paddle's steer for this frame
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_entity, (paddle, steer)) in world.query_mut::<(&mut Paddle, &Steer)>() {
        nudge_paddle(paddle, *steer, config);
    }
}

/// Move ball based on velocity, reporting wall bounces.
///
/// Returns where the ball bounced, if it did.
pub fn move_ball(world: &mut World, config: &Config, events: &mut Events) -> Option<Vec2> {
    let mut bounce = None;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if advance_ball(ball, config) {
            events.push(GameEvent::WallBounce { pos: ball.pos });
            bounce = Some(ball.pos);
        }
    }
    bounce
}
