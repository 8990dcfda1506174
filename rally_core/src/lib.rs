pub mod ai;
pub mod bounds;
pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod state;
pub mod systems;

pub use ai::*;
pub use components::*;
pub use config::*;
pub use error::ConfigError;
pub use game::GameWorld;
pub use params::*;
pub use resources::*;
pub use snapshot::Snapshot;
pub use state::*;
pub use systems::*;

use hecs::World;

/// Helper to create a paddle entity at its side's X, centred vertically
pub fn create_paddle(world: &mut World, player: PlayerId, config: &Config) -> hecs::Entity {
    let pos = glam::Vec2::new(config.paddle_x(player), 0.0);
    world.spawn((Paddle::new(player, pos), Steer::hold()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}
