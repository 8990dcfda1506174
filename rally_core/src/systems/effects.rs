use glam::Vec2;
use hecs::World;
use rand::Rng;

use crate::params::Params;
use crate::{GameRng, Lifetime, Particle};

/// Spawn a burst of particles scattered around `pos`
pub fn spawn_burst(world: &mut World, rng: &mut GameRng, pos: Vec2, color: u32) {
    let spread = Params::BURST_SPREAD / 2.0;
    let speed = Params::BURST_SPEED / 2.0;

    for _ in 0..Params::BURST_PARTICLES {
        let offset = Vec2::new(
            rng.0.gen_range(-spread..spread),
            rng.0.gen_range(-spread..spread),
        );
        let vel = Vec2::new(
            rng.0.gen_range(-speed..speed),
            rng.0.gen_range(-speed..speed),
        );
        world.spawn((
            Particle {
                pos: pos + offset,
                vel,
                color,
                opacity: Params::PARTICLE_OPACITY,
            },
            Lifetime::new(Params::PARTICLE_LIFE),
        ));
    }
}

/// Drift and fade particles, then despawn the spent ones
pub fn update_particles(world: &mut World) {
    let mut to_remove = Vec::new();

    for (entity, (particle, lifetime)) in world.query_mut::<(&mut Particle, &mut Lifetime)>() {
        particle.pos += particle.vel;
        particle.opacity *= Params::PARTICLE_FADE;
        lifetime.frames_left = lifetime.frames_left.saturating_sub(1);

        if lifetime.is_expired() || particle.opacity < Params::PARTICLE_MIN_OPACITY {
            to_remove.push(entity);
        }
    }

    for entity in to_remove {
        let _ = world.despawn(entity);
    }
}

/// Copy out the live particles for drawing
pub fn collect_particles(world: &World) -> Vec<Particle> {
    world
        .query::<&Particle>()
        .iter()
        .map(|(_e, particle)| *particle)
        .collect()
}
