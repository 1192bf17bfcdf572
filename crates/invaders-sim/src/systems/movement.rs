//! Kinematic integration: position += velocity * dt.

use hecs::World;

use invaders_core::constants::DT;
use invaders_core::types::{Position, Velocity};

/// Integrate every entity with a position and a velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        *pos = Position::from_vec(pos.as_vec() + vel.as_vec() * DT);
    }
}
