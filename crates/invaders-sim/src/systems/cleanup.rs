//! Cleanup system: removes dead ships and spent or stray projectiles.

use hecs::{Entity, World};

use invaders_core::components::{Boss, Enemy, Hitbox, Projectile};
use invaders_core::constants::{OFFSCREEN_MARGIN, WORLD_HEIGHT, WORLD_WIDTH};
use invaders_core::enums::ProjectileKind;
use invaders_core::types::Position;

/// Despawn inactive enemies, dead bosses, consumed projectiles and
/// projectiles that left the playfield. Uses a caller-owned buffer to avoid
/// per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if !enemy.active {
            despawn_buffer.push(entity);
        }
    }

    for (entity, boss) in world.query_mut::<&Boss>() {
        if !boss.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (projectile, pos, hitbox)) in
        world.query_mut::<(&Projectile, &Position, &Hitbox)>()
    {
        let spent_upward =
            projectile.kind == ProjectileKind::PlayerShot && pos.y < -hitbox.height();
        if projectile.consumed || spent_upward || is_offscreen(pos) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn is_offscreen(pos: &Position) -> bool {
    pos.x < -OFFSCREEN_MARGIN
        || pos.x > WORLD_WIDTH + OFFSCREEN_MARGIN
        || pos.y < -OFFSCREEN_MARGIN
        || pos.y > WORLD_HEIGHT + OFFSCREEN_MARGIN
}
