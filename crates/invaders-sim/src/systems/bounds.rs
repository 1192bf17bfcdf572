//! Playfield limits for ships.

use hecs::World;

use invaders_core::components::{Boss, BossMotion, Enemy, Hitbox, Player};
use invaders_core::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use invaders_core::types::{Position, Velocity};

use crate::systems::boss_ai::constrain_boss;

pub fn run(world: &mut World, now_ms: f64) {
    for (_entity, (_player, pos, hitbox)) in
        world.query_mut::<(&Player, &mut Position, &Hitbox)>()
    {
        pos.x = pos
            .x
            .clamp(hitbox.half_width, WORLD_WIDTH - hitbox.half_width);
        pos.y = pos
            .y
            .clamp(hitbox.half_height, WORLD_HEIGHT - hitbox.half_height);
    }

    // Enemies enter from above and leave below, so only x is held.
    for (_entity, (enemy, pos, vel, hitbox)) in
        world.query_mut::<(&mut Enemy, &mut Position, &mut Velocity, &Hitbox)>()
    {
        if !enemy.active {
            continue;
        }
        let min_x = hitbox.half_width;
        let max_x = WORLD_WIDTH - hitbox.half_width;
        if pos.x < min_x {
            pos.x = min_x;
            if vel.x < 0.0 {
                vel.x = -vel.x;
                enemy.speed_x = vel.x;
            }
        } else if pos.x > max_x {
            pos.x = max_x;
            if vel.x > 0.0 {
                vel.x = -vel.x;
                enemy.speed_x = vel.x;
            }
        }
    }

    for (_entity, (boss, motion, pos, vel, hitbox)) in world.query_mut::<(
        &Boss,
        &mut BossMotion,
        &mut Position,
        &mut Velocity,
        &Hitbox,
    )>() {
        if boss.alive {
            constrain_boss(motion, pos, vel, hitbox, now_ms);
        }
    }
}
