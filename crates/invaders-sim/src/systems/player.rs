//! Player control: movement from held keys, shooting and skill triggers.

use hecs::{Entity, World};

use invaders_core::commands::InputState;
use invaders_core::components::{Hitbox, Player, SkillBook};
use invaders_core::constants::{PLAYER_BOTTOM_GAP, WORLD_HEIGHT};
use invaders_core::types::{Position, Velocity};

use crate::world_setup;

pub fn run(world: &mut World, input: &InputState, now_ms: f64) {
    let mut shot: Option<(Entity, Position, f64)> = None;

    for (entity, (player, book, pos, vel, hitbox)) in world.query_mut::<(
        &mut Player,
        &mut SkillBook,
        &mut Position,
        &mut Velocity,
        &Hitbox,
    )>() {
        if !player.active {
            *vel = Velocity::zero();
            continue;
        }

        // A dash keeps the velocity it was given.
        if !player.dashing {
            steer(player, pos, vel, hitbox, input);
        }

        let off_cooldown = player
            .last_shot_ms
            .map_or(true, |last| now_ms > last + player.shoot_cooldown_ms);
        if input.shoot && off_cooldown {
            let muzzle = Position::new(pos.x, pos.y - hitbox.half_height);
            shot = Some((entity, muzzle, player.bullet_damage));
        }

        for (slot, skill) in book.slots.iter_mut().enumerate() {
            let held = input.skills.get(slot).copied().unwrap_or(false);
            if held && skill.is_ready(now_ms) {
                skill.pending = true;
            }
        }
    }

    if let Some((entity, muzzle, damage)) = shot {
        if world_setup::spawn_player_bullet(world, muzzle, damage).is_some() {
            if let Ok(player) = world.query_one_mut::<&mut Player>(entity) {
                player.last_shot_ms = Some(now_ms);
            }
        }
    }
}

/// Velocity from the arrow keys. Upward movement stops at the middle of the
/// screen; downward movement stops just above the bottom edge.
fn steer(player: &Player, pos: &mut Position, vel: &mut Velocity, hitbox: &Hitbox, input: &InputState) {
    let half_h = hitbox.half_height;

    vel.x = if input.left {
        -player.speed
    } else if input.right {
        player.speed
    } else {
        0.0
    };

    vel.y = 0.0;
    if input.up {
        let upper = WORLD_HEIGHT / 2.0;
        if pos.y - half_h > upper {
            vel.y = -player.speed;
        } else {
            pos.y = upper + half_h;
        }
    } else if input.down {
        let lower = WORLD_HEIGHT - PLAYER_BOTTOM_GAP;
        if pos.y + half_h < lower {
            vel.y = player.speed;
        } else {
            pos.y = lower - half_h;
        }
    }
}
