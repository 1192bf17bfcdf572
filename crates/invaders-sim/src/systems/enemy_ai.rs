//! Enemy behaviour: steering, shooting and bouncing around the patrol band.

use hecs::World;
use rand::Rng;

use invaders_ai::enemy::{
    aim_velocity, choose_horizontal_speed, shot_speed, vertical_bounce, wall_bounce, EnemyContext,
};
use invaders_core::components::{Enemy, EnemyTimers, Hitbox, StatusEffects};
use invaders_core::constants::{ENEMY_EXIT_MARGIN, WORLD_HEIGHT, WORLD_WIDTH};
use invaders_core::types::{Position, Velocity};

use crate::world_setup;

pub fn run<R: Rng + ?Sized>(world: &mut World, rng: &mut R, dt_ms: f64) {
    let player = world_setup::player_position(world);
    let mut shots: Vec<(Position, Velocity, f64)> = Vec::new();

    for (_entity, (enemy, timers, effects, pos, vel, hitbox)) in world.query_mut::<(
        &mut Enemy,
        &mut EnemyTimers,
        &StatusEffects,
        &Position,
        &mut Velocity,
        &Hitbox,
    )>() {
        if !enemy.active {
            continue;
        }
        if effects.is_stunned() {
            *vel = Velocity::zero();
            continue;
        }

        if timers.steer.advance(dt_ms) {
            let speed_x = choose_horizontal_speed(&context(enemy, pos, vel, player), rng);
            enemy.speed_x = speed_x;
            vel.x = speed_x;
        }

        if timers.shoot.advance(dt_ms) && !effects.is_silenced() {
            if let Some(target) = player {
                let muzzle = Position::new(pos.x, pos.y + hitbox.half_height);
                let velocity = aim_velocity(&muzzle, &target, shot_speed(rng));
                shots.push((muzzle, velocity, enemy.bullet_damage));
            }
        }

        if let Some(bounce) = vertical_bounce(&context(enemy, pos, vel, player), rng) {
            vel.y = bounce.velocity_y;
            if bounce.steer {
                let speed_x = choose_horizontal_speed(&context(enemy, pos, vel, player), rng);
                enemy.speed_x = speed_x;
                vel.x = speed_x;
            }
            if let Some(delay) = bounce.steer_delay_ms {
                timers.steer.reset(delay);
            }
        }

        if let Some(speed_x) = wall_bounce(
            pos.x,
            vel.x,
            enemy.speed_x,
            hitbox.half_width,
            WORLD_WIDTH - hitbox.half_width,
        ) {
            enemy.speed_x = speed_x;
            vel.x = speed_x;
        }

        if pos.y > WORLD_HEIGHT + hitbox.height() + ENEMY_EXIT_MARGIN {
            enemy.active = false;
        }
    }

    for (at, velocity, damage) in shots {
        world_setup::spawn_enemy_bullet(world, at, velocity, damage);
    }
}

fn context(enemy: &Enemy, pos: &Position, vel: &Velocity, player: Option<Position>) -> EnemyContext {
    EnemyContext {
        position: *pos,
        velocity: *vel,
        speed_y: enemy.speed_y,
        speed_x_range: enemy.speed_x_range,
        min_y: enemy.min_y,
        max_y: enemy.max_y,
        player,
    }
}
