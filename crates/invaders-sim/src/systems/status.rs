//! Enemy status effects: stun, silence, fire-rate buffs and DoTs.
//!
//! The apply functions are called by skills; `run` counts the effects down
//! every tick and undoes them when they run out.

use hecs::World;
use rand::Rng;
use tracing::debug;

use invaders_ai::enemy::SHOOT_DELAY_JITTER_MS;
use invaders_ai::random::between;
use invaders_core::components::{DotEffect, Enemy, EnemyTimers, StatusEffects};
use invaders_core::types::{Countdown, Velocity};

use crate::scoring::{KillCause, KillRecord};
use crate::systems::combat::hit_enemy;

/// Stun an enemy: it stops moving and every timer freezes. A stun on an
/// already stunned enemy replaces the remaining time.
///
/// Enraged and inactive enemies are immune. Returns whether the stun landed.
pub fn stun(
    enemy: &Enemy,
    effects: &mut StatusEffects,
    timers: &mut EnemyTimers,
    velocity: &mut Velocity,
    duration_ms: f64,
) -> bool {
    if !enemy.active || enemy.enraged {
        return false;
    }
    *velocity = Velocity::zero();
    timers.shoot.paused = true;
    timers.steer.paused = true;
    if let Some(silence) = effects.silence.as_mut() {
        silence.paused = true;
    }
    if let Some(buff) = effects.fire_rate_buff.as_mut() {
        buff.paused = true;
    }
    effects.stun = Some(Countdown::new(duration_ms));
    true
}

/// Silence an enemy: its shoot timer stops until the silence ends.
pub fn silence(
    enemy: &Enemy,
    effects: &mut StatusEffects,
    timers: &mut EnemyTimers,
    duration_ms: f64,
) -> bool {
    if !enemy.active || enemy.enraged {
        return false;
    }
    timers.shoot.paused = true;
    effects.silence = Some(Countdown::new(duration_ms));
    true
}

/// Divide the enemy's shoot cooldown by `multiplier` and restart the shoot
/// timer around the new cooldown. `None` keeps the change for good.
pub fn apply_fire_rate_buff<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    effects: &mut StatusEffects,
    timers: &mut EnemyTimers,
    multiplier: f64,
    duration_ms: Option<f64>,
    jitter_ms: i64,
    rng: &mut R,
) {
    if multiplier <= 0.0 {
        return;
    }
    enemy.shoot_cooldown_ms = enemy.original_shoot_cooldown_ms / multiplier;
    let paused = timers.shoot.paused;
    timers
        .shoot
        .reset(enemy.shoot_cooldown_ms + between(rng, -jitter_ms, jitter_ms) as f64);
    timers.shoot.paused = paused;
    effects.fire_rate_buff = duration_ms.map(Countdown::new);
}

pub fn apply_dot(effects: &mut StatusEffects, dot: DotEffect) {
    effects.dots.push(dot);
}

/// Count down every enemy's effects. DoT kills are pushed to `kills`.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    now_ms: f64,
    dt_ms: f64,
    kills: &mut Vec<KillRecord>,
) {
    for (entity, (enemy, effects, timers, velocity)) in world.query_mut::<(
        &mut Enemy,
        &mut StatusEffects,
        &mut EnemyTimers,
        &mut Velocity,
    )>() {
        if !enemy.active {
            continue;
        }

        if effects.stun.as_mut().is_some_and(|s| s.advance(dt_ms)) {
            effects.stun = None;
            *velocity = Velocity::new(enemy.speed_x, enemy.speed_y);
            if !effects.is_silenced() {
                timers.shoot.paused = false;
            }
            timers.steer.paused = false;
            if let Some(silence) = effects.silence.as_mut() {
                silence.paused = false;
            }
            if let Some(buff) = effects.fire_rate_buff.as_mut() {
                buff.paused = false;
            }
            debug!(?entity, "stun ended");
        }

        if effects.silence.as_mut().is_some_and(|s| s.advance(dt_ms)) {
            effects.silence = None;
            if !effects.is_stunned() {
                timers.shoot.paused = false;
            }
            debug!(?entity, "silence ended");
        }

        if effects
            .fire_rate_buff
            .as_mut()
            .is_some_and(|b| b.advance(dt_ms))
        {
            effects.fire_rate_buff = None;
            enemy.shoot_cooldown_ms = enemy.original_shoot_cooldown_ms;
            let paused = timers.shoot.paused;
            timers.shoot.reset(
                enemy.shoot_cooldown_ms
                    + between(rng, -SHOOT_DELAY_JITTER_MS, SHOOT_DELAY_JITTER_MS) as f64,
            );
            timers.shoot.paused = paused;
        }

        effects.dots.retain(|dot| !dot.has_expired(now_ms));
        let mut dot_damage = 0.0;
        for dot in effects.dots.iter_mut() {
            if now_ms > dot.last_tick_ms + dot.tick_interval_ms() {
                dot.last_tick_ms = now_ms;
                dot_damage += dot.damage;
            }
        }
        if dot_damage > 0.0 && hit_enemy(enemy, dot_damage) {
            effects.dots.clear();
            kills.push(KillRecord {
                enemy_type: enemy.enemy_type.clone(),
                score_value: enemy.score_value,
                cause: KillCause::Dot,
            });
        }
    }
}
