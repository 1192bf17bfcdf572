//! Enemy steering and shooting decisions.

use rand::Rng;

use invaders_core::constants::{ENEMY_BULLET_SPEED, ENEMY_BULLET_SPEED_JITTER};
use invaders_core::types::{Position, Velocity};

use crate::random::{between, chance, float_between, sign};

/// Chance that a steering change homes in on the player.
pub const HOMING_CHANCE: f64 = 0.6;

/// The player must be at least this far below to be chased (px).
pub const HOMING_MIN_GAP: f64 = 50.0;

/// Horizontal dead zone around the player (px).
pub const HOMING_DEAD_ZONE: f64 = 10.0;

/// Homing speed range when the archetype has no speedXRange.
pub const HOMING_SPEED: (i64, i64) = (40, 80);

/// Wander speed range.
pub const WANDER_SPEED: (i64, i64) = (50, 100);

/// Upward speed after bouncing off the low band, as a share of speedY.
pub const RISE_FACTOR: (f64, f64) = (0.4, 0.7);

/// Steering timer delay after a bounce (ms).
pub const BOUNCE_STEER_DELAY_MS: (i64, i64) = (300, 1000);

/// Steering timer delay at spawn (ms).
pub const SPAWN_STEER_DELAY_MS: (i64, i64) = (1000, 2500);

/// Shoot delay jitter around the cooldown (ms).
pub const SHOOT_DELAY_JITTER_MS: i64 = 500;

/// What an enemy knows when it steers.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub position: Position,
    pub velocity: Velocity,
    pub speed_y: f64,
    pub speed_x_range: Option<[i64; 2]>,
    pub min_y: f64,
    pub max_y: f64,
    /// Player position, if the player is alive.
    pub player: Option<Position>,
}

/// Result of hitting the top or bottom of the patrol band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBounce {
    pub velocity_y: f64,
    /// Pick a new horizontal speed now.
    pub steer: bool,
    /// Restart the steering timer with this delay.
    pub steer_delay_ms: Option<f64>,
}

/// New horizontal speed: sometimes chase the player, otherwise wander.
pub fn choose_horizontal_speed<R: Rng + ?Sized>(ctx: &EnemyContext, rng: &mut R) -> f64 {
    let homing = chance(rng, HOMING_CHANCE);
    match ctx.player {
        Some(player) if homing && ctx.position.y < player.y - HOMING_MIN_GAP => {
            let (lo, hi) = ctx.speed_x_range.map_or(HOMING_SPEED, |[lo, hi]| (lo, hi));
            if player.x < ctx.position.x - HOMING_DEAD_ZONE {
                -(between(rng, lo, hi) as f64)
            } else if player.x > ctx.position.x + HOMING_DEAD_ZONE {
                between(rng, lo, hi) as f64
            } else {
                0.0
            }
        }
        _ => between(rng, WANDER_SPEED.0, WANDER_SPEED.1) as f64 * sign(rng),
    }
}

/// Reverse vertical direction at the edges of the patrol band.
pub fn vertical_bounce<R: Rng + ?Sized>(ctx: &EnemyContext, rng: &mut R) -> Option<VerticalBounce> {
    if ctx.position.y >= ctx.max_y && ctx.velocity.y > 0.0 {
        let factor = float_between(rng, RISE_FACTOR.0, RISE_FACTOR.1);
        let delay = between(rng, BOUNCE_STEER_DELAY_MS.0, BOUNCE_STEER_DELAY_MS.1) as f64;
        Some(VerticalBounce {
            velocity_y: -ctx.speed_y.abs() * factor,
            steer: true,
            steer_delay_ms: Some(delay),
        })
    } else if ctx.position.y <= ctx.min_y && ctx.velocity.y < 0.0 {
        Some(VerticalBounce {
            velocity_y: ctx.speed_y.abs(),
            steer: false,
            steer_delay_ms: None,
        })
    } else {
        None
    }
}

/// Horizontal speed after touching a side wall, if the enemy is pushing
/// into it.
pub fn wall_bounce(x: f64, velocity_x: f64, speed_x: f64, min_x: f64, max_x: f64) -> Option<f64> {
    let magnitude = if speed_x == 0.0 { 50.0 } else { speed_x.abs() };
    if x <= min_x && velocity_x < 0.0 {
        Some(magnitude)
    } else if x >= max_x && velocity_x > 0.0 {
        Some(-magnitude)
    } else {
        None
    }
}

/// Velocity of magnitude `speed` from `from` toward `to`.
pub fn aim_velocity(from: &Position, to: &Position, speed: f64) -> Velocity {
    Velocity::from_angle(from.angle_to(to), speed)
}

/// Speed of an enemy bullet, with jitter.
pub fn shot_speed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    ENEMY_BULLET_SPEED + between(rng, -ENEMY_BULLET_SPEED_JITTER, ENEMY_BULLET_SPEED_JITTER) as f64
}

/// Shoot timer delay: the cooldown plus up to `jitter` ms either way.
pub fn shoot_delay<R: Rng + ?Sized>(cooldown_ms: f64, jitter: i64, rng: &mut R) -> f64 {
    cooldown_ms + between(rng, -jitter, jitter) as f64
}

pub fn spawn_steer_delay<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    between(rng, SPAWN_STEER_DELAY_MS.0, SPAWN_STEER_DELAY_MS.1) as f64
}
