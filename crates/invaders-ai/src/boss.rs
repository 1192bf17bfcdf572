//! Boss decision making.
//!
//! Pure functions over plain data. The sim owns the state and applies the
//! results; nothing here touches the ECS.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use invaders_core::constants::{BOSS_BAND_MARGIN, BOSS_MIN_Y, WORLD_HEIGHT, WORLD_WIDTH};
use invaders_core::types::{Position, Velocity};

use crate::profiles::BurstProfile;
use crate::random::{between, chance, float_between};

/// Step taken by the horizontal patrol toward its next target (px).
pub const PATROL_STEP: f64 = 100.0;

/// Inset of area patrol targets from the side walls (px).
pub const PATROL_WALL_INSET: f64 = 10.0;

/// Share of the screen width patrolled when the data gives no width.
pub const PATROL_AREA_WIDTH_SHARE: f64 = 0.7;

/// Share of the vertical band patrolled when the data gives no height.
pub const PATROL_AREA_HEIGHT_SHARE: f64 = 0.8;

/// Rectangle the boss centre must stay in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossArea {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BossArea {
    /// Area for a boss sprite of the given size: the full width and the
    /// upper band of the screen.
    pub fn for_size(width: f64, height: f64) -> Self {
        Self {
            min_x: width / 2.0,
            max_x: WORLD_WIDTH - width / 2.0,
            min_y: BOSS_MIN_Y,
            max_y: WORLD_HEIGHT / 2.0 - height / 2.0 - BOSS_BAND_MARGIN,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.min_y + (self.max_y - self.min_y) / 2.0
    }
}

/// What the boss knows about the world.
#[derive(Debug, Clone, Copy)]
pub struct BossContext {
    pub position: Position,
    /// Player position, if the player is alive.
    pub player: Option<Position>,
    pub area: BossArea,
}

/// A planned burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstPlan {
    /// Final heading after wall bounces (radians).
    pub angle: f64,
    pub velocity: Velocity,
    pub duration_ms: f64,
    /// The heading was reflected to keep the burst inside the area.
    pub bounced: bool,
}

/// Wrap an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Plan a burst: aim at the player or pick a random heading, then reflect
/// the heading off the area walls so the projected endpoint stays inside.
pub fn plan_burst<R: Rng + ?Sized>(ctx: &BossContext, burst: &BurstProfile, rng: &mut R) -> BurstPlan {
    let duration_ms = between(rng, burst.duration_min_ms, burst.duration_max_ms) as f64;
    let travel = burst.speed * duration_ms / 1000.0;

    let angle = match ctx.player {
        Some(player) if chance(rng, burst.target_player_chance) => ctx.position.angle_to(&player),
        _ => float_between(rng, 0.0, TAU),
    };

    let mut adjusted = angle;
    let mut bounced = false;

    let end_x = ctx.position.x + angle.cos() * travel;
    if end_x < ctx.area.min_x || end_x > ctx.area.max_x {
        adjusted = PI - angle;
        bounced = true;
    }
    adjusted = wrap_angle(adjusted);

    let end_y = ctx.position.y + adjusted.sin() * travel;
    if end_y < ctx.area.min_y || end_y > ctx.area.max_y {
        adjusted = -adjusted;
        bounced = true;
    }
    adjusted = wrap_angle(adjusted);

    BurstPlan {
        angle: adjusted,
        velocity: Velocity::from_angle(adjusted, burst.speed),
        duration_ms,
        bounced,
    }
}

/// Random point inside the patrol area, centred horizontally on the screen
/// and vertically on the boss band.
pub fn pick_patrol_target<R: Rng + ?Sized>(
    ctx: &BossContext,
    width: Option<f64>,
    height: Option<f64>,
    rng: &mut R,
) -> Position {
    let area = ctx.area;
    let width = width.unwrap_or(WORLD_WIDTH * PATROL_AREA_WIDTH_SHARE);
    let height = height.unwrap_or((area.max_y - area.min_y) * PATROL_AREA_HEIGHT_SHARE);

    let x = WORLD_WIDTH / 2.0 + float_between(rng, -width / 2.0, width / 2.0);
    let y = area.center_y() + float_between(rng, -height / 2.0, height / 2.0);

    let min_x = area.min_x + PATROL_WALL_INSET;
    let max_x = (area.max_x - PATROL_WALL_INSET).max(min_x);
    Position::new(
        x.clamp(min_x, max_x),
        y.clamp(area.min_y, area.max_y.max(area.min_y)),
    )
}

/// Next horizontal patrol waypoint. Returns the target and the (possibly
/// reversed) direction.
pub fn horizontal_patrol_target(
    ctx: &BossContext,
    origin_x: f64,
    direction: f64,
    distance: f64,
) -> (Position, f64) {
    let x = ctx.position.x;
    let half = distance / 2.0;
    let reverse = (direction > 0.0 && x >= origin_x + half)
        || (direction < 0.0 && x <= origin_x - half)
        || (direction < 0.0 && x <= ctx.area.min_x)
        || (direction > 0.0 && x >= ctx.area.max_x);
    let direction = if reverse { -direction } else { direction };
    (
        Position::new(x + direction * PATROL_STEP, ctx.position.y),
        direction,
    )
}

/// Whether a patrol target counts as reached this tick.
pub fn has_arrived(position: &Position, target: &Position, speed: f64, dt_ms: f64) -> bool {
    position.distance_to(target) < speed * (dt_ms / 1000.0) * 2.0
}

/// Clamp the boss into its area. Velocity pointing into a wall is reflected
/// at half strength. Returns true if any clamp happened.
pub fn constrain(position: &mut Position, velocity: &mut Velocity, area: &BossArea) -> bool {
    let mut constrained = false;
    if position.x < area.min_x {
        position.x = area.min_x;
        if velocity.x < 0.0 {
            velocity.x *= -0.5;
        }
        constrained = true;
    }
    if position.x > area.max_x {
        position.x = area.max_x;
        if velocity.x > 0.0 {
            velocity.x *= -0.5;
        }
        constrained = true;
    }
    if position.y < area.min_y {
        position.y = area.min_y;
        if velocity.y < 0.0 {
            velocity.y *= -0.5;
        }
        constrained = true;
    }
    if position.y > area.max_y {
        position.y = area.max_y;
        if velocity.y > 0.0 {
            velocity.y *= -0.5;
        }
        constrained = true;
    }
    constrained
}

/// Weighted pick among ready attacks, given as `(index, weight)` pairs.
/// Falls back to a uniform pick if rounding leaves the roll unspent.
pub fn select_attack<R: Rng + ?Sized>(ready: &[(usize, f64)], rng: &mut R) -> Option<usize> {
    if ready.is_empty() {
        return None;
    }
    let total: f64 = ready.iter().map(|(_, w)| *w).sum();
    let mut pick = rng.gen::<f64>() * total;
    for &(index, weight) in ready {
        pick -= weight;
        if pick <= 0.0 {
            return Some(index);
        }
    }
    let fallback = between(rng, 0, ready.len() as i64 - 1) as usize;
    ready.get(fallback).map(|(index, _)| *index)
}

/// Evenly spaced fan of `count` headings centred on `base` (radians).
pub fn spray_angles(base: f64, count: u32, spread_deg: f64) -> Vec<f64> {
    let spread = spread_deg.to_radians();
    let step = spread / (count.saturating_sub(1)).max(1) as f64;
    (0..count)
        .map(|i| base - spread / 2.0 + i as f64 * step)
        .collect()
}

/// Chance that a spontaneous burst starts during a tick of `dt_ms`.
pub fn burst_chance(chance_per_second: f64, dt_ms: f64) -> f64 {
    chance_per_second * (dt_ms / 1000.0)
}

/// First delay before the boss reconsiders its attack (ms).
pub fn initial_decision_cooldown<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    between(rng, 1500, 3000) as f64
}

/// Delay between later attack decisions (ms).
pub fn decision_cooldown<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    between(rng, 1500, 4000) as f64
}

/// Delay before the patrol picks a new waypoint (ms).
pub fn patrol_retarget_delay<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    between(rng, 2000, 4000) as f64
}

/// Heading of a barrage projectile: the aim plus up to 10 degrees of jitter.
pub fn barrage_angle<R: Rng + ?Sized>(aim: f64, rng: &mut R) -> f64 {
    aim + (between(rng, -10, 10) as f64).to_radians()
}

/// Horizontal offset of a barrage projectile's spawn point (px).
pub fn barrage_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    between(rng, -20, 20) as f64
}
