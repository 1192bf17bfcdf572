//! Boss behaviour: the movement state machine and attack decisions.
//!
//! Decisions come from `invaders_ai::boss`; this system owns the state in
//! `BossMotion` and `AttackState` and turns chosen attacks into projectiles.
//! Barrage volleys are spread over time through the timeline.

use std::f64::consts::FRAC_PI_2;

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use invaders_ai::boss::*;
use invaders_ai::profiles::{AttackPattern, BossProfile, BurstProfile, MovementPattern};
use invaders_ai::random::chance;
use invaders_core::components::{AttackState, Boss, BossMotion, Hitbox};
use invaders_core::events::GameEvent;
use invaders_core::types::{Position, Velocity};

use crate::timeline::{ScheduledAction, Timeline};
use crate::world_setup;

pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    timeline: &mut Timeline,
    events: &mut Vec<GameEvent>,
    now_ms: f64,
    dt_ms: f64,
) {
    let player = world_setup::player_position(world);
    let mut chosen: Vec<(Entity, usize)> = Vec::new();

    for (entity, (boss, profile, motion, attacks, pos, vel, hitbox)) in world.query_mut::<(
        &Boss,
        &BossProfile,
        &mut BossMotion,
        &mut AttackState,
        &Position,
        &mut Velocity,
        &Hitbox,
    )>() {
        if !boss.alive {
            *vel = Velocity::zero();
            continue;
        }

        let ctx = BossContext {
            position: *pos,
            player,
            area: world_setup::boss_area(hitbox),
        };
        update_movement(profile, motion, &ctx, vel, rng, now_ms, dt_ms);

        if now_ms > attacks.next_decision_ms {
            if let Some(index) = decide(profile, attacks, rng, now_ms) {
                if let Some(slot) = attacks.last_used_ms.get_mut(index) {
                    *slot = Some(now_ms);
                }
                chosen.push((entity, index));
            }
            attacks.next_decision_ms = now_ms + attacks.decision_cooldown_ms;
            attacks.decision_cooldown_ms = decision_cooldown(rng);
        }
    }

    for (entity, index) in chosen {
        perform(world, timeline, events, entity, index, player, now_ms);
    }
}

fn update_movement<R: Rng + ?Sized>(
    profile: &BossProfile,
    motion: &mut BossMotion,
    ctx: &BossContext,
    vel: &mut Velocity,
    rng: &mut R,
    now_ms: f64,
    dt_ms: f64,
) {
    let movement = &profile.movement;
    if movement.kind.is_none() {
        *vel = Velocity::zero();
        return;
    }

    if motion.bursting {
        if now_ms > motion.burst_end_ms {
            motion.bursting = false;
            *vel = Velocity::zero();
            motion.next_patrol_ms = now_ms;
        }
        return;
    }

    if let Some(burst) = &movement.spontaneous_burst {
        if now_ms > motion.last_burst_ms + burst.cooldown_ms
            && chance(rng, burst_chance(burst.chance_per_second, dt_ms))
        {
            start_burst(motion, ctx, burst, vel, rng, now_ms);
            return;
        }
    }

    match movement.pattern {
        MovementPattern::AreaPatrol { width, height } => {
            if now_ms > motion.next_patrol_ms {
                motion.patrol_target = pick_patrol_target(ctx, width, height, rng);
                motion.next_patrol_ms = now_ms + patrol_retarget_delay(rng);
            }
            patrol_step(motion, ctx, vel, movement.base_speed, now_ms, dt_ms);
        }
        MovementPattern::HorizontalPatrol { distance } => {
            if now_ms > motion.next_patrol_ms {
                let (target, direction) = horizontal_patrol_target(
                    ctx,
                    motion.patrol_origin_x,
                    motion.patrol_direction,
                    distance,
                );
                motion.patrol_target = target;
                motion.patrol_direction = direction;
                motion.next_patrol_ms = now_ms + patrol_retarget_delay(rng);
            }
            patrol_step(motion, ctx, vel, movement.base_speed, now_ms, dt_ms);
        }
        MovementPattern::RandomBurst { burst, pause_ms } => {
            if now_ms > motion.next_move_ms && vel.is_zero() {
                start_burst(motion, ctx, &burst, vel, rng, now_ms);
                motion.next_move_ms = motion.burst_end_ms + pause_ms;
            }
        }
        MovementPattern::Still => *vel = Velocity::zero(),
    }
}

/// Head for the patrol target; stop and retarget on arrival.
fn patrol_step(
    motion: &mut BossMotion,
    ctx: &BossContext,
    vel: &mut Velocity,
    speed: f64,
    now_ms: f64,
    dt_ms: f64,
) {
    let target = motion.patrol_target;
    *vel = if ctx.position.distance_to(&target) > 0.0 {
        Velocity::from_angle(ctx.position.angle_to(&target), speed)
    } else {
        Velocity::zero()
    };
    if has_arrived(&ctx.position, &target, speed, dt_ms) {
        *vel = Velocity::zero();
        motion.next_patrol_ms = now_ms;
    }
}

fn start_burst<R: Rng + ?Sized>(
    motion: &mut BossMotion,
    ctx: &BossContext,
    burst: &BurstProfile,
    vel: &mut Velocity,
    rng: &mut R,
    now_ms: f64,
) {
    let plan = plan_burst(ctx, burst, rng);
    motion.bursting = true;
    motion.last_burst_ms = now_ms;
    motion.burst_end_ms = now_ms + plan.duration_ms;
    *vel = plan.velocity;
    debug!(
        angle = plan.angle.to_degrees().round(),
        bounced = plan.bounced,
        duration_ms = plan.duration_ms,
        "boss burst"
    );
}

/// Pick one of the attacks that are off cooldown, weighted.
fn decide<R: Rng + ?Sized>(
    profile: &BossProfile,
    attacks: &AttackState,
    rng: &mut R,
    now_ms: f64,
) -> Option<usize> {
    let ready: Vec<(usize, f64)> = profile
        .attacks
        .iter()
        .enumerate()
        .filter(|(i, attack)| {
            attacks
                .last_used_ms
                .get(*i)
                .copied()
                .flatten()
                .map_or(true, |last| now_ms > last + attack.cooldown_ms)
        })
        .map(|(i, attack)| (i, attack.weight))
        .collect();
    select_attack(&ready, rng)
}

fn perform(
    world: &mut World,
    timeline: &mut Timeline,
    events: &mut Vec<GameEvent>,
    boss: Entity,
    index: usize,
    player: Option<Position>,
    now_ms: f64,
) {
    let (attack, at) = match world.query_one_mut::<(&BossProfile, &Position)>(boss) {
        Ok((profile, pos)) => (profile.attacks.get(index).cloned(), *pos),
        Err(_) => return,
    };
    let Some(attack) = attack else {
        return;
    };

    debug!(attack = %attack.id, kind = ?attack.kind(), "boss attack");
    events.push(GameEvent::BossAttack {
        attack_id: attack.id.clone(),
        kind: attack.kind(),
    });

    let aim = aim_at(&at, player);
    match attack.pattern {
        AttackPattern::Spray {
            count,
            spread_deg,
            speed,
            damage,
        } => {
            for angle in spray_angles(aim, count, spread_deg) {
                world_setup::spawn_boss_projectile(
                    world,
                    at,
                    Velocity::from_angle(angle, speed),
                    damage,
                    false,
                );
            }
        }
        AttackPattern::Large { speed, damage } => {
            world_setup::spawn_boss_projectile(
                world,
                at,
                Velocity::from_angle(aim, speed),
                damage,
                true,
            );
        }
        AttackPattern::Barrage {
            volleys, delay_ms, ..
        } => {
            for volley in 0..volleys {
                timeline.schedule_after(
                    now_ms,
                    volley as f64 * delay_ms,
                    ScheduledAction::BarrageVolley {
                        boss,
                        attack: index,
                    },
                );
            }
        }
        AttackPattern::Inert => {}
    }
}

/// Fire one barrage volley. Nothing happens if the boss has died or is gone.
pub fn fire_volley<R: Rng + ?Sized>(world: &mut World, rng: &mut R, boss: Entity, attack: usize) {
    let (pattern, at) = match world.query_one_mut::<(&Boss, &BossProfile, &Position)>(boss) {
        Ok((b, profile, pos)) if b.alive => (profile.attacks.get(attack).map(|a| a.pattern), *pos),
        _ => return,
    };
    let Some(AttackPattern::Barrage {
        per_volley,
        speed,
        damage,
        ..
    }) = pattern
    else {
        return;
    };

    let aim = aim_at(&at, world_setup::player_position(world));
    for _ in 0..per_volley {
        let from = Position::new(at.x + barrage_offset(rng), at.y);
        let angle = barrage_angle(aim, rng);
        world_setup::spawn_boss_projectile(
            world,
            from,
            Velocity::from_angle(angle, speed),
            damage,
            false,
        );
    }
}

/// Heading from the boss to the player, or straight up without one.
fn aim_at(from: &Position, player: Option<Position>) -> f64 {
    player.map_or(-FRAC_PI_2, |target| from.angle_to(&target))
}

/// Keep the boss inside its band. Hitting an edge ends a burst.
pub fn constrain_boss(
    motion: &mut BossMotion,
    pos: &mut Position,
    vel: &mut Velocity,
    hitbox: &Hitbox,
    now_ms: f64,
) {
    let area = world_setup::boss_area(hitbox);
    if constrain(pos, vel, &area) && motion.bursting {
        motion.bursting = false;
        *vel = Velocity::zero();
        motion.next_patrol_ms = now_ms;
    }
}
