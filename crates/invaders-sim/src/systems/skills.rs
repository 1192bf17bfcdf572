//! Skill resolution.
//!
//! The player system marks a slot `pending` when its key is held and the
//! skill is ready. This system applies pending activations, then undoes the
//! effects of skills whose duration has run out.

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use invaders_ai::random::between;
use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::SkillId;
use invaders_core::events::GameEvent;
use invaders_core::gamedata::{nonzero_or, SkillEffect};
use invaders_core::types::{Position, Velocity};

use crate::scoring::{KillCause, KillRecord};
use crate::systems::combat::hit_enemy;
use crate::systems::status;
use crate::world_setup;

pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
    kills: &mut Vec<KillRecord>,
    pointer: Position,
    now_ms: f64,
) {
    let Some(player) = world
        .query::<&Player>()
        .iter()
        .find(|(_, p)| p.active)
        .map(|(e, _)| e)
    else {
        return;
    };
    let mut book = match world.get::<&SkillBook>(player) {
        Ok(book) => (*book).clone(),
        Err(_) => return,
    };

    for (slot, skill) in book.slots.iter_mut().enumerate() {
        if skill.has_expired(now_ms) {
            skill.active = false;
            expire(world, player, skill);
            events.push(GameEvent::SkillEnded {
                slot,
                skill: skill.data.id,
            });
            debug!(skill = ?skill.data.id, "skill ended");
        }
    }

    for (slot, skill) in book.slots.iter_mut().enumerate() {
        if !skill.pending {
            continue;
        }
        skill.pending = false;
        skill.active = true;
        skill.last_used_ms = Some(now_ms);
        skill.activated_at_ms = now_ms;
        events.push(GameEvent::SkillActivated {
            slot,
            skill: skill.data.id,
        });
        events.push(GameEvent::ScreenFlash {
            duration_ms: SKILL_FLASH_MS,
        });
        debug!(skill = ?skill.data.id, "skill activated");
        activate(world, rng, player, skill, kills, pointer, now_ms);
    }

    if let Ok(mut stored) = world.get::<&mut SkillBook>(player) {
        *stored = book;
    }
}

fn activate<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    player: Entity,
    skill: &mut SkillSlot,
    kills: &mut Vec<KillRecord>,
    pointer: Position,
    now_ms: f64,
) {
    let duration = skill.data.duration;
    let effect = skill.data.effect.clone();

    match skill.data.id {
        SkillId::GifCalin => disable_enemies(world, duration, false),
        SkillId::Analyse => {
            if let Ok(p) = world.query_one_mut::<&mut Player>(player) {
                p.damage_reduction = effect.damage_reduction.unwrap_or(0.0).clamp(0.0, 1.0);
            }
        }
        SkillId::TourDePiste => {
            if let Ok((p, pos, vel)) =
                world.query_one_mut::<(&mut Player, &Position, &mut Velocity)>(player)
            {
                p.invulnerable = true;
                p.dashing = true;
                let speed = effect.dash_speed.unwrap_or(p.speed);
                *vel = Velocity::from_angle(pos.angle_to(&pointer), speed);
            }
        }
        SkillId::LePilote => {
            if let Some(multiplier) = effect.fire_rate_multiplier.filter(|m| *m > 0.0) {
                if let Ok(p) = world.query_one_mut::<&mut Player>(player) {
                    p.shoot_cooldown_ms = p.base_shoot_cooldown_ms / multiplier;
                }
            }
        }
        SkillId::CornichonRosette => throw_sandwich(world, player, &effect),
        SkillId::LHommeTimide => {
            if let Ok(p) = world.query_one_mut::<&mut Player>(player) {
                p.invulnerable = true;
            }
        }
        SkillId::Fiddlesticks => {
            disable_enemies(world, duration, true);
            if let Ok((p, hitbox)) = world.query_one_mut::<(&mut Player, &mut Hitbox)>(player) {
                p.speed = p.base_speed * effect.speed_multiplier.unwrap_or(1.0);
                p.scale = effect.size_multiplier.unwrap_or(1.0);
                *hitbox = Hitbox::new(PLAYER_SIZE.0 * p.scale, PLAYER_SIZE.1 * p.scale);
            }
        }
        SkillId::LeCagibi => cagibi(world, rng, player, skill, kills),
        SkillId::Malveillance => {
            let damage = effect.dot_damage.unwrap_or(0.0);
            let dot_duration = effect.dot_duration.unwrap_or(0.0);
            let ticks = effect.dot_ticks.unwrap_or(1);
            for (_entity, (enemy, effects)) in
                world.query_mut::<(&Enemy, &mut StatusEffects)>()
            {
                if enemy.active {
                    status::apply_dot(
                        effects,
                        DotEffect::new(damage, dot_duration, ticks, now_ms),
                    );
                }
            }
        }
        SkillId::Unknown => debug!(skill = %skill.data.name, "skill has no effect"),
    }
}

/// Undo a skill's effect on the player.
fn expire(world: &mut World, player: Entity, skill: &mut SkillSlot) {
    let Ok((p, vel, hitbox)) =
        world.query_one_mut::<(&mut Player, &mut Velocity, &mut Hitbox)>(player)
    else {
        return;
    };
    match skill.data.id {
        SkillId::Analyse => p.damage_reduction = 0.0,
        SkillId::TourDePiste => {
            p.invulnerable = false;
            p.dashing = false;
            *vel = Velocity::zero();
        }
        SkillId::LePilote => p.shoot_cooldown_ms = p.base_shoot_cooldown_ms,
        SkillId::LHommeTimide => p.invulnerable = false,
        SkillId::Fiddlesticks => {
            p.speed = p.base_speed;
            p.scale = 1.0;
            *hitbox = Hitbox::new(PLAYER_SIZE.0, PLAYER_SIZE.1);
        }
        SkillId::LeCagibi => {
            if skill.buffed_player {
                p.shoot_cooldown_ms = p.base_shoot_cooldown_ms;
                skill.buffed_player = false;
            }
        }
        SkillId::GifCalin
        | SkillId::CornichonRosette
        | SkillId::Malveillance
        | SkillId::Unknown => {}
    }
}

/// Stun (and optionally silence) every active enemy.
fn disable_enemies(world: &mut World, duration_ms: f64, also_silence: bool) {
    let mut affected = 0;
    for (_entity, (enemy, effects, timers, vel)) in world.query_mut::<(
        &Enemy,
        &mut StatusEffects,
        &mut EnemyTimers,
        &mut Velocity,
    )>() {
        if status::stun(enemy, effects, timers, vel, duration_ms) {
            affected += 1;
        }
        if also_silence {
            status::silence(enemy, effects, timers, duration_ms);
        }
    }
    debug!(affected, silence = also_silence, "enemies stunned");
}

/// Throw a sandwich at the closest active enemy, or straight up.
fn throw_sandwich(world: &mut World, player: Entity, effect: &SkillEffect) {
    let (origin, muzzle, damage) = match world.query_one_mut::<(&Player, &Position, &Hitbox)>(player) {
        Ok((p, pos, hitbox)) => (
            *pos,
            Position::new(pos.x, pos.y - hitbox.half_height),
            p.bullet_damage,
        ),
        Err(_) => return,
    };

    let closest = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| enemy.active)
        .map(|(_, (_, pos))| *pos)
        .min_by(|a, b| origin.distance_to(a).total_cmp(&origin.distance_to(b)));
    let angle = closest.map_or(-std::f64::consts::FRAC_PI_2, |target| {
        origin.angle_to(&target)
    });

    let base = effect.base_damage.unwrap_or(damage);
    let sandwich = SandwichEffect {
        impact_damage: base * effect.impact_damage_bonus.unwrap_or(1.0),
        dot_damage: effect.dot_damage.unwrap_or(0.0),
        dot_duration_ms: effect.dot_duration.unwrap_or(0.0),
        dot_ticks: effect.dot_ticks.unwrap_or(1),
    };
    let velocity = Velocity::from_angle(angle, SANDWICH_SPEED);
    if world_setup::spawn_sandwich(world, muzzle, velocity, damage, sandwich).is_none() {
        debug!("sandwich dropped, player projectile pool full");
    }
}

/// le_cagibi. Against nico it buffs the player's fire rate. Otherwise one
/// random enemy is kept and enraged while every other one is purged.
fn cagibi<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    player: Entity,
    skill: &mut SkillSlot,
    kills: &mut Vec<KillRecord>,
) {
    let rival_buff = skill.data.effect.player_fire_rate_buff_vs_nico;
    let hp_percent = skill.data.effect.target_hp_percent.unwrap_or(1.0);
    let fire_rate = nonzero_or(skill.data.effect.target_fire_rate_multiplier, 1.0);

    if world_setup::boss_alive(world, CAGIBI_RIVAL_BOSS) {
        if let Some(multiplier) = rival_buff.filter(|m| *m > 0.0) {
            if let Ok(p) = world.query_one_mut::<&mut Player>(player) {
                p.shoot_cooldown_ms = p.base_shoot_cooldown_ms / multiplier;
                skill.buffed_player = true;
            }
        }
        return;
    }

    let targets: Vec<Entity> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.active)
        .map(|(e, _)| e)
        .collect();
    if targets.is_empty() {
        return;
    }

    let kept = between(rng, 0, targets.len() as i64 - 1) as usize;

    for (i, entity) in targets.iter().enumerate() {
        let Ok((enemy, effects, timers)) =
            world.query_one_mut::<(&mut Enemy, &mut StatusEffects, &mut EnemyTimers)>(*entity)
        else {
            continue;
        };
        if i == kept {
            enemy.enraged = true;
            enemy.hp = (enemy.original_max_hp * hp_percent).floor().max(1.0);
            status::apply_fire_rate_buff(
                enemy,
                effects,
                timers,
                fire_rate,
                None,
                CAGIBI_SHOOT_JITTER_MS,
                rng,
            );
            debug!(enemy = %enemy.enemy_type, hp = enemy.hp, "enemy enraged");
        } else {
            let damage = enemy.hp * 2.0;
            if hit_enemy(enemy, damage) {
                kills.push(KillRecord {
                    enemy_type: enemy.enemy_type.clone(),
                    score_value: enemy.score_value,
                    cause: KillCause::Purge,
                });
            }
        }
    }
}
