//! Collision resolution: projectiles against ships and ships against ships.
//!
//! Overlap tests use the entity hitboxes (axis-aligned, centred on the
//! position). Entity lists are collected up front so hits can be applied
//! through `query_one_mut` without nested borrows.

use hecs::{Entity, World};
use tracing::{debug, info};

use invaders_core::components::*;
use invaders_core::constants::{
    CONTACT_DAMAGE_TO_ENEMY, CONTACT_DAMAGE_TO_PLAYER, DAMAGE_FLASH_MS,
};
use invaders_core::enums::ProjectileKind;
use invaders_core::events::GameEvent;
use invaders_core::types::Position;

use crate::scoring::{BossDefeat, KillCause, KillRecord};
use crate::systems::status::apply_dot;

/// What combat did this tick that the director needs to hear about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatReport {
    pub boss_defeat: Option<BossDefeat>,
    pub player_died: bool,
}

/// Damage an enemy. Returns true on the hit that kills it.
pub fn hit_enemy(enemy: &mut Enemy, damage: f64) -> bool {
    if !enemy.active {
        return false;
    }
    enemy.hp -= damage;
    if enemy.hp <= 0.0 {
        enemy.active = false;
        return true;
    }
    false
}

/// Damage the player. Invulnerability blocks it entirely; damage reduction
/// scales it. Returns true on the hit that kills the player.
pub fn take_damage(player: &mut Player, amount: f64, events: &mut Vec<GameEvent>) -> bool {
    if !player.active || player.invulnerable {
        return false;
    }
    let actual = amount * (1.0 - player.damage_reduction);
    player.hp -= actual;
    events.push(GameEvent::PlayerDamaged {
        amount: actual,
        hp: player.hp.max(0.0),
    });
    events.push(GameEvent::ScreenFlash {
        duration_ms: DAMAGE_FLASH_MS,
    });
    if player.hp <= 0.0 {
        player.hp = 0.0;
        player.active = false;
        events.push(GameEvent::PlayerDied);
        info!("player died");
        return true;
    }
    false
}

pub fn run(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    kills: &mut Vec<KillRecord>,
    now_ms: f64,
) -> CombatReport {
    let mut report = CombatReport::default();

    let player: Option<(Entity, Position, Hitbox)> = world
        .query::<(&Player, &Position, &Hitbox)>()
        .iter()
        .find(|(_, (p, _, _))| p.active)
        .map(|(e, (_, pos, hitbox))| (e, *pos, *hitbox));

    let enemies: Vec<(Entity, Position, Hitbox)> = world
        .query::<(&Enemy, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (enemy, _, _))| enemy.active)
        .map(|(e, (_, pos, hitbox))| (e, *pos, *hitbox))
        .collect();

    let boss: Option<(Entity, Position, Hitbox)> = world
        .query::<(&Boss, &Position, &Hitbox)>()
        .iter()
        .find(|(_, (b, _, _))| b.alive)
        .map(|(e, (_, pos, hitbox))| (e, *pos, *hitbox));

    let shots: Vec<(Entity, Projectile, Position, Hitbox)> = world
        .query::<(&Projectile, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (p, _, _))| !p.consumed)
        .map(|(e, (p, pos, hitbox))| (e, p.clone(), *pos, *hitbox))
        .collect();

    let mut consumed = Vec::new();

    for (shot_entity, shot, at, hitbox) in &shots {
        match shot.kind {
            ProjectileKind::PlayerShot | ProjectileKind::Sandwich => {
                let mut spent = false;

                for (enemy_entity, enemy_at, enemy_box) in &enemies {
                    if !hitbox.overlaps(at, enemy_box, enemy_at) {
                        continue;
                    }
                    let Ok((enemy, effects)) =
                        world.query_one_mut::<(&mut Enemy, &mut StatusEffects)>(*enemy_entity)
                    else {
                        continue;
                    };
                    if !enemy.active {
                        continue;
                    }
                    let damage = match shot.sandwich {
                        Some(sandwich) => {
                            apply_dot(
                                effects,
                                DotEffect::new(
                                    sandwich.dot_damage,
                                    sandwich.dot_duration_ms,
                                    sandwich.dot_ticks,
                                    now_ms,
                                ),
                            );
                            sandwich.impact_damage
                        }
                        None => shot.damage,
                    };
                    if hit_enemy(enemy, damage) {
                        kills.push(KillRecord {
                            enemy_type: enemy.enemy_type.clone(),
                            score_value: enemy.score_value,
                            cause: KillCause::Shot,
                        });
                    }
                    spent = true;
                    break;
                }

                if !spent {
                    if let Some((boss_entity, boss_at, boss_box)) = &boss {
                        if hitbox.overlaps(at, boss_box, boss_at) {
                            if let Ok(b) = world.query_one_mut::<&mut Boss>(*boss_entity) {
                                if b.alive {
                                    b.hp -= shot.damage;
                                    spent = true;
                                    if b.hp <= 0.0 {
                                        b.hp = 0.0;
                                        b.alive = false;
                                        report.boss_defeat = Some(BossDefeat {
                                            boss_id: b.boss_id.clone(),
                                            score_value: b.score_value,
                                        });
                                    }
                                }
                            }
                        }
                    }
                }

                if spent {
                    consumed.push(*shot_entity);
                }
            }
            ProjectileKind::EnemyShot | ProjectileKind::BossShot => {
                let Some((player_entity, player_at, player_box)) = &player else {
                    continue;
                };
                if !hitbox.overlaps(at, player_box, player_at) {
                    continue;
                }
                if let Ok(p) = world.query_one_mut::<&mut Player>(*player_entity) {
                    if !p.active {
                        continue;
                    }
                    if take_damage(p, shot.damage, events) {
                        report.player_died = true;
                    }
                    consumed.push(*shot_entity);
                }
            }
        }
    }

    // Ramming.
    if let Some((player_entity, player_at, player_box)) = &player {
        for (enemy_entity, enemy_at, enemy_box) in &enemies {
            if !player_box.overlaps(player_at, enemy_box, enemy_at) {
                continue;
            }
            let player_active = world
                .query_one_mut::<&Player>(*player_entity)
                .map(|p| p.active)
                .unwrap_or(false);
            if !player_active {
                break;
            }
            let Ok(enemy) = world.query_one_mut::<&mut Enemy>(*enemy_entity) else {
                continue;
            };
            if !enemy.active {
                continue;
            }
            let rammed = hit_enemy(enemy, CONTACT_DAMAGE_TO_ENEMY);
            let kill = KillRecord {
                enemy_type: enemy.enemy_type.clone(),
                score_value: enemy.score_value,
                cause: KillCause::Ram,
            };
            if rammed {
                kills.push(kill);
            }
            if let Ok(p) = world.query_one_mut::<&mut Player>(*player_entity) {
                if take_damage(p, CONTACT_DAMAGE_TO_PLAYER, events) {
                    report.player_died = true;
                }
            }
        }
    }

    for entity in consumed {
        if let Ok(p) = world.query_one_mut::<&mut Projectile>(entity) {
            p.consumed = true;
        }
    }

    if report.boss_defeat.is_some() {
        let mut cleared = 0;
        for (_entity, p) in world.query_mut::<&mut Projectile>() {
            if p.kind == ProjectileKind::BossShot && !p.consumed {
                p.consumed = true;
                cleared += 1;
            }
        }
        debug!(cleared, "boss projectiles cleared");
    }

    report
}
