//! Entity spawn factories.
//!
//! Creates the player, enemies, the boss and projectiles with their
//! component bundles, and answers the small world queries the systems
//! share (live pool sizes, active enemy count, player position).

use hecs::{Entity, World};
use rand::Rng;

use invaders_ai::boss::{initial_decision_cooldown, BossArea};
use invaders_ai::enemy::{
    choose_horizontal_speed, shoot_delay, spawn_steer_delay, EnemyContext, SHOOT_DELAY_JITTER_MS,
};
use invaders_ai::profiles::{boss_profile, enemy_profile};
use invaders_ai::random::{between, sign};
use invaders_core::components::*;
use invaders_core::constants::*;
use invaders_core::enums::ProjectileKind;
use invaders_core::gamedata::{BossData, CharacterData, EnemyData};
use invaders_core::types::{Position, RepeatTimer, Velocity};

/// Spawn the player ship at the bottom centre of the playfield.
pub fn spawn_player(world: &mut World, character: &CharacterData) -> Entity {
    let stats = character.base_stats;
    let player = Player {
        character_id: character.id.clone(),
        hp: stats.hp,
        max_hp: stats.hp,
        speed: stats.speed,
        base_speed: stats.speed,
        shoot_cooldown_ms: stats.shoot_cooldown,
        base_shoot_cooldown_ms: stats.shoot_cooldown,
        last_shot_ms: None,
        bullet_damage: PLAYER_BULLET_DAMAGE,
        damage_reduction: 0.0,
        invulnerable: false,
        dashing: false,
        scale: 1.0,
        active: true,
    };
    let skills = SkillBook {
        slots: character
            .skills
            .iter()
            .take(SKILL_SLOTS)
            .cloned()
            .map(SkillSlot::new)
            .collect(),
    };

    world.spawn((
        player,
        skills,
        Position::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT - PLAYER_SPAWN_OFFSET),
        Velocity::zero(),
        Hitbox::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
    ))
}

/// Spawn one enemy above the top edge.
///
/// `config` is the archetype already merged with the wave's overrides.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut impl Rng,
    enemy_type: &str,
    config: &EnemyData,
    elite: bool,
) -> Entity {
    let x = between(rng, ENEMY_SPAWN_MARGIN_X, WORLD_WIDTH as i64 - ENEMY_SPAWN_MARGIN_X) as f64;
    let y = between(rng, ENEMY_SPAWN_Y.0, ENEMY_SPAWN_Y.1) as f64;
    let position = Position::new(x, y);

    let profile = enemy_profile(config, rng);
    let hp = if elite {
        profile.hp * ELITE_HP_MULTIPLIER
    } else {
        profile.hp
    };

    let shoot = RepeatTimer::new(shoot_delay(
        profile.shoot_cooldown_ms,
        SHOOT_DELAY_JITTER_MS,
        rng,
    ));
    let steer = RepeatTimer::new(spawn_steer_delay(rng));

    // Enemies pick a fresh heading as soon as they appear.
    let ctx = EnemyContext {
        position,
        velocity: Velocity::new(profile.speed_x, profile.speed_y),
        speed_y: profile.speed_y,
        speed_x_range: profile.speed_x_range,
        min_y: profile.min_y,
        max_y: profile.max_y,
        player: player_position(world),
    };
    let speed_x = choose_horizontal_speed(&ctx, rng);

    let enemy = Enemy {
        enemy_type: enemy_type.to_string(),
        hp,
        original_max_hp: hp,
        score_value: profile.score_value,
        speed_x,
        speed_y: profile.speed_y,
        speed_x_range: profile.speed_x_range,
        min_y: profile.min_y,
        max_y: profile.max_y,
        bullet_damage: profile.bullet_damage,
        shoot_cooldown_ms: profile.shoot_cooldown_ms,
        original_shoot_cooldown_ms: profile.shoot_cooldown_ms,
        active: true,
        enraged: false,
        scale: 1.0,
    };

    world.spawn((
        enemy,
        EnemyTimers { shoot, steer },
        StatusEffects::default(),
        position,
        Velocity::new(speed_x, profile.speed_y),
        Hitbox::new(ENEMY_SIZE.0, ENEMY_SIZE.1),
    ))
}

/// Spawn the boss at its entry point.
pub fn spawn_boss(world: &mut World, rng: &mut impl Rng, data: &BossData, now_ms: f64) -> Entity {
    let profile = boss_profile(data);
    let position = Position::new(BOSS_SPAWN.0, BOSS_SPAWN.1);

    let boss = Boss {
        boss_id: data.id.clone(),
        name: data.name.clone(),
        hp: profile.hp,
        max_hp: profile.hp,
        score_value: profile.score_value,
        alive: true,
    };
    let motion = BossMotion {
        bursting: false,
        burst_end_ms: 0.0,
        last_burst_ms: 0.0,
        next_patrol_ms: 0.0,
        patrol_target: position,
        patrol_direction: sign(rng),
        patrol_origin_x: position.x,
        next_move_ms: 0.0,
    };
    let attacks = AttackState {
        next_decision_ms: now_ms,
        decision_cooldown_ms: initial_decision_cooldown(rng),
        last_used_ms: vec![None; profile.attacks.len()],
    };

    world.spawn((
        boss,
        profile,
        motion,
        attacks,
        position,
        Velocity::zero(),
        Hitbox::new(BOSS_SIZE.0, BOSS_SIZE.1),
    ))
}

/// Movement area of a boss with the given hitbox.
pub fn boss_area(hitbox: &Hitbox) -> BossArea {
    BossArea::for_size(hitbox.width(), hitbox.height())
}

/// Number of live projectiles of the given kinds.
pub fn live_projectiles(world: &World, kinds: &[ProjectileKind]) -> usize {
    world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| !p.consumed && kinds.contains(&p.kind))
        .count()
}

const PLAYER_POOL: [ProjectileKind; 2] = [ProjectileKind::PlayerShot, ProjectileKind::Sandwich];

/// Fire a player bullet straight up. `None` when the pool is exhausted.
pub fn spawn_player_bullet(world: &mut World, at: Position, damage: f64) -> Option<Entity> {
    if live_projectiles(world, &PLAYER_POOL) >= PLAYER_BULLET_POOL {
        return None;
    }
    Some(world.spawn((
        Projectile {
            kind: ProjectileKind::PlayerShot,
            damage,
            consumed: false,
            sandwich: None,
            large: false,
        },
        at,
        Velocity::new(0.0, -PLAYER_BULLET_SPEED),
        Hitbox::new(PLAYER_BULLET_SIZE.0, PLAYER_BULLET_SIZE.1),
    )))
}

/// Throw a cornichon_rosette sandwich. Shares the player bullet pool.
pub fn spawn_sandwich(
    world: &mut World,
    at: Position,
    velocity: Velocity,
    damage: f64,
    effect: SandwichEffect,
) -> Option<Entity> {
    if live_projectiles(world, &PLAYER_POOL) >= PLAYER_BULLET_POOL {
        return None;
    }
    Some(world.spawn((
        Projectile {
            kind: ProjectileKind::Sandwich,
            damage,
            consumed: false,
            sandwich: Some(effect),
            large: false,
        },
        at,
        velocity,
        Hitbox::new(SANDWICH_SIZE.0, SANDWICH_SIZE.1),
    )))
}

pub fn spawn_enemy_bullet(
    world: &mut World,
    at: Position,
    velocity: Velocity,
    damage: f64,
) -> Option<Entity> {
    if live_projectiles(world, &[ProjectileKind::EnemyShot]) >= ENEMY_BULLET_POOL {
        return None;
    }
    Some(world.spawn((
        Projectile {
            kind: ProjectileKind::EnemyShot,
            damage,
            consumed: false,
            sandwich: None,
            large: false,
        },
        at,
        velocity,
        Hitbox::circle(ENEMY_BULLET_SIZE.0 * ROUND_BODY_FACTOR),
    )))
}

pub fn spawn_boss_projectile(
    world: &mut World,
    at: Position,
    velocity: Velocity,
    damage: f64,
    large: bool,
) -> Option<Entity> {
    if live_projectiles(world, &[ProjectileKind::BossShot]) >= BOSS_PROJECTILE_POOL {
        return None;
    }
    let hitbox = if large {
        let scale = LARGE_PROJECTILE_SCALE * LARGE_BODY_FACTOR;
        Hitbox::new(BOSS_PROJECTILE_SIZE.0 * scale, BOSS_PROJECTILE_SIZE.1 * scale)
    } else {
        Hitbox::circle(BOSS_PROJECTILE_SIZE.0 * ROUND_BODY_FACTOR)
    };
    Some(world.spawn((
        Projectile {
            kind: ProjectileKind::BossShot,
            damage,
            consumed: false,
            sandwich: None,
            large,
        },
        at,
        velocity,
        hitbox,
    )))
}

/// Position of the player, if the player is still in play.
pub fn player_position(world: &World) -> Option<Position> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .find(|(_, (p, _))| p.active)
        .map(|(_, (_, pos))| *pos)
}

pub fn active_enemy_count(world: &World) -> usize {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, e)| e.active)
        .count()
}

/// Remove every enemy without counting kills (boss entrance).
pub fn clear_enemies(world: &mut World) {
    let doomed: Vec<Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in doomed {
        let _ = world.despawn(entity);
    }
}

/// Whether a boss with the given id is alive.
pub fn boss_alive(world: &World, boss_id: &str) -> bool {
    world
        .query::<&Boss>()
        .iter()
        .any(|(_, b)| b.alive && b.boss_id == boss_id)
}
