//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use invaders_core::components::*;
use invaders_core::constants::SKILL_KEY_LABELS;
use invaders_core::enums::*;
use invaders_core::events::GameEvent;
use invaders_core::state::*;
use invaders_core::types::{Position, SimTime, Velocity};

/// Screen state the world does not hold.
pub struct SnapshotInputs {
    pub phase: GamePhase,
    pub score: u64,
    pub wave: Option<WaveView>,
    pub events: Vec<GameEvent>,
    pub character_select: Option<CharacterSelectView>,
    pub results: Option<ResultsView>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, time: &SimTime, inputs: SnapshotInputs) -> GameStateSnapshot {
    let now_ms = time.elapsed_ms;

    GameStateSnapshot {
        time: *time,
        phase: inputs.phase,
        score: inputs.score,
        wave: inputs.wave,
        player: build_player(world),
        skills: build_skills(world, now_ms),
        enemies: build_enemies(world),
        boss: build_boss(world),
        projectiles: build_projectiles(world),
        events: inputs.events,
        character_select: inputs.character_select,
        results: inputs.results,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (player, pos))| PlayerView {
            position: *pos,
            hp: player.hp.max(0.0),
            max_hp: player.max_hp,
            health_tier: HealthTier::from_fraction(player.hp_fraction()),
            invulnerable: player.invulnerable,
            scale: player.scale,
            active: player.active,
        })
}

fn build_skills(world: &World, now_ms: f64) -> Vec<SkillView> {
    let mut query = world.query::<(&Player, &SkillBook)>();
    let Some((_, (_, book))) = query.iter().next() else {
        return Vec::new();
    };

    book.slots
        .iter()
        .enumerate()
        .map(|(slot, skill)| {
            let remaining_fraction = if skill.active && skill.data.duration > 0.0 {
                (1.0 - (now_ms - skill.activated_at_ms) / skill.data.duration).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let cooldown_fraction = match skill.last_used_ms {
                Some(used) if skill.data.cooldown > 0.0 => {
                    ((now_ms - used) / skill.data.cooldown).clamp(0.0, 1.0)
                }
                _ => 1.0,
            };
            SkillView {
                slot,
                id: skill.data.id,
                name: skill.data.name.clone(),
                key_label: SKILL_KEY_LABELS.get(slot).copied().unwrap_or("?").to_string(),
                active: skill.active,
                remaining_fraction,
                cooldown_fraction,
                ready: skill.is_ready(now_ms),
            }
        })
        .collect()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &StatusEffects, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (enemy, _, _, _))| enemy.active)
        .map(|(entity, (enemy, effects, pos, vel))| EnemyView {
            id: entity.to_bits().get(),
            enemy_type: enemy.enemy_type.clone(),
            position: *pos,
            velocity: *vel,
            hp: enemy.hp,
            stunned: effects.is_stunned(),
            silenced: effects.is_silenced(),
            enraged: enemy.enraged,
            dot_count: effects.dots.len(),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_boss(world: &World) -> Option<BossView> {
    world
        .query::<(&Boss, &BossMotion, &Position)>()
        .iter()
        .find(|(_, (boss, _, _))| boss.alive)
        .map(|(_, (boss, motion, pos))| BossView {
            boss_id: boss.boss_id.clone(),
            name: boss.name.clone(),
            position: *pos,
            hp: boss.hp.max(0.0),
            max_hp: boss.max_hp,
            hp_fraction: boss.hp_fraction(),
            bursting: motion.bursting,
        })
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (p, _, _))| !p.consumed)
        .map(|(_, (p, pos, vel))| ProjectileView {
            kind: p.kind,
            position: *pos,
            velocity: *vel,
            large: p.large,
        })
        .collect()
}
