//! Game state snapshot: the complete visible state sent to the front end each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state broadcast to the front end after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u64,
    pub wave: Option<WaveView>,
    pub player: Option<PlayerView>,
    pub skills: Vec<SkillView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub projectiles: Vec<ProjectileView>,
    /// Events raised during this tick.
    pub events: Vec<GameEvent>,
    pub character_select: Option<CharacterSelectView>,
    pub results: Option<ResultsView>,
}

/// Wave banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveView {
    /// Zero-based wave index.
    pub index: usize,
    pub total: usize,
    pub kind: WaveKind,
    pub stage: WaveStage,
    /// Banner text, e.g. "VAGUE 2: TIMED_SURVIVAL".
    pub label: String,
    /// Time left in a survival wave's spawn phase.
    pub spawn_time_left_ms: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    pub health_tier: HealthTier,
    pub invulnerable: bool,
    pub scale: f64,
    pub active: bool,
}

/// One entry of the skill icon overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillView {
    pub slot: usize,
    pub id: SkillId,
    pub name: String,
    pub key_label: String,
    pub active: bool,
    /// Remaining share of the active duration (1.0 = just activated).
    pub remaining_fraction: f64,
    /// Elapsed share of the cooldown while recharging (1.0 = ready).
    pub cooldown_fraction: f64,
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub enemy_type: String,
    pub position: Position,
    pub velocity: Velocity,
    pub hp: f64,
    pub stunned: bool,
    pub silenced: bool,
    pub enraged: bool,
    pub dot_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub boss_id: String,
    pub name: String,
    pub position: Position,
    pub hp: f64,
    pub max_hp: f64,
    pub hp_fraction: f64,
    pub bursting: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Position,
    pub velocity: Velocity,
    pub large: bool,
}

/// Character selection screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSelectView {
    pub characters: Vec<CharacterCard>,
    pub selected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCard {
    pub id: String,
    pub name: String,
    pub description: String,
    /// "- name" lines, one per skill.
    pub skill_lines: Vec<String>,
}

/// Results screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsView {
    pub score: u64,
    pub victory: bool,
    pub coins_earned: u64,
    pub version: String,
}
