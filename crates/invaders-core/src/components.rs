//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems; the few methods
//! here only answer questions about the component's own state.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::gamedata::SkillData;
use crate::types::{Countdown, Position, RepeatTimer};

/// The player's ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub character_id: String,
    pub hp: f64,
    pub max_hp: f64,
    /// Current movement speed (px/s).
    pub speed: f64,
    pub base_speed: f64,
    /// Current minimum time between shots (ms).
    pub shoot_cooldown_ms: f64,
    pub base_shoot_cooldown_ms: f64,
    pub last_shot_ms: Option<f64>,
    pub bullet_damage: f64,
    /// Fraction of incoming damage ignored (0.0 - 1.0).
    pub damage_reduction: f64,
    pub invulnerable: bool,
    /// A dash ignores movement input until it ends.
    pub dashing: bool,
    pub scale: f64,
    /// False once dead or once the game has ended.
    pub active: bool,
}

impl Player {
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp.max(0.0) / self.max_hp).clamp(0.0, 1.0)
    }
}

/// Runtime state of one skill slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSlot {
    pub data: SkillData,
    pub last_used_ms: Option<f64>,
    pub active: bool,
    pub activated_at_ms: f64,
    /// Set by input handling, consumed when the effect is applied.
    pub pending: bool,
    /// le_cagibi applied the player fire-rate buff (boss fight variant).
    pub buffed_player: bool,
}

impl SkillSlot {
    pub fn new(data: SkillData) -> Self {
        Self {
            data,
            last_used_ms: None,
            active: false,
            activated_at_ms: 0.0,
            pending: false,
            buffed_player: false,
        }
    }

    /// Off cooldown and not running.
    pub fn is_ready(&self, now_ms: f64) -> bool {
        !self.active
            && self
                .last_used_ms
                .map_or(true, |used| now_ms > used + self.data.cooldown)
    }

    /// Whether the active duration has run out.
    pub fn has_expired(&self, now_ms: f64) -> bool {
        self.active && now_ms > self.activated_at_ms + self.data.duration
    }
}

/// The player's skills, in key order (A, Z, E).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillBook {
    pub slots: Vec<SkillSlot>,
}

/// A regular enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Key into the game data enemy table.
    pub enemy_type: String,
    pub hp: f64,
    /// Hp at spawn (after elite scaling).
    pub original_max_hp: f64,
    pub score_value: u64,
    /// Desired horizontal speed, restored after a stun.
    pub speed_x: f64,
    pub speed_y: f64,
    pub speed_x_range: Option<[i64; 2]>,
    pub min_y: f64,
    pub max_y: f64,
    pub bullet_damage: f64,
    pub shoot_cooldown_ms: f64,
    pub original_shoot_cooldown_ms: f64,
    pub active: bool,
    /// Kept by le_cagibi. Immune to stun and silence.
    pub enraged: bool,
    pub scale: f64,
}

/// Looping enemy timers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTimers {
    pub shoot: RepeatTimer,
    /// Horizontal steering changes.
    pub steer: RepeatTimer,
}

/// A ticking damage effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotEffect {
    /// Damage per tick.
    pub damage: f64,
    pub duration_ms: f64,
    pub ticks: u32,
    pub started_ms: f64,
    pub last_tick_ms: f64,
}

impl DotEffect {
    pub fn new(damage: f64, duration_ms: f64, ticks: u32, now_ms: f64) -> Self {
        Self {
            damage,
            duration_ms,
            ticks,
            started_ms: now_ms,
            last_tick_ms: now_ms,
        }
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.duration_ms / self.ticks.max(1) as f64
    }

    pub fn has_expired(&self, now_ms: f64) -> bool {
        now_ms > self.started_ms + self.duration_ms
    }
}

/// Status effects on an enemy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub stun: Option<Countdown>,
    pub silence: Option<Countdown>,
    /// Temporary fire-rate change. The multiplier is already applied to the
    /// enemy's shoot cooldown.
    pub fire_rate_buff: Option<Countdown>,
    pub dots: Vec<DotEffect>,
}

impl StatusEffects {
    pub fn is_stunned(&self) -> bool {
        self.stun.is_some()
    }

    pub fn is_silenced(&self) -> bool {
        self.silence.is_some()
    }
}

/// The boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub boss_id: String,
    pub name: String,
    pub hp: f64,
    pub max_hp: f64,
    pub score_value: u64,
    pub alive: bool,
}

impl Boss {
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp.max(0.0) / self.max_hp).clamp(0.0, 1.0)
    }
}

/// Boss movement state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossMotion {
    pub bursting: bool,
    pub burst_end_ms: f64,
    pub last_burst_ms: f64,
    /// When the patrol picks its next target.
    pub next_patrol_ms: f64,
    pub patrol_target: Position,
    /// +1 right, -1 left.
    pub patrol_direction: f64,
    pub patrol_origin_x: f64,
    /// When the random-burst patterns may burst again.
    pub next_move_ms: f64,
}

/// Boss attack scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackState {
    pub next_decision_ms: f64,
    pub decision_cooldown_ms: f64,
    /// Last use per attack, indexed like the boss data's attack list.
    pub last_used_ms: Vec<Option<f64>>,
}

/// Extra payload of the cornichon_rosette sandwich.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SandwichEffect {
    pub impact_damage: f64,
    pub dot_damage: f64,
    pub dot_duration_ms: f64,
    pub dot_ticks: u32,
}

/// A projectile of any side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: f64,
    /// Spent on a hit; removed during cleanup.
    pub consumed: bool,
    pub sandwich: Option<SandwichEffect>,
    pub large: bool,
}

/// Axis-aligned collision box centred on the entity position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub half_width: f64,
    pub half_height: f64,
}

impl Hitbox {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// Box for a circular body of the given radius.
    pub fn circle(radius: f64) -> Self {
        Self {
            half_width: radius,
            half_height: radius,
        }
    }

    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f64 {
        self.half_height * 2.0
    }

    pub fn overlaps(&self, at: &Position, other: &Hitbox, other_at: &Position) -> bool {
        (at.x - other_at.x).abs() < self.half_width + other.half_width
            && (at.y - other_at.y).abs() < self.half_height + other.half_height
    }
}
