//! Static game content: characters, enemies, bosses and worlds.
//!
//! The schema matches the JSON content file (camelCase keys). Most numeric
//! fields are optional; systems fall back to the defaults in
//! `invaders-ai::profiles` when a field is absent.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_ENEMY_KEY;
use crate::enums::{BossAttackKind, BossMovementKind, SkillId, WaveKind};
use crate::error::GameDataError;

const BUILTIN_GAME_DATA: &str = include_str!("../data/game_data.json");

/// The complete content set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub characters: Vec<CharacterData>,
    pub enemies: BTreeMap<String, EnemyData>,
    #[serde(default)]
    pub bosses: Vec<BossData>,
    pub worlds: Vec<WorldData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sprite_key: Option<String>,
    #[serde(default)]
    pub portrait_key: Option<String>,
    #[serde(default)]
    pub bullet_sprite_key: Option<String>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub skills: Vec<SkillData>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: f64,
    /// Movement speed (px/s).
    pub speed: f64,
    /// Minimum time between shots (ms).
    pub shoot_cooldown: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillData {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Time before the skill can be used again (ms).
    pub cooldown: f64,
    /// How long the skill stays active (ms). Zero for instant skills.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub icon_key: Option<String>,
    #[serde(default)]
    pub effect: SkillEffect,
}

/// Effect parameters. Each skill reads the subset it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEffect {
    pub damage_reduction: Option<f64>,
    pub dash_speed: Option<f64>,
    pub fire_rate_multiplier: Option<f64>,
    pub projectile_key: Option<String>,
    pub base_damage: Option<f64>,
    pub impact_damage_bonus: Option<f64>,
    pub dot_damage: Option<f64>,
    pub dot_duration: Option<f64>,
    pub dot_ticks: Option<u32>,
    pub speed_multiplier: Option<f64>,
    pub size_multiplier: Option<f64>,
    pub target_hp_percent: Option<f64>,
    pub target_fire_rate_multiplier: Option<f64>,
    pub player_fire_rate_buff_vs_nico: Option<f64>,
}

/// Enemy archetype. Every field may be overridden per wave.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyData {
    pub sprite_key: Option<String>,
    pub hp: Option<f64>,
    pub speed_y: Option<f64>,
    pub speed_x_range: Option<[i64; 2]>,
    pub score_value: Option<u64>,
    pub shoot_cooldown: Option<f64>,
    pub bullet_damage: Option<f64>,
    pub min_y_offset: Option<f64>,
    pub max_y_offset: Option<f64>,
}

impl EnemyData {
    /// Layer `overrides` on top of this archetype.
    pub fn merged(&self, overrides: &EnemyData) -> EnemyData {
        EnemyData {
            sprite_key: overrides
                .sprite_key
                .clone()
                .or_else(|| self.sprite_key.clone()),
            hp: overrides.hp.or(self.hp),
            speed_y: overrides.speed_y.or(self.speed_y),
            speed_x_range: overrides.speed_x_range.or(self.speed_x_range),
            score_value: overrides.score_value.or(self.score_value),
            shoot_cooldown: overrides.shoot_cooldown.or(self.shoot_cooldown),
            bullet_damage: overrides.bullet_damage.or(self.bullet_damage),
            min_y_offset: overrides.min_y_offset.or(self.min_y_offset),
            max_y_offset: overrides.max_y_offset.or(self.max_y_offset),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sprite_key: Option<String>,
    #[serde(default)]
    pub hp: Option<f64>,
    #[serde(default)]
    pub score_value: Option<u64>,
    #[serde(default)]
    pub movement: Option<BossMovementData>,
    #[serde(default)]
    pub attacks: Vec<BossAttackData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossMovementData {
    #[serde(rename = "type")]
    pub kind: BossMovementKind,
    pub base_speed: Option<f64>,
    /// Burst speed for the random-burst patterns.
    pub speed: Option<f64>,
    pub burst_duration: Option<f64>,
    pub pause_duration: Option<f64>,
    pub patrol_distance: Option<f64>,
    pub patrol_area: Option<PatrolArea>,
    pub burst: Option<BurstData>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatrolArea {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurstData {
    pub cooldown: Option<f64>,
    pub chance_per_second: Option<f64>,
    pub speed: Option<f64>,
    pub duration_min: Option<f64>,
    pub duration_max: Option<f64>,
    pub target_player_chance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossAttackData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: BossAttackKind,
    /// Time before the attack can be chosen again (ms).
    pub cooldown: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub projectile_count: Option<u32>,
    /// Fan width in degrees.
    #[serde(default)]
    pub spread_angle: Option<f64>,
    #[serde(default)]
    pub projectile_speed: Option<f64>,
    #[serde(default)]
    pub damage: Option<f64>,
    #[serde(default)]
    pub projectile_sprite_key: Option<String>,
    #[serde(default)]
    pub barrage_count: Option<u32>,
    /// Delay between barrage volleys (ms).
    #[serde(default)]
    pub barrage_delay: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub waves: Vec<WaveData>,
}

/// A pre-authored wave, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaveData {
    #[serde(rename_all = "camelCase")]
    KillCount {
        enemy_type: String,
        count: u32,
        #[serde(default)]
        spawn_delay: Option<f64>,
        #[serde(default)]
        elite: bool,
        #[serde(default)]
        enemy_config: Option<EnemyData>,
    },
    #[serde(rename_all = "camelCase")]
    TimedSurvival {
        enemy_type: String,
        /// Length of the spawn phase (ms).
        duration: f64,
        #[serde(default)]
        spawn_interval: Option<f64>,
        #[serde(default)]
        enemies_per_interval: Option<u32>,
        #[serde(default)]
        enemy_config: Option<EnemyData>,
    },
    #[serde(rename_all = "camelCase")]
    BossFight { boss_id: String },
    #[serde(other)]
    Unknown,
}

impl WaveData {
    pub fn kind(&self) -> WaveKind {
        match self {
            WaveData::KillCount { .. } => WaveKind::KillCount,
            WaveData::TimedSurvival { .. } => WaveKind::TimedSurvival,
            WaveData::BossFight { .. } => WaveKind::BossFight,
            WaveData::Unknown => WaveKind::Unknown,
        }
    }
}

impl GameData {
    /// Parse and validate a JSON content file.
    pub fn from_json(json: &str) -> Result<Self, GameDataError> {
        let data: GameData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// The content set embedded in the binary.
    pub fn builtin() -> Result<Self, GameDataError> {
        Self::from_json(BUILTIN_GAME_DATA)
    }

    /// Structural checks. Dangling references (unknown enemy types or boss
    /// ids inside waves) are tolerated and resolved at runtime.
    pub fn validate(&self) -> Result<(), GameDataError> {
        if self.characters.is_empty() {
            return Err(GameDataError::Invalid("no characters defined".into()));
        }
        if self.worlds.is_empty() {
            return Err(GameDataError::Invalid("no worlds defined".into()));
        }

        let mut seen = HashSet::new();
        for character in &self.characters {
            if !seen.insert(character.id.as_str()) {
                return Err(GameDataError::Invalid(format!(
                    "duplicate character id '{}'",
                    character.id
                )));
            }
            if character.base_stats.hp <= 0.0 {
                return Err(GameDataError::Invalid(format!(
                    "character '{}' has no hp",
                    character.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for boss in &self.bosses {
            if !seen.insert(boss.id.as_str()) {
                return Err(GameDataError::Invalid(format!(
                    "duplicate boss id '{}'",
                    boss.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for world in &self.worlds {
            if !seen.insert(world.id.as_str()) {
                return Err(GameDataError::Invalid(format!(
                    "duplicate world id '{}'",
                    world.id
                )));
            }
        }
        Ok(())
    }

    pub fn character(&self, id: &str) -> Option<&CharacterData> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn world(&self, id: &str) -> Option<&WorldData> {
        self.worlds.iter().find(|w| w.id == id)
    }

    pub fn boss(&self, id: &str) -> Option<&BossData> {
        self.bosses.iter().find(|b| b.id == id)
    }

    /// Characters shown on the selection screen: those with an id, a
    /// sprite and a portrait.
    pub fn selectable_characters(&self) -> Vec<&CharacterData> {
        self.characters
            .iter()
            .filter(|c| {
                !c.id.is_empty()
                    && c.sprite_key.as_deref().is_some_and(|k| !k.is_empty())
                    && c.portrait_key.as_deref().is_some_and(|k| !k.is_empty())
            })
            .collect()
    }

    /// Look up an enemy archetype, falling back to the default enemy.
    pub fn resolve_enemy(&self, key: &str) -> Option<&EnemyData> {
        self.enemies
            .get(key)
            .or_else(|| self.enemies.get(FALLBACK_ENEMY_KEY))
    }
}

/// An optional numeric field, with zero counting as unset.
pub fn nonzero<T: Copy + Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

/// The field's value, or `default` when it is missing or zero.
pub fn nonzero_or<T: Copy + Default + PartialEq>(value: Option<T>, default: T) -> T {
    nonzero(value).unwrap_or(default)
}
