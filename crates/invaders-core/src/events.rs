//! Events emitted by the simulation for audio and UI feedback.
//!
//! Events are collected during a tick and drained into the snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave began. `index` is zero-based.
    WaveStarted {
        index: usize,
        kind: WaveKind,
        label: String,
    },
    /// The spawn phase of a survival wave ended.
    SurvivalSpawnEnded { index: usize },
    WaveCleared { index: usize },
    /// Every wave of the world was beaten.
    WorldComplete,
    BossSpawned { boss_id: String, name: String },
    /// The boss used an attack.
    BossAttack {
        attack_id: String,
        kind: BossAttackKind,
    },
    BossDefeated { boss_id: String, score: u64 },
    EnemyKilled {
        enemy_type: String,
        /// Score awarded. Zero for ramming kills.
        score: u64,
    },
    PlayerDamaged { amount: f64, hp: f64 },
    PlayerDied,
    SkillActivated { slot: usize, skill: SkillId },
    SkillEnded { slot: usize, skill: SkillId },
    GameEnded { outcome: GameOutcome, score: u64 },
    /// Full-screen flash (skill activation, player hit).
    ScreenFlash { duration_ms: f64 },
}
