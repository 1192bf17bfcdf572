//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level scene state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    CharacterSelect,
    Active,
    Paused,
    /// Game over or world complete, waiting to show results.
    Ending,
    Results,
}

/// How a wave decides it is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveKind {
    KillCount,
    TimedSurvival,
    BossFight,
    Unknown,
}

/// Progress within the current wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveStage {
    /// No wave running yet.
    #[default]
    Idle,
    /// Kill-count spawns or survival pulses are still coming.
    Spawning,
    /// Survival spawn phase over, remaining enemies must be cleared.
    Cleanup,
    /// Boss alive.
    Boss,
    /// Wave cleared, next wave scheduled.
    Intermission,
    /// Every wave of the world is done.
    Complete,
}

/// Player skill identifiers as they appear in game data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    /// Stun every enemy on screen.
    GifCalin,
    /// Temporary damage reduction.
    Analyse,
    /// Invulnerable dash toward the pointer.
    TourDePiste,
    /// Faster fire rate.
    LePilote,
    /// Homing sandwich that applies a DoT on impact.
    CornichonRosette,
    /// Temporary invulnerability.
    LHommeTimide,
    /// Stun and silence every enemy, grow and speed up.
    Fiddlesticks,
    /// Purge all but one enemy, which becomes enraged.
    LeCagibi,
    /// DoT on every enemy on screen.
    Malveillance,
    /// Any id this build does not know. Takes a slot and a cooldown but
    /// does nothing.
    #[serde(other)]
    Unknown,
}

/// Boss movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossMovementKind {
    DynamicPatrolBurst,
    PatrolHorizontal,
    RandomBurst,
    RandomBurstAggressive,
    #[serde(other)]
    Stationary,
}

/// Boss attack pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossAttackKind {
    ProjectileSpray,
    SpecialProjectileLarge,
    ProjectileBarrage,
    /// Attack types this build does not know. Selecting one does nothing.
    #[serde(other)]
    Inert,
}

/// Who fired a projectile and how it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    PlayerShot,
    Sandwich,
    EnemyShot,
    BossShot,
}

/// Health bar colour band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthTier {
    #[default]
    High,
    Medium,
    Low,
}

impl HealthTier {
    /// Above 60% is high, above 30% is medium.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction > 0.6 {
            HealthTier::High
        } else if fraction > 0.3 {
            HealthTier::Medium
        } else {
            HealthTier::Low
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

impl GameOutcome {
    pub fn is_victory(self) -> bool {
        self == GameOutcome::Victory
    }
}
