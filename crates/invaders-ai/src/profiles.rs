//! Behaviour profiles resolved from game data.
//!
//! Game data leaves most tuning optional. These functions fill the gaps
//! with the house defaults so the brains only ever see concrete numbers.

use rand::Rng;

use invaders_core::constants::WORLD_HEIGHT;
use invaders_core::enums::{BossAttackKind, BossMovementKind};
use invaders_core::gamedata::{
    nonzero, nonzero_or, BossAttackData, BossData, BurstData, EnemyData, PatrolArea,
};

use crate::random::{between, sign};

// Boss defaults.
pub const DEFAULT_BOSS_HP: f64 = 500.0;
pub const DEFAULT_BOSS_SCORE: u64 = 1000;
pub const DEFAULT_BOSS_SPEED: f64 = 60.0;
pub const DEFAULT_PATROL_DISTANCE: f64 = 200.0;

// Spontaneous burst defaults.
pub const DEFAULT_BURST_COOLDOWN_MS: f64 = 2500.0;
pub const DEFAULT_BURST_CHANCE_PER_SECOND: f64 = 0.1;
pub const DEFAULT_BURST_SPEED: f64 = 350.0;
pub const DEFAULT_BURST_DURATION_MS: (i64, i64) = (200, 500);
pub const DEFAULT_BURST_TARGET_CHANCE: f64 = 0.6;

// Random-burst movement defaults.
pub const RANDOM_BURST_DURATION_MS: (i64, i64) = (300, 600);
pub const RANDOM_BURST_PAUSE_MS: f64 = 1000.0;
pub const RANDOM_BURST_TARGET_CHANCE: f64 = 0.1;
pub const AGGRESSIVE_BURST_TARGET_CHANCE: f64 = 0.8;

// Enemy defaults.
pub const DEFAULT_ENEMY_HP: f64 = 20.0;
pub const DEFAULT_ENEMY_SPEED_Y: (i64, i64) = (40, 80);
pub const DEFAULT_ENEMY_SPEED_X: (i64, i64) = (50, 100);
pub const DEFAULT_ENEMY_SHOOT_COOLDOWN_MS: (i64, i64) = (1500, 3000);
pub const DEFAULT_ENEMY_BULLET_DAMAGE: f64 = 5.0;
pub const DEFAULT_ENEMY_MIN_Y: f64 = 50.0;
pub const DEFAULT_ENEMY_MAX_Y_OFFSET: f64 = 50.0;
pub const DEFAULT_ENEMY_SCORE: u64 = 10;

/// Burst parameters, for both spontaneous and patterned bursts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstProfile {
    pub cooldown_ms: f64,
    pub chance_per_second: f64,
    pub speed: f64,
    pub duration_min_ms: i64,
    pub duration_max_ms: i64,
    pub target_player_chance: f64,
}

impl BurstProfile {
    fn from_data(data: &BurstData) -> Self {
        Self {
            cooldown_ms: nonzero_or(data.cooldown, DEFAULT_BURST_COOLDOWN_MS),
            chance_per_second: nonzero_or(
                data.chance_per_second,
                DEFAULT_BURST_CHANCE_PER_SECOND,
            ),
            speed: nonzero_or(data.speed, DEFAULT_BURST_SPEED),
            duration_min_ms: nonzero(data.duration_min)
                .map_or(DEFAULT_BURST_DURATION_MS.0, |v| v as i64),
            duration_max_ms: nonzero(data.duration_max)
                .map_or(DEFAULT_BURST_DURATION_MS.1, |v| v as i64),
            target_player_chance: nonzero_or(
                data.target_player_chance,
                DEFAULT_BURST_TARGET_CHANCE,
            ),
        }
    }
}

/// How the boss moves between bursts.
#[derive(Debug, Clone, PartialEq)]
pub enum MovementPattern {
    /// No movement data: the boss holds still.
    Still,
    /// Wander to random points of a patrol area.
    AreaPatrol { width: Option<f64>, height: Option<f64> },
    /// Sweep left and right around the spawn point.
    HorizontalPatrol { distance: f64 },
    /// Alternate bursts and pauses.
    RandomBurst { burst: BurstProfile, pause_ms: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementProfile {
    pub kind: Option<BossMovementKind>,
    pub base_speed: f64,
    pub pattern: MovementPattern,
    /// Spontaneous bursts layered on top of the pattern.
    pub spontaneous_burst: Option<BurstProfile>,
}

/// Concrete attack parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPattern {
    Spray {
        count: u32,
        spread_deg: f64,
        speed: f64,
        damage: f64,
    },
    Large {
        speed: f64,
        damage: f64,
    },
    Barrage {
        volleys: u32,
        delay_ms: f64,
        per_volley: u32,
        speed: f64,
        damage: f64,
    },
    Inert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackProfile {
    pub id: String,
    pub name: String,
    pub cooldown_ms: f64,
    pub weight: f64,
    pub pattern: AttackPattern,
}

impl AttackProfile {
    pub fn kind(&self) -> BossAttackKind {
        match self.pattern {
            AttackPattern::Spray { .. } => BossAttackKind::ProjectileSpray,
            AttackPattern::Large { .. } => BossAttackKind::SpecialProjectileLarge,
            AttackPattern::Barrage { .. } => BossAttackKind::ProjectileBarrage,
            AttackPattern::Inert => BossAttackKind::Inert,
        }
    }
}

/// Everything the boss brain needs, resolved once at spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BossProfile {
    pub hp: f64,
    pub score_value: u64,
    pub movement: MovementProfile,
    pub attacks: Vec<AttackProfile>,
}

pub fn boss_profile(data: &BossData) -> BossProfile {
    let movement = match &data.movement {
        None => MovementProfile {
            kind: None,
            base_speed: DEFAULT_BOSS_SPEED,
            pattern: MovementPattern::Still,
            spontaneous_burst: None,
        },
        Some(m) => {
            let base_speed = nonzero_or(m.base_speed, DEFAULT_BOSS_SPEED);
            let pattern = match m.kind {
                BossMovementKind::DynamicPatrolBurst => match m.patrol_area {
                    Some(PatrolArea { width, height }) => MovementPattern::AreaPatrol {
                        width: nonzero(width),
                        height: nonzero(height),
                    },
                    None => MovementPattern::HorizontalPatrol {
                        distance: nonzero_or(m.patrol_distance, DEFAULT_PATROL_DISTANCE),
                    },
                },
                BossMovementKind::PatrolHorizontal => MovementPattern::HorizontalPatrol {
                    distance: nonzero_or(m.patrol_distance, DEFAULT_PATROL_DISTANCE),
                },
                BossMovementKind::RandomBurst | BossMovementKind::RandomBurstAggressive => {
                    let target_player_chance =
                        if m.kind == BossMovementKind::RandomBurstAggressive {
                            AGGRESSIVE_BURST_TARGET_CHANCE
                        } else {
                            RANDOM_BURST_TARGET_CHANCE
                        };
                    let fixed = nonzero(m.burst_duration).map(|d| d as i64);
                    MovementPattern::RandomBurst {
                        burst: BurstProfile {
                            cooldown_ms: 0.0,
                            chance_per_second: 0.0,
                            speed: nonzero_or(m.speed, base_speed * 2.0),
                            duration_min_ms: fixed.unwrap_or(RANDOM_BURST_DURATION_MS.0),
                            duration_max_ms: fixed.unwrap_or(RANDOM_BURST_DURATION_MS.1),
                            target_player_chance,
                        },
                        pause_ms: nonzero_or(m.pause_duration, RANDOM_BURST_PAUSE_MS),
                    }
                }
                BossMovementKind::Stationary => MovementPattern::Still,
            };
            MovementProfile {
                kind: Some(m.kind),
                base_speed,
                pattern,
                spontaneous_burst: m.burst.as_ref().map(BurstProfile::from_data),
            }
        }
    };

    BossProfile {
        hp: nonzero_or(data.hp, DEFAULT_BOSS_HP),
        score_value: nonzero_or(data.score_value, DEFAULT_BOSS_SCORE),
        movement,
        attacks: data.attacks.iter().map(attack_profile).collect(),
    }
}

pub fn attack_profile(data: &BossAttackData) -> AttackProfile {
    let pattern = match data.kind {
        BossAttackKind::ProjectileSpray => AttackPattern::Spray {
            count: nonzero_or(data.projectile_count, 5),
            spread_deg: nonzero_or(data.spread_angle, 60.0),
            speed: nonzero_or(data.projectile_speed, 250.0),
            damage: nonzero_or(data.damage, 10.0),
        },
        BossAttackKind::SpecialProjectileLarge => AttackPattern::Large {
            speed: nonzero_or(data.projectile_speed, 150.0),
            damage: nonzero_or(data.damage, 30.0),
        },
        BossAttackKind::ProjectileBarrage => AttackPattern::Barrage {
            volleys: nonzero_or(data.barrage_count, 3),
            delay_ms: nonzero_or(data.barrage_delay, 300.0),
            per_volley: nonzero_or(data.projectile_count, 3),
            speed: nonzero_or(data.projectile_speed, 300.0),
            damage: nonzero_or(data.damage, 8.0),
        },
        BossAttackKind::Inert => AttackPattern::Inert,
    };
    AttackProfile {
        id: data.id.clone(),
        name: data.name.clone().unwrap_or_else(|| data.id.clone()),
        cooldown_ms: data.cooldown,
        weight: nonzero_or(data.weight, 1.0),
        pattern,
    }
}

/// A freshly rolled enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProfile {
    pub hp: f64,
    pub score_value: u64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub speed_x_range: Option<[i64; 2]>,
    pub min_y: f64,
    pub max_y: f64,
    pub shoot_cooldown_ms: f64,
    pub bullet_damage: f64,
}

/// Roll the random parts of an enemy archetype.
pub fn enemy_profile<R: Rng + ?Sized>(data: &EnemyData, rng: &mut R) -> EnemyProfile {
    let speed_y = nonzero(data.speed_y).unwrap_or_else(|| {
        between(rng, DEFAULT_ENEMY_SPEED_Y.0, DEFAULT_ENEMY_SPEED_Y.1) as f64
    });
    let (lo, hi) = data
        .speed_x_range
        .map_or(DEFAULT_ENEMY_SPEED_X, |[lo, hi]| (lo, hi));
    let speed_x = between(rng, lo, hi) as f64 * sign(rng);
    let shoot_cooldown_ms = nonzero(data.shoot_cooldown).unwrap_or_else(|| {
        between(
            rng,
            DEFAULT_ENEMY_SHOOT_COOLDOWN_MS.0,
            DEFAULT_ENEMY_SHOOT_COOLDOWN_MS.1,
        ) as f64
    });

    EnemyProfile {
        hp: nonzero_or(data.hp, DEFAULT_ENEMY_HP),
        score_value: nonzero_or(data.score_value, DEFAULT_ENEMY_SCORE),
        speed_x,
        speed_y,
        speed_x_range: data.speed_x_range,
        min_y: nonzero_or(data.min_y_offset, DEFAULT_ENEMY_MIN_Y),
        max_y: WORLD_HEIGHT / 2.0 + nonzero_or(data.max_y_offset, DEFAULT_ENEMY_MAX_Y_OFFSET),
        shoot_cooldown_ms,
        bullet_damage: nonzero_or(data.bullet_damage, DEFAULT_ENEMY_BULLET_DAMAGE),
    }
}
