//! Simulation constants and tuning parameters.
//!
//! Content parameters (hp, cooldowns, wave layouts) come from game data;
//! these are the values the game data never overrides.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Version shown on the results screen.
pub const GAME_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Milliseconds per tick.
pub const DT_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Playfield ---

pub const WORLD_WIDTH: f64 = 1400.0;
pub const WORLD_HEIGHT: f64 = 800.0;

/// Projectiles further than this outside the playfield are culled.
pub const OFFSCREEN_MARGIN: f64 = 64.0;

/// World loaded when the config does not name one.
pub const DEFAULT_WORLD_ID: &str = "cafeteria";

/// Character started from the main menu shortcut.
pub const DEFAULT_CHARACTER_ID: &str = "leo";

/// Enemy type used when a wave names an unknown one.
pub const FALLBACK_ENEMY_KEY: &str = "cliche_iceberg_1";

// --- Sprite sizes (placeholder textures) ---

pub const PLAYER_SIZE: (f64, f64) = (32.0, 32.0);
pub const PLAYER_BULLET_SIZE: (f64, f64) = (8.0, 16.0);
pub const SANDWICH_SIZE: (f64, f64) = (16.0, 16.0);
pub const ENEMY_SIZE: (f64, f64) = (32.0, 32.0);
pub const ENEMY_BULLET_SIZE: (f64, f64) = (8.0, 16.0);
pub const BOSS_SIZE: (f64, f64) = (64.0, 64.0);
pub const BOSS_PROJECTILE_SIZE: (f64, f64) = (12.0, 12.0);

/// Circle bodies use this fraction of the sprite width as radius.
pub const ROUND_BODY_FACTOR: f64 = 0.4;

/// Large boss projectiles use this fraction of the sprite size as body.
pub const LARGE_BODY_FACTOR: f64 = 0.8;

/// Scale applied to large boss projectile sprites.
pub const LARGE_PROJECTILE_SCALE: f64 = 2.5;

// --- Player ---

/// Distance from the bottom edge at which the player spawns.
pub const PLAYER_SPAWN_OFFSET: f64 = 50.0;

/// Gap kept between the player and the bottom edge.
pub const PLAYER_BOTTOM_GAP: f64 = 10.0;

pub const PLAYER_BULLET_SPEED: f64 = 600.0;
pub const PLAYER_BULLET_DAMAGE: f64 = 10.0;
pub const PLAYER_BULLET_POOL: usize = 30;

pub const SANDWICH_SPEED: f64 = 400.0;

/// Number of skill key slots (A, Z, E).
pub const SKILL_SLOTS: usize = 3;
pub const SKILL_KEY_LABELS: [&str; SKILL_SLOTS] = ["A", "Z", "E"];

/// Screen flash on skill activation (ms).
pub const SKILL_FLASH_MS: f64 = 50.0;

/// Screen flash when the player is hit (ms).
pub const DAMAGE_FLASH_MS: f64 = 100.0;

/// Shoot delay jitter of the enemy kept by le_cagibi (ms).
pub const CAGIBI_SHOOT_JITTER_MS: i64 = 200;

/// Damage the player takes when rammed by an enemy.
pub const CONTACT_DAMAGE_TO_PLAYER: f64 = 15.0;

/// Damage an enemy takes when it rams the player.
pub const CONTACT_DAMAGE_TO_ENEMY: f64 = 1000.0;

// --- Enemies ---

pub const ENEMY_SPAWN_MARGIN_X: i64 = 100;
pub const ENEMY_SPAWN_Y: (i64, i64) = (-80, -40);
pub const ENEMY_BULLET_SPEED: f64 = 300.0;
pub const ENEMY_BULLET_SPEED_JITTER: i64 = 30;
pub const ENEMY_BULLET_POOL: usize = 50;

/// Enemies below `WORLD_HEIGHT + height + ENEMY_EXIT_MARGIN` leave the game.
pub const ENEMY_EXIT_MARGIN: f64 = 20.0;

/// Hp multiplier for elite kill-count waves.
pub const ELITE_HP_MULTIPLIER: f64 = 1.5;

// --- Boss ---

pub const BOSS_SPAWN: (f64, f64) = (WORLD_WIDTH / 2.0, 150.0);
pub const BOSS_MIN_Y: f64 = 50.0;
pub const BOSS_BAND_MARGIN: f64 = 20.0;
pub const BOSS_PROJECTILE_POOL: usize = 50;

/// Boss id whose fight changes the le_cagibi skill.
pub const CAGIBI_RIVAL_BOSS: &str = "nico";

// --- Wave pacing (ms) ---

pub const WAVE_CLEAR_DELAY_MS: f64 = 1500.0;
pub const BOSS_DEFEAT_DELAY_MS: f64 = 1000.0;
pub const UNKNOWN_WAVE_DELAY_MS: f64 = 1000.0;
pub const RESULTS_DELAY_MS: f64 = 1500.0;
pub const DEFAULT_SPAWN_DELAY_MS: f64 = 800.0;
pub const DEFAULT_SPAWN_INTERVAL_MS: f64 = 2000.0;

// --- Rewards ---

/// Coins awarded per point of score.
pub const COINS_PER_POINT: f64 = 0.1;
