//! Wave director: sequences a world's pre-authored waves.
//!
//! The director owns wave progress (index, stage, kills versus target) and
//! the end-of-game flag. It never runs on its own; the engine calls it when
//! a game starts, when a timeline action addressed to it comes due, and once
//! per tick after combat to settle kills and check wave completion.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use invaders_core::components::Player;
use invaders_core::constants::*;
use invaders_core::enums::{GameOutcome, WaveKind, WaveStage};
use invaders_core::events::GameEvent;
use invaders_core::gamedata::{nonzero_or, GameData, WaveData, WorldData};
use invaders_core::state::WaveView;

use crate::scoring::{BossDefeat, KillRecord, ScoreState};
use crate::timeline::{ScheduledAction, Timeline};
use crate::world_setup;

/// Everything the director may touch while it acts.
pub struct WaveContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub timeline: &'a mut Timeline,
    pub events: &'a mut Vec<GameEvent>,
    pub score: &'a mut ScoreState,
    pub data: &'a GameData,
    pub now_ms: f64,
}

/// Progress through the waves of one world.
#[derive(Debug, Clone, Default)]
pub struct WaveDirector {
    waves: Vec<WaveData>,
    index: Option<usize>,
    stage: WaveStage,
    kills: u32,
    target: u32,
    label: String,
    /// End of the current survival wave's spawn phase.
    survival_end_ms: Option<f64>,
    boss_alive: bool,
    game_ended: bool,
    outcome: Option<GameOutcome>,
}

impl WaveDirector {
    pub fn new(world: &WorldData) -> Self {
        Self {
            waves: world.waves.clone(),
            ..Self::default()
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn stage(&self) -> WaveStage {
        self.stage
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total_waves(&self) -> usize {
        self.waves.len()
    }

    pub fn boss_alive(&self) -> bool {
        self.boss_alive
    }

    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    fn current_wave(&self) -> Option<&WaveData> {
        self.index.and_then(|i| self.waves.get(i))
    }

    fn is_last_wave(&self) -> bool {
        self.index
            .is_some_and(|i| i + 1 >= self.waves.len())
    }

    /// Advance to the next wave and set it up.
    pub fn start_next_wave(&mut self, ctx: &mut WaveContext<'_>) {
        if self.game_ended {
            return;
        }
        if self.boss_alive {
            debug!("boss still alive, next wave held back");
            return;
        }

        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        self.kills = 0;
        self.target = 0;
        self.survival_end_ms = None;

        let Some(wave) = self.waves.get(next).cloned() else {
            info!(waves = self.waves.len(), "world complete");
            self.stage = WaveStage::Complete;
            ctx.events.push(GameEvent::WorldComplete);
            self.end_game(true, ctx);
            return;
        };

        let number = next + 1;
        self.label = format!("VAGUE {}: {}", number, kind_label(wave.kind()));

        match &wave {
            WaveData::KillCount {
                count, spawn_delay, ..
            } => {
                self.stage = WaveStage::Spawning;
                self.target = *count;
                let delay = nonzero_or(*spawn_delay, DEFAULT_SPAWN_DELAY_MS);
                for i in 0..*count {
                    ctx.timeline.schedule_after(
                        ctx.now_ms,
                        i as f64 * delay,
                        ScheduledAction::SpawnEnemy { wave: next },
                    );
                }
                self.announce(next, &wave, ctx);
            }
            WaveData::TimedSurvival {
                duration,
                spawn_interval,
                ..
            } => {
                self.stage = WaveStage::Spawning;
                self.label = format!("VAGUE {}: SURVIE - SPAWN", number);
                self.survival_end_ms = Some(ctx.now_ms + duration);
                let interval = nonzero_or(*spawn_interval, DEFAULT_SPAWN_INTERVAL_MS);
                ctx.timeline.schedule_after(
                    ctx.now_ms,
                    interval,
                    ScheduledAction::SurvivalPulse { wave: next },
                );
                ctx.timeline.schedule_after(
                    ctx.now_ms,
                    *duration,
                    ScheduledAction::EndSurvivalSpawn { wave: next },
                );
                self.announce(next, &wave, ctx);
            }
            WaveData::BossFight { boss_id } => {
                let data = ctx.data;
                match data.boss(boss_id) {
                    Some(boss) => {
                        world_setup::clear_enemies(ctx.world);
                        world_setup::spawn_boss(ctx.world, ctx.rng, boss, ctx.now_ms);
                        self.boss_alive = true;
                        self.stage = WaveStage::Boss;
                        self.label = format!("BOSS: {}", boss.name.to_uppercase());
                        self.announce(next, &wave, ctx);
                        ctx.events.push(GameEvent::BossSpawned {
                            boss_id: boss.id.clone(),
                            name: boss.name.clone(),
                        });
                        info!(boss = %boss.id, "boss spawned");
                    }
                    None => {
                        warn!(boss = %boss_id, "boss missing from game data, skipping wave");
                        self.announce(next, &wave, ctx);
                        self.start_next_wave(ctx);
                    }
                }
            }
            WaveData::Unknown => {
                warn!(wave = number, "unknown wave type, skipping");
                self.stage = WaveStage::Intermission;
                self.announce(next, &wave, ctx);
                ctx.timeline.schedule_after(
                    ctx.now_ms,
                    UNKNOWN_WAVE_DELAY_MS,
                    ScheduledAction::NextWave,
                );
            }
        }
    }

    fn announce(&self, index: usize, wave: &WaveData, ctx: &mut WaveContext<'_>) {
        info!(wave = index + 1, kind = ?wave.kind(), "wave started");
        ctx.events.push(GameEvent::WaveStarted {
            index,
            kind: wave.kind(),
            label: self.label.clone(),
        });
    }

    /// Carry out a timeline action addressed to the director.
    pub fn handle(&mut self, action: &ScheduledAction, ctx: &mut WaveContext<'_>) {
        match *action {
            ScheduledAction::NextWave => self.start_next_wave(ctx),
            ScheduledAction::SpawnEnemy { wave } => {
                if self.accepts(wave) {
                    self.spawn_wave_enemy(wave, ctx);
                }
            }
            ScheduledAction::SurvivalPulse { wave } => {
                if !self.accepts(wave) || self.stage != WaveStage::Spawning {
                    return;
                }
                if self.survival_end_ms.is_some_and(|end| ctx.now_ms >= end) {
                    return;
                }
                let (per_pulse, interval) = match self.waves.get(wave) {
                    Some(WaveData::TimedSurvival {
                        enemies_per_interval,
                        spawn_interval,
                        ..
                    }) => (
                        nonzero_or(*enemies_per_interval, 1),
                        nonzero_or(*spawn_interval, DEFAULT_SPAWN_INTERVAL_MS),
                    ),
                    _ => return,
                };
                for _ in 0..per_pulse {
                    self.spawn_wave_enemy(wave, ctx);
                }
                ctx.timeline.schedule_after(
                    ctx.now_ms,
                    interval,
                    ScheduledAction::SurvivalPulse { wave },
                );
            }
            ScheduledAction::EndSurvivalSpawn { wave } => {
                if !self.accepts(wave) || self.stage != WaveStage::Spawning {
                    return;
                }
                self.stage = WaveStage::Cleanup;
                self.label = format!("VAGUE {}: SURVIE - NETTOYAGE", wave + 1);
                ctx.events.push(GameEvent::SurvivalSpawnEnded { index: wave });
                if world_setup::active_enemy_count(ctx.world) == 0 {
                    debug!(wave = wave + 1, "nothing left to clean up");
                    ctx.events.push(GameEvent::WaveCleared { index: wave });
                    self.start_next_wave(ctx);
                } else {
                    debug!(wave = wave + 1, "survival spawn over, cleaning up");
                }
            }
            ScheduledAction::BarrageVolley { .. } | ScheduledAction::ShowResults => {}
        }
    }

    /// Spawns addressed to a stale wave, or arriving during a boss fight,
    /// are dropped.
    fn accepts(&self, wave: usize) -> bool {
        !self.game_ended && !self.boss_alive && self.index == Some(wave)
    }

    fn spawn_wave_enemy(&self, wave: usize, ctx: &mut WaveContext<'_>) {
        let (enemy_type, overrides, elite) = match self.waves.get(wave) {
            Some(WaveData::KillCount {
                enemy_type,
                enemy_config,
                elite,
                ..
            }) => (enemy_type.as_str(), enemy_config.as_ref(), *elite),
            Some(WaveData::TimedSurvival {
                enemy_type,
                enemy_config,
                ..
            }) => (enemy_type.as_str(), enemy_config.as_ref(), false),
            _ => return,
        };

        let data = ctx.data;
        let (key, base) = match data.enemies.get(enemy_type) {
            Some(base) => (enemy_type, base),
            None => match data.resolve_enemy(enemy_type) {
                Some(base) => {
                    warn!(enemy = %enemy_type, fallback = FALLBACK_ENEMY_KEY, "unknown enemy type");
                    (FALLBACK_ENEMY_KEY, base)
                }
                None => {
                    warn!(enemy = %enemy_type, "no enemy archetype available, spawn skipped");
                    return;
                }
            },
        };
        let config = match overrides {
            Some(overrides) => base.merged(overrides),
            None => base.clone(),
        };
        world_setup::spawn_enemy(ctx.world, ctx.rng, key, &config, elite);
    }

    /// Settle this tick's kills, boss defeat and player death, then check
    /// whether the current wave is over.
    pub fn run(
        &mut self,
        ctx: &mut WaveContext<'_>,
        kills: Vec<KillRecord>,
        boss_defeat: Option<BossDefeat>,
        player_died: bool,
    ) {
        for kill in kills {
            let points = ctx.score.record_kill(&kill);
            if !self.boss_alive {
                self.kills += 1;
            }
            ctx.events.push(GameEvent::EnemyKilled {
                enemy_type: kill.enemy_type,
                score: points,
            });
        }

        if let Some(defeat) = boss_defeat {
            ctx.score.record_boss(defeat.score_value);
            ctx.events.push(GameEvent::BossDefeated {
                boss_id: defeat.boss_id.clone(),
                score: defeat.score_value,
            });
            self.boss_alive = false;
            info!(boss = %defeat.boss_id, score = ctx.score.score, "boss defeated");

            if self.is_last_wave() {
                self.stage = WaveStage::Complete;
                self.end_game(true, ctx);
            } else {
                self.stage = WaveStage::Intermission;
                ctx.timeline.schedule_after(
                    ctx.now_ms,
                    BOSS_DEFEAT_DELAY_MS,
                    ScheduledAction::NextWave,
                );
            }
        }

        if player_died {
            self.end_game(false, ctx);
        }

        self.check_completion(ctx);
    }

    fn check_completion(&mut self, ctx: &mut WaveContext<'_>) {
        if self.game_ended {
            return;
        }
        let Some(index) = self.index else {
            return;
        };
        let Some(kind) = self.current_wave().map(WaveData::kind) else {
            return;
        };

        let active = world_setup::active_enemy_count(ctx.world);
        let cleared = match (kind, self.stage) {
            (WaveKind::KillCount, WaveStage::Spawning) => {
                let pending = ctx.timeline.count_pending(
                    |a| matches!(a, ScheduledAction::SpawnEnemy { wave } if *wave == index),
                );
                active == 0 && (self.kills >= self.target || pending == 0)
            }
            (WaveKind::TimedSurvival, WaveStage::Cleanup) => active == 0,
            _ => false,
        };

        if cleared {
            info!(wave = index + 1, kills = self.kills, "wave cleared");
            self.stage = WaveStage::Intermission;
            ctx.events.push(GameEvent::WaveCleared { index });
            ctx.timeline.schedule_after(
                ctx.now_ms,
                WAVE_CLEAR_DELAY_MS,
                ScheduledAction::NextWave,
            );
        }
    }

    /// End the game. Only the first call has any effect.
    pub fn end_game(&mut self, victory: bool, ctx: &mut WaveContext<'_>) {
        if self.game_ended {
            return;
        }
        self.game_ended = true;
        let outcome = if victory {
            GameOutcome::Victory
        } else {
            GameOutcome::Defeat
        };
        self.outcome = Some(outcome);

        for (_entity, player) in ctx.world.query_mut::<&mut Player>() {
            player.active = false;
        }

        ctx.events.push(GameEvent::GameEnded {
            outcome,
            score: ctx.score.score,
        });
        ctx.timeline.schedule_after(
            ctx.now_ms,
            RESULTS_DELAY_MS,
            ScheduledAction::ShowResults,
        );
        info!(?outcome, score = ctx.score.score, "game ended");
    }

    /// Wave banner for the snapshot.
    pub fn view(&self, now_ms: f64) -> Option<WaveView> {
        let index = self.index?;
        let shown = index.min(self.waves.len().checked_sub(1)?);
        let wave = self.waves.get(shown)?;
        let spawn_time_left_ms = self
            .survival_end_ms
            .filter(|_| self.stage == WaveStage::Spawning)
            .map(|end| (end - now_ms).max(0.0));

        Some(WaveView {
            index: shown,
            total: self.waves.len(),
            kind: wave.kind(),
            stage: self.stage,
            label: self.label.clone(),
            spawn_time_left_ms,
        })
    }
}

fn kind_label(kind: WaveKind) -> &'static str {
    match kind {
        WaveKind::KillCount => "KILL_COUNT",
        WaveKind::TimedSurvival => "TIMED_SURVIVAL",
        WaveKind::BossFight => "BOSS_FIGHT",
        WaveKind::Unknown => "UNKNOWN",
    }
}
