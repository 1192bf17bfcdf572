//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use invaders_core::commands::{InputState, PlayerCommand};
use invaders_core::constants::{DEFAULT_CHARACTER_ID, DEFAULT_WORLD_ID, DT_MS, GAME_VERSION};
use invaders_core::enums::{GameOutcome, GamePhase};
use invaders_core::events::GameEvent;
use invaders_core::gamedata::GameData;
use invaders_core::state::{CharacterCard, CharacterSelectView, GameStateSnapshot, ResultsView};
use invaders_core::types::SimTime;

use crate::director::{WaveContext, WaveDirector};
use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::snapshot::SnapshotInputs;
use crate::timeline::{ScheduledAction, Timeline};
use crate::world_setup;
use crate::SimError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// World whose waves are played.
    pub world_id: String,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_id: DEFAULT_WORLD_ID.to_string(),
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    data: GameData,
    world_id: String,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,

    timeline: Timeline,
    director: WaveDirector,
    score: ScoreState,
    input: InputState,
    /// Highlighted card on the character selection screen.
    selected: usize,
}

impl SimulationEngine {
    /// Create an engine over the given content. Fails if the content is
    /// invalid or does not contain the configured world.
    pub fn new(config: SimConfig, data: GameData) -> Result<Self, SimError> {
        data.validate()?;
        if data.world(&config.world_id).is_none() {
            return Err(SimError::UnknownWorld(config.world_id));
        }

        Ok(Self {
            world: World::new(),
            data,
            world_id: config.world_id,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            timeline: Timeline::new(),
            director: WaveDirector::default(),
            score: ScoreState::default(),
            input: InputState::default(),
            selected: 0,
        })
    }

    /// Create an engine over the embedded content set.
    pub fn with_builtin_data(config: SimConfig) -> Result<Self, SimError> {
        Self::new(config, GameData::builtin()?)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        match self.phase {
            GamePhase::Active => {
                self.run_systems();
                self.time.advance();
                if self.director.game_ended() && self.phase == GamePhase::Active {
                    self.phase = GamePhase::Ending;
                    info!(tick = self.time.tick, "entering ending phase");
                }
            }
            GamePhase::Ending => {
                self.run_ending();
                self.time.advance();
            }
            _ => {}
        }

        let inputs = SnapshotInputs {
            phase: self.phase,
            score: self.score.score,
            wave: self.director.view(self.time.elapsed_ms),
            events: std::mem::take(&mut self.events),
            character_select: self.character_select_view(),
            results: self.results_view(),
        };
        systems::snapshot::build_snapshot(&self.world, &self.time, inputs)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Change the time scale used by the game loop. Clamped to [0, 4].
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.clamp(0.0, 4.0);
    }

    /// Get the running score.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the content set the engine plays.
    pub fn data(&self) -> &GameData {
        &self.data
    }

    /// How the last game ended, once it has.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.director.outcome()
    }

    /// Get the wave director.
    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    /// Mutable world access for tests that stage a situation directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::OpenCharacterSelect => {
                if self.phase == GamePhase::MainMenu {
                    self.selected = 0;
                    self.phase = GamePhase::CharacterSelect;
                    info!("character select");
                } else {
                    self.reject("open character select");
                }
            }
            PlayerCommand::CycleCharacter { direction } => {
                if self.phase == GamePhase::CharacterSelect {
                    let count = self.data.selectable_characters().len() as i64;
                    if count > 0 {
                        self.selected =
                            (self.selected as i64 + direction as i64).rem_euclid(count) as usize;
                    }
                } else {
                    self.reject("cycle character");
                }
            }
            PlayerCommand::StartGame { character_id } => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::CharacterSelect) {
                    let id = character_id.unwrap_or_else(|| self.default_character());
                    self.start_game(&id);
                } else {
                    self.reject("start game");
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase == GamePhase::Results {
                    self.reset();
                    self.phase = GamePhase::MainMenu;
                    info!("main menu");
                } else {
                    self.reject("return to menu");
                }
            }
            PlayerCommand::SetInput(input) => {
                self.input = input;
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                } else {
                    self.reject("pause");
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                } else {
                    self.reject("resume");
                }
            }
        }
    }

    /// A command that does not apply in the current phase. The state is
    /// left untouched.
    fn reject(&self, command: &str) {
        warn!(command, phase = ?self.phase, "command ignored in this phase");
    }

    /// Character used when StartGame names none: the highlighted card on
    /// the selection screen, the default character from the main menu.
    fn default_character(&self) -> String {
        if self.phase == GamePhase::CharacterSelect {
            if let Some(character) = self.data.selectable_characters().get(self.selected) {
                return character.id.clone();
            }
        }
        DEFAULT_CHARACTER_ID.to_string()
    }

    fn start_game(&mut self, character_id: &str) {
        let Some(character) = self.data.character(character_id).cloned() else {
            warn!(character = character_id, "unknown character, start rejected");
            return;
        };
        let Some(director) = self.data.world(&self.world_id).map(WaveDirector::new) else {
            warn!(world = %self.world_id, "unknown world, start rejected");
            return;
        };

        self.reset();
        self.director = director;
        world_setup::spawn_player(&mut self.world, &character);
        self.phase = GamePhase::Active;
        info!(character = %character.id, world = %self.world_id, "game started");

        let mut ctx = WaveContext {
            world: &mut self.world,
            rng: &mut self.rng,
            timeline: &mut self.timeline,
            events: &mut self.events,
            score: &mut self.score,
            data: &self.data,
            now_ms: self.time.elapsed_ms,
        };
        self.director.start_next_wave(&mut ctx);
    }

    /// Drop every entity and all per-game state.
    fn reset(&mut self) {
        self.world.clear();
        self.timeline.clear();
        self.director = WaveDirector::default();
        self.score = ScoreState::default();
        self.input = InputState::default();
        self.time = SimTime::default();
    }

    /// Fire every timeline action that has come due.
    fn run_timeline(&mut self, now_ms: f64) {
        for action in self.timeline.drain_due(now_ms) {
            match action {
                ScheduledAction::ShowResults => {
                    self.phase = GamePhase::Results;
                    info!(score = self.score.score, "results");
                }
                ScheduledAction::BarrageVolley { boss, attack } => {
                    systems::boss_ai::fire_volley(&mut self.world, &mut self.rng, boss, attack);
                }
                other => {
                    let mut ctx = WaveContext {
                        world: &mut self.world,
                        rng: &mut self.rng,
                        timeline: &mut self.timeline,
                        events: &mut self.events,
                        score: &mut self.score,
                        data: &self.data,
                        now_ms,
                    };
                    self.director.handle(&other, &mut ctx);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.elapsed_ms;
        let mut kills = Vec::new();

        // 1. Scheduled spawns, waves and volleys
        self.run_timeline(now_ms);
        // 2. Player movement, shooting and skill triggers
        systems::player::run(&mut self.world, &self.input, now_ms);
        // 3. Skill activation and expiry
        systems::skills::run(
            &mut self.world,
            &mut self.rng,
            &mut self.events,
            &mut kills,
            self.input.pointer,
            now_ms,
        );
        // 4. Enemy status effects and DoT
        systems::status::run(&mut self.world, &mut self.rng, now_ms, DT_MS, &mut kills);
        // 5. Enemy AI
        systems::enemy_ai::run(&mut self.world, &mut self.rng, DT_MS);
        // 6. Boss AI
        systems::boss_ai::run(
            &mut self.world,
            &mut self.rng,
            &mut self.timeline,
            &mut self.events,
            now_ms,
            DT_MS,
        );
        // 7. Movement integration
        systems::movement::run(&mut self.world);
        // 8. Playfield bounds
        systems::bounds::run(&mut self.world, now_ms);
        // 9. Collisions
        let report = systems::combat::run(&mut self.world, &mut self.events, &mut kills, now_ms);
        // 10. Kill accounting and wave completion
        let mut ctx = WaveContext {
            world: &mut self.world,
            rng: &mut self.rng,
            timeline: &mut self.timeline,
            events: &mut self.events,
            score: &mut self.score,
            data: &self.data,
            now_ms,
        };
        self.director
            .run(&mut ctx, kills, report.boss_defeat, report.player_died);
        // 11. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// While the end-of-game delay runs, projectiles keep flying but
    /// nothing else acts.
    fn run_ending(&mut self) {
        let now_ms = self.time.elapsed_ms;
        self.run_timeline(now_ms);
        systems::movement::run(&mut self.world);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn character_select_view(&self) -> Option<CharacterSelectView> {
        if self.phase != GamePhase::CharacterSelect {
            return None;
        }
        let characters = self
            .data
            .selectable_characters()
            .into_iter()
            .map(|c| CharacterCard {
                id: c.id.clone(),
                name: c.name.clone(),
                description: c.description.clone().unwrap_or_default(),
                skill_lines: c.skills.iter().map(|s| format!("- {}", s.name)).collect(),
            })
            .collect();
        Some(CharacterSelectView {
            characters,
            selected: self.selected,
        })
    }

    fn results_view(&self) -> Option<ResultsView> {
        if self.phase != GamePhase::Results {
            return None;
        }
        Some(ResultsView {
            score: self.score.score,
            victory: self.outcome().is_some_and(GameOutcome::is_victory),
            coins_earned: self.score.coins(),
            version: GAME_VERSION.to_string(),
        })
    }
}
