//! Headless game runs: one game from start to results, driven by the
//! autopilot.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use invaders_core::commands::PlayerCommand;
use invaders_core::constants::{DEFAULT_WORLD_ID, TICK_RATE};
use invaders_core::enums::{GameOutcome, GamePhase};
use invaders_core::error::GameDataError;
use invaders_core::gamedata::GameData;
use invaders_core::state::GameStateSnapshot;
use invaders_sim::{SimConfig, SimError, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::game_loop;
use crate::state::{AppState, LoopError};
use crate::wallet::{self, WalletError};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Character to play. `None` plays the default character.
    pub character: Option<String>,
    pub seed: u64,
    pub world_id: String,
    /// Alternative game-data file. `None` uses the built-in content.
    pub data_path: Option<PathBuf>,
    /// Wallet to credit on the results screen.
    pub wallet_path: Option<PathBuf>,
    /// Give up after this many simulation ticks.
    pub max_ticks: u64,
    /// Run on the game loop thread at wall-clock pace instead of as fast as
    /// possible.
    pub realtime: bool,
    pub time_scale: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            character: None,
            seed: 42,
            world_id: DEFAULT_WORLD_ID.to_string(),
            data_path: None,
            wallet_path: None,
            max_ticks: u64::from(TICK_RATE) * 60 * 10,
            realtime: false,
            time_scale: 1.0,
        }
    }
}

/// What happened in a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub character: Option<String>,
    pub seed: u64,
    pub ticks: u64,
    /// `None` when the tick budget ran out first.
    pub outcome: Option<GameOutcome>,
    pub score: u64,
    pub coins_earned: u64,
    /// Wallet balance after crediting, when a wallet was given.
    pub wallet_total: Option<u64>,
    /// One-based number of the last wave reached.
    pub waves_reached: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Data(#[from] GameDataError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Loop(#[from] LoopError),

    #[error("cannot read game data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("game did not start with character '{0}'")]
    Rejected(String),
}

/// Load the content set a run will use.
pub fn load_data(path: Option<&PathBuf>) -> Result<GameData, RunError> {
    match path {
        Some(path) => Ok(GameData::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(GameData::builtin()?),
    }
}

/// Play one game with the autopilot.
pub fn run_headless(opts: &RunOptions) -> Result<RunSummary, RunError> {
    let data = load_data(opts.data_path.as_ref())?;
    let mut engine = SimulationEngine::new(
        SimConfig {
            seed: opts.seed,
            world_id: opts.world_id.clone(),
            time_scale: opts.time_scale,
        },
        data,
    )?;
    engine.set_time_scale(opts.time_scale);

    info!(
        seed = opts.seed,
        world = %opts.world_id,
        character = opts.character.as_deref().unwrap_or("default"),
        realtime = opts.realtime,
        "headless run"
    );

    let progress = if opts.realtime {
        drive_realtime(engine, opts)?
    } else {
        drive(engine, opts)?
    };

    let mut summary = RunSummary {
        character: opts.character.clone(),
        seed: opts.seed,
        ticks: progress.last.time.tick,
        outcome: None,
        score: progress.last.score,
        coins_earned: 0,
        wallet_total: None,
        waves_reached: progress.waves_reached,
    };

    match progress.last.results.as_ref() {
        Some(results) => {
            summary.outcome = Some(if results.victory {
                GameOutcome::Victory
            } else {
                GameOutcome::Defeat
            });
            summary.score = results.score;
            summary.coins_earned = results.coins_earned;
            if let Some(path) = &opts.wallet_path {
                summary.wallet_total = Some(wallet::credit(path, results.coins_earned)?);
            }
        }
        None => warn!(max_ticks = opts.max_ticks, "tick budget ran out before the results screen"),
    }

    info!(
        score = summary.score,
        coins = summary.coins_earned,
        ticks = summary.ticks,
        "run finished"
    );
    Ok(summary)
}

/// How long the game loop may take to accept the start command.
const START_TIMEOUT: Duration = Duration::from_secs(2);

struct Progress {
    last: GameStateSnapshot,
    waves_reached: usize,
}

impl Progress {
    fn observe(&mut self, snap: GameStateSnapshot) {
        if let Some(wave) = &snap.wave {
            self.waves_reached = self.waves_reached.max(wave.index + 1);
        }
        self.last = snap;
    }

    fn finished(&self, max_ticks: u64) -> bool {
        self.last.phase == GamePhase::Results || self.last.time.tick >= max_ticks
    }
}

fn start_command(opts: &RunOptions) -> PlayerCommand {
    PlayerCommand::StartGame {
        character_id: opts.character.clone(),
    }
}

fn rejected(opts: &RunOptions) -> RunError {
    RunError::Rejected(opts.character.clone().unwrap_or_default())
}

/// Tick the engine directly, as fast as possible.
fn drive(mut engine: SimulationEngine, opts: &RunOptions) -> Result<Progress, RunError> {
    let mut pilot = Autopilot::new();
    engine.queue_command(start_command(opts));

    let first = engine.tick();
    if first.phase != GamePhase::Active {
        return Err(rejected(opts));
    }
    let mut progress = Progress {
        last: GameStateSnapshot::default(),
        waves_reached: 0,
    };
    progress.observe(first);

    while !progress.finished(opts.max_ticks) {
        engine.queue_command(PlayerCommand::SetInput(pilot.steer(&progress.last)));
        progress.observe(engine.tick());
    }
    Ok(progress)
}

/// Run on the game loop thread and poll its snapshots.
fn drive_realtime(engine: SimulationEngine, opts: &RunOptions) -> Result<Progress, RunError> {
    let state = AppState::new();
    state.start(engine)?;
    state.send(start_command(opts))?;

    let result = poll_loop(&state, opts);
    state.shutdown()?;
    result
}

fn poll_loop(state: &AppState, opts: &RunOptions) -> Result<Progress, RunError> {
    let mut pilot = Autopilot::new();
    let mut progress = Progress {
        last: GameStateSnapshot::default(),
        waves_reached: 0,
    };
    let poll = game_loop::tick_duration(opts.time_scale);
    let start_deadline = Instant::now() + START_TIMEOUT;
    let mut started = false;

    loop {
        std::thread::sleep(poll);
        let Some(snap) = state.snapshot()? else {
            continue;
        };
        if !started {
            if snap.phase == GamePhase::MainMenu {
                if Instant::now() > start_deadline {
                    return Err(rejected(opts));
                }
                continue;
            }
            started = true;
        }
        state.send(PlayerCommand::SetInput(pilot.steer(&snap)))?;
        progress.observe(snap);
        if progress.finished(opts.max_ticks) {
            return Ok(progress);
        }
    }
}
