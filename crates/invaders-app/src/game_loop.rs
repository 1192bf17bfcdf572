//! Game loop thread.
//!
//! Runs the engine at 60Hz (scaled by the engine's time scale), feeding it
//! commands from an `mpsc` channel and leaving the newest snapshot in a
//! shared slot for whoever polls it.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use invaders_core::constants::TICK_RATE;
use invaders_core::state::GameStateSnapshot;
use invaders_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Move `engine` onto a named thread and start ticking.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("manu-invaders-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Wall-clock duration of one tick at the given time scale.
pub fn tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// Drains commands, ticks, publishes, then sleeps until the next tick is due.
/// Exits on `Shutdown` or when every sender is gone.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(time_scale = engine.time_scale(), "game loop started");
    let mut deadline = Instant::now();

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // Paused and menu phases still tick so the snapshot stays fresh.
        let snapshot = engine.tick();
        match latest_snapshot.lock() {
            Ok(mut slot) => *slot = Some(snapshot),
            Err(_) => {
                warn!("snapshot slot poisoned, stopping game loop");
                return;
            }
        }

        let step = tick_duration(engine.time_scale());
        deadline += step;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        } else if now - deadline > step * 2 {
            debug!(behind_ms = (now - deadline).as_millis() as u64, "game loop behind, resetting clock");
            deadline = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::commands::PlayerCommand;
    use invaders_core::enums::GamePhase;
    use invaders_sim::SimConfig;

    fn engine() -> SimulationEngine {
        SimulationEngine::with_builtin_data(SimConfig::default()).unwrap()
    }

    fn wait_for_phase(
        latest: &Mutex<Option<GameStateSnapshot>>,
        phase: GamePhase,
    ) -> Option<GameStateSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snap) = latest.lock().unwrap().clone() {
                if snap.phase == phase {
                    return Some(snap);
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_busy_snapshot_serializes() {
        let mut engine = engine();
        engine.queue_command(PlayerCommand::StartGame { character_id: None });
        // Five seconds in: first wave enemies and their shots are on screen.
        for _ in 0..300 {
            engine.tick();
        }

        let snapshot = engine.tick();
        assert!(!snapshot.enemies.is_empty());
        let json = serde_json::to_string(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["enemies"].as_array().map(Vec::len),
            Some(snapshot.enemies.len())
        );
        assert!(value.get("projectiles").is_some());
    }

    #[test]
    fn test_loop_thread_publishes_and_stops() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(engine(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame {
            character_id: Some("clement".into()),
        }))
        .unwrap();

        let snap = wait_for_phase(&latest, GamePhase::Active).expect("loop never started the game");
        assert!(snap.player.is_some());

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_paused_loop_keeps_publishing_without_advancing_time() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(engine(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame { character_id: None }))
            .unwrap();
        wait_for_phase(&latest, GamePhase::Active).expect("game did not start");

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause)).unwrap();
        let paused = wait_for_phase(&latest, GamePhase::Paused).expect("game did not pause");
        std::thread::sleep(TICK_DURATION * 5);
        let later = latest.lock().unwrap().clone().unwrap();
        assert_eq!(later.phase, GamePhase::Paused);
        assert_eq!(later.time.tick, paused.time.tick);

        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_tick_duration_scales() {
        assert_eq!(TICK_DURATION.as_nanos(), 1_000_000_000u128 / 60);
        assert_eq!(tick_duration(0.0), TICK_DURATION);
        assert!(tick_duration(4.0) < TICK_DURATION / 3);
        assert!(tick_duration(0.5) > TICK_DURATION);
    }
}
