//! Application state shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use invaders_core::commands::PlayerCommand;
use invaders_core::state::GameStateSnapshot;
use invaders_sim::SimulationEngine;

use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(thiserror::Error, Debug)]
pub enum LoopError {
    #[error("game loop already running")]
    AlreadyRunning,

    #[error("game loop not started")]
    NotStarted,

    #[error("game loop has stopped")]
    Disconnected,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("game loop thread panicked")]
    Panicked,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle on a running game loop.
///
/// - `command_tx` is `None` until `start` is called
/// - `latest_snapshot` is shared with the loop thread and updated every tick
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the engine onto its own thread and start ticking.
    pub fn start(&self, engine: SimulationEngine) -> Result<(), LoopError> {
        let mut running = self.running.lock().map_err(|_| LoopError::Poisoned)?;
        if *running {
            return Err(LoopError::AlreadyRunning);
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, self.latest_snapshot.clone())?;

        *self.command_tx.lock().map_err(|_| LoopError::Poisoned)? = Some(cmd_tx);
        *self.handle.lock().map_err(|_| LoopError::Poisoned)? = Some(handle);
        *running = true;
        Ok(())
    }

    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), LoopError> {
        let tx = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        match tx.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| LoopError::Disconnected),
            None => Err(LoopError::NotStarted),
        }
    }

    /// The most recent snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, LoopError> {
        let lock = self.latest_snapshot.lock().map_err(|_| LoopError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the loop and wait for its thread to exit. The loop counts as
    /// stopped even when its thread panicked.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        if let Some(tx) = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?.take() {
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        let joined = match self.handle.lock().map_err(|_| LoopError::Poisoned)?.take() {
            Some(handle) => handle.join().map_err(|_| LoopError::Panicked),
            None => Ok(()),
        };
        *self.running.lock().map_err(|_| LoopError::Poisoned)? = false;
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send(PlayerCommand::Pause).unwrap_err();
        assert!(matches!(err, LoopError::NotStarted));
    }

    #[test]
    fn test_shutdown_reports_panicked_loop() {
        let state = AppState::new();
        *state.handle.lock().unwrap() = Some(std::thread::spawn(|| panic!("tick failed")));
        *state.running.lock().unwrap() = true;

        let err = state.shutdown().unwrap_err();
        assert!(matches!(err, LoopError::Panicked));
        assert!(!*state.running.lock().unwrap());
        assert!(state.handle.lock().unwrap().is_none());
    }

    #[test]
    fn test_shutdown_without_start_is_noop() {
        let state = AppState::new();
        state.shutdown().unwrap();
        assert!(!*state.running.lock().unwrap());
    }
}
