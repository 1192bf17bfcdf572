//! Simulation engine for Manu Invaders.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the front end.

pub mod director;
pub mod engine;
pub mod scoring;
pub mod systems;
pub mod timeline;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use invaders_core as core;

use invaders_core::error::GameDataError;

/// The engine could not be built from the given content.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Data(#[from] GameDataError),

    #[error("world '{0}' is not defined in the game data")]
    UnknownWorld(String),
}
