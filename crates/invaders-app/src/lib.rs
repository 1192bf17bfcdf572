//! Manu Invaders headless runner.
//!
//! Wires the simulation crates to a game loop thread, a scripted pilot and
//! the coin wallet, and exposes them to the `manu-invaders` binary.

pub mod autopilot;
pub mod game_loop;
pub mod logging;
pub mod runner;
pub mod state;
pub mod wallet;

pub use invaders_core as core;
