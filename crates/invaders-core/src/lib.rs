//! Core types and definitions for the Manu Invaders simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, game data and constants.
//! It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod gamedata;
pub mod rewards;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
