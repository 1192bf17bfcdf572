//! Boss and enemy AI for Manu Invaders.
//!
//! Pure decision functions: movement patterns, bursts, weighted attack
//! choice, spray geometry and enemy steering. No ECS dependency; callers
//! pass plain data and a random number generator.

pub mod boss;
pub mod enemy;
pub mod profiles;
pub mod random;

pub use invaders_core as core;

#[cfg(test)]
mod tests;
