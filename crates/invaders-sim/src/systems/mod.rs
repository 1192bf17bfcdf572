//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` when
//! read-only). They do not own state; all state lives in components, the
//! timeline or the wave director.

pub mod boss_ai;
pub mod bounds;
pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod skills;
pub mod snapshot;
pub mod status;
