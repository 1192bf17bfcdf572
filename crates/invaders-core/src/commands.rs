//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. A command
//! that does not apply in the current phase is ignored.

use serde::{Deserialize, Serialize};

use crate::constants::SKILL_SLOTS;
use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Menus ---
    /// Open the character selection screen from the main menu.
    OpenCharacterSelect,
    /// Move the selection highlight. Negative goes left, positive right.
    CycleCharacter { direction: i32 },
    /// Start a game. Without an id the highlighted (or default) character
    /// is used.
    StartGame { character_id: Option<String> },
    /// Return to the main menu from the results screen.
    ReturnToMenu,

    // --- In game ---
    /// Replace the held-key state.
    SetInput(InputState),
    Pause,
    Resume,
}

/// Which controls are currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    /// Skill keys A, Z and E.
    pub skills: [bool; SKILL_SLOTS],
    /// Pointer position, used as the dash target.
    pub pointer: Position,
}
