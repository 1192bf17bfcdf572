//! Scripted pilot that plays the game from snapshots.
//!
//! Deterministic: the same snapshot always yields the same input. It stays
//! under the closest target, fires continuously, sidesteps shots that are
//! about to land, and uses every skill as soon as it is ready while there is
//! something to use it on.

use invaders_core::commands::InputState;
use invaders_core::enums::{GamePhase, ProjectileKind};
use invaders_core::state::GameStateSnapshot;
use invaders_core::types::Position;

/// Horizontal slack before the pilot bothers to move.
const TRACK_DEADZONE: f64 = 8.0;
/// Incoming shots inside this box above the player trigger a dodge.
const DODGE_WINDOW_X: f64 = 36.0;
const DODGE_WINDOW_Y: f64 = 160.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Last sidestep direction, kept while the same threat persists.
    dodge_dir: f64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next tick.
    pub fn steer(&mut self, snap: &GameStateSnapshot) -> InputState {
        let mut input = InputState::default();
        if snap.phase != GamePhase::Active {
            return input;
        }
        let Some(player) = snap.player.as_ref().filter(|p| p.active) else {
            return input;
        };
        let me = player.position;

        let target = nearest_target(snap, &me);
        input.shoot = true;
        input.pointer = target.unwrap_or(Position::new(me.x, 0.0));

        let dx = match incoming_shot(snap, &me) {
            Some(shot_x) => {
                if self.dodge_dir == 0.0 {
                    self.dodge_dir = if shot_x <= me.x { 1.0 } else { -1.0 };
                }
                self.dodge_dir
            }
            None => {
                self.dodge_dir = 0.0;
                target.map_or(0.0, |t| t.x - me.x)
            }
        };
        input.left = dx < -TRACK_DEADZONE || (self.dodge_dir < 0.0);
        input.right = !input.left && (dx > TRACK_DEADZONE || self.dodge_dir > 0.0);

        if target.is_some() {
            for skill in &snap.skills {
                if let Some(key) = input.skills.get_mut(skill.slot) {
                    *key = skill.ready;
                }
            }
        }
        input
    }
}

/// Closest active enemy or the boss, by straight-line distance.
fn nearest_target(snap: &GameStateSnapshot, from: &Position) -> Option<Position> {
    snap.enemies
        .iter()
        .map(|e| e.position)
        .chain(snap.boss.as_ref().map(|b| b.position))
        .min_by(|a, b| from.distance_to(a).total_cmp(&from.distance_to(b)))
}

/// X of the closest hostile shot falling toward the player, if any.
fn incoming_shot(snap: &GameStateSnapshot, me: &Position) -> Option<f64> {
    snap.projectiles
        .iter()
        .filter(|p| matches!(p.kind, ProjectileKind::EnemyShot | ProjectileKind::BossShot))
        .filter(|p| p.velocity.y > 0.0)
        .filter(|p| {
            let above = me.y - p.position.y;
            (0.0..DODGE_WINDOW_Y).contains(&above) && (p.position.x - me.x).abs() < DODGE_WINDOW_X
        })
        .min_by(|a, b| (me.y - a.position.y).total_cmp(&(me.y - b.position.y)))
        .map(|p| p.position.x)
}
