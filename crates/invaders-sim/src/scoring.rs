//! Score bookkeeping and the enemy kill record.
//!
//! Every enemy death, whatever caused it, is reported as a `KillRecord`
//! and settled by the wave director in one place.

use invaders_core::rewards::coins_for_score;

/// What finished an enemy off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    /// Player bullet or sandwich.
    Shot,
    /// Damage over time.
    Dot,
    /// Purged by le_cagibi.
    Purge,
    /// Rammed the player.
    Ram,
}

impl KillCause {
    /// Ramming kills count for the wave but give no points.
    pub fn awards_score(self) -> bool {
        self != KillCause::Ram
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KillRecord {
    pub enemy_type: String,
    pub score_value: u64,
    pub cause: KillCause,
}

/// A boss brought to zero hp this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BossDefeat {
    pub boss_id: String,
    pub score_value: u64,
}

/// Running score for the current game.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u64,
    pub enemies_killed: u32,
    pub bosses_defeated: u32,
}

impl ScoreState {
    /// Settle a kill. Returns the points awarded.
    pub fn record_kill(&mut self, kill: &KillRecord) -> u64 {
        self.enemies_killed += 1;
        let points = if kill.cause.awards_score() {
            kill.score_value
        } else {
            0
        };
        self.score += points;
        points
    }

    pub fn record_boss(&mut self, score_value: u64) {
        self.bosses_defeated += 1;
        self.score += score_value;
    }

    pub fn coins(&self) -> u64 {
        coins_for_score(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(cause: KillCause) -> KillRecord {
        KillRecord {
            enemy_type: "cliche_iceberg_1".into(),
            score_value: 10,
            cause,
        }
    }

    #[test]
    fn test_ram_kills_count_without_points() {
        let mut score = ScoreState::default();
        assert_eq!(score.record_kill(&kill(KillCause::Shot)), 10);
        assert_eq!(score.record_kill(&kill(KillCause::Ram)), 0);
        assert_eq!(score.record_kill(&kill(KillCause::Dot)), 10);
        assert_eq!(score.record_kill(&kill(KillCause::Purge)), 10);
        assert_eq!(score.score, 30);
        assert_eq!(score.enemies_killed, 4);
    }

    #[test]
    fn test_boss_score_and_coins() {
        let mut score = ScoreState::default();
        score.record_boss(1000);
        score.record_kill(&kill(KillCause::Shot));
        assert_eq!(score.score, 1010);
        assert_eq!(score.coins(), 101);
    }
}
