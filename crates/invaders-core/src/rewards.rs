//! Coin rewards granted on the results screen.

use crate::constants::COINS_PER_POINT;

/// Coins earned for a final score.
pub fn coins_for_score(score: u64) -> u64 {
    (score as f64 * COINS_PER_POINT).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coins_round_down() {
        assert_eq!(coins_for_score(0), 0);
        assert_eq!(coins_for_score(9), 0);
        assert_eq!(coins_for_score(10), 1);
        assert_eq!(coins_for_score(1234), 123);
    }
}
