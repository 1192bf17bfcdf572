//! Coin wallet persisted as a small JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Coins earned across games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum WalletError {
    #[error("wallet file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("wallet file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read the wallet. A missing file is an empty wallet.
pub fn load(path: &Path) -> Result<Wallet, WalletError> {
    if !path.exists() {
        return Ok(Wallet::default());
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save(path: &Path, wallet: &Wallet) -> Result<(), WalletError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_string_pretty(wallet)?)?;
    Ok(())
}

/// Add coins and persist. Returns the new total.
pub fn credit(path: &Path, coins: u64) -> Result<u64, WalletError> {
    let mut wallet = load(path)?;
    wallet.coins = wallet.coins.saturating_add(coins);
    save(path, &wallet)?;
    info!(earned = coins, total = wallet.coins, "wallet credited");
    Ok(wallet.coins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_wallet_is_empty() {
        let path = std::env::temp_dir().join("manu_invaders_test_wallet_missing.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load(&path).unwrap().coins, 0);
    }

    #[test]
    fn test_credit_accumulates() {
        let dir = std::env::temp_dir().join("manu_invaders_test_wallet_credit");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("wallet.json");

        assert_eq!(credit(&path, 12).unwrap(), 12);
        assert_eq!(credit(&path, 30).unwrap(), 42);
        assert_eq!(load(&path).unwrap(), Wallet { coins: 42 });

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_wallet_reports_parse_error() {
        let path = std::env::temp_dir().join("manu_invaders_test_wallet_corrupt.json");
        fs::write(&path, "coins: lots").unwrap();
        assert!(matches!(load(&path), Err(WalletError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}
