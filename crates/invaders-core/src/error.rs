//! Errors raised while loading game data.

/// Game data could not be used.
#[derive(thiserror::Error, Debug)]
pub enum GameDataError {
    #[error("game data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid game data: {0}")]
    Invalid(String),
}
