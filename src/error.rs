use crate::types::CountyId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountyForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("County '{0}' is not part of this game's roster")]
    InvalidCounty(CountyId),

    #[error("Unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("Unknown game mode '{0}' (expected practice, timed, challenge or learn)")]
    UnknownMode(String),

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),

    #[error("Configuration Error: {0}")]
    InvalidConfig(String),

    #[error("Saved game is corrupt: {0}")]
    CorruptSave(String),

    #[error("Script Error (line {line}): {message}")]
    Script { line: usize, message: String },
}

pub type CfResult<T> = Result<T, CountyForgeError>;
