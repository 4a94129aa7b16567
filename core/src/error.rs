use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
    #[error("Stored value under {key:?} is malformed")]
    Malformed { key: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Symbol pool too small, needed {needed} but only {available} available")]
    InsufficientSymbols { needed: usize, available: usize },
    #[error("Deferred action belongs to a superseded round")]
    StaleCallback,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = core::result::Result<T, GameError>;
