//! Error types for the game session.

use nanti_mechanics::{MechError, Severity};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while playing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Mechanics engine error.
    #[error("{0}")]
    Mech(#[from] MechError),

    /// The key-value store could not be read or written.
    #[error("storage error: {0}")]
    Store(String),

    /// The mint collaborator failed.
    #[error("minting failed: {0}")]
    Mint(String),

    /// The previous level has not been completed yet.
    #[error("level {0} is locked; complete the previous level first")]
    LevelLocked(u32),

    /// A turn command was given outside a level.
    #[error("no level in progress")]
    NoActiveLevel,

    /// The player cannot afford an item.
    #[error("not enough silver: {price} needed, {available} available")]
    NotEnoughSilver {
        /// Item price.
        price: u32,
        /// Silver in the wallet.
        available: u32,
    },

    /// No shop or inventory item has this id.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Invalid choice or input.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl SessionError {
    /// Classify the error for display.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Mech(e) => e.severity(),
            _ => Severity::Warning,
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Store(e.to_string())
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        Self::Store(e.to_string())
    }
}
