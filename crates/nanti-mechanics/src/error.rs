//! Error types for the mechanics engine.

/// How a failure should be presented to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action was rejected; state is unchanged and play continues.
    Warning,
    /// The operation was aborted because the game data is inconsistent.
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Fatal => write!(f, "error"),
        }
    }
}

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A level id does not exist in the catalog.
    #[error("unknown level: {0}")]
    UnknownLevel(u32),

    /// The combination table has no entry for a rolled face.
    #[error("no combination rule for face {0}")]
    MissingCombinationRule(u8),

    /// The catalog violates one of its invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A player action is not allowed in the current turn state.
    #[error("{0}")]
    InvalidAction(String),

    /// An inventory change would break the deck or dice selection.
    #[error("invalid inventory change: {0}")]
    InvalidInventory(String),

    /// An item definition could not be turned into a die or card.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// The level is already over; no further turn actions are accepted.
    #[error("the level is already finished")]
    LevelFinished,
}

impl MechError {
    /// Classify the error for display.
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownLevel(_) | Self::MissingCombinationRule(_) | Self::InvalidCatalog(_) => {
                Severity::Fatal
            }
            Self::InvalidAction(_)
            | Self::InvalidInventory(_)
            | Self::InvalidItem(_)
            | Self::LevelFinished => Severity::Warning,
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
