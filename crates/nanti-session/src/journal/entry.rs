//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A level attempt began.
    LevelStarted {
        /// Level id.
        level_id: u32,
        /// Level name.
        name: String,
        /// Points needed to win.
        goal_points: u32,
        /// Turns available.
        goal_turns: u32,
        /// When the level started.
        timestamp: DateTime<Utc>,
    },
    /// A turn ended with points banked.
    TurnScored {
        /// Turn counter.
        turn: u32,
        /// Face of the chosen die.
        face: u8,
        /// Cards that scored.
        cards: Vec<String>,
        /// Points for the turn.
        score: u32,
        /// Running total after the turn.
        total: u32,
        /// Whether the turn counter stayed put.
        extra_turn: bool,
        /// When the turn resolved.
        timestamp: DateTime<Utc>,
    },
    /// A turn ended in a bust.
    Bust {
        /// Turn counter.
        turn: u32,
        /// What went wrong.
        reason: String,
        /// When the turn resolved.
        timestamp: DateTime<Utc>,
    },
    /// A level attempt ended.
    LevelEnded {
        /// Level id.
        level_id: u32,
        /// Whether the goal was reached.
        victory: bool,
        /// Final score.
        score: u32,
        /// When the level ended.
        timestamp: DateTime<Utc>,
    },
    /// The player walked away from a level.
    LevelLeft {
        /// Level id.
        level_id: u32,
        /// Turn counter at the time.
        turn: u32,
        /// When the player left.
        timestamp: DateTime<Utc>,
    },
    /// A victory reward was claimed.
    RewardClaimed {
        /// Level id.
        level_id: u32,
        /// Silver granted.
        silver: u32,
        /// Special item, final level only.
        special: Option<String>,
        /// When claimed.
        timestamp: DateTime<Utc>,
    },
    /// An item was bought.
    Purchase {
        /// Shop item id.
        item_id: String,
        /// Item name.
        name: String,
        /// Silver paid.
        price: u32,
        /// When bought.
        timestamp: DateTime<Utc>,
    },
    /// A mint attempt for a special reward.
    Mint {
        /// The special item.
        item: String,
        /// Whether minting succeeded.
        success: bool,
        /// Failure detail.
        detail: Option<String>,
        /// When attempted.
        timestamp: DateTime<Utc>,
    },
}
