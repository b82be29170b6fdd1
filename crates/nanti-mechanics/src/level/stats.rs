//! Statistics for one attempt at a level.

use serde::{Deserialize, Serialize};

/// Running totals for the current attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptStats {
    /// Turns resolved, extra turns included.
    pub turns_used: u32,
    /// Turns that ended in a bust.
    pub busts: u32,
    /// Cards that scored.
    pub cards_scored: u32,
    /// Highest single-turn score.
    pub best_turn: u32,
    /// Turns that did not advance the counter.
    pub extra_turns: u32,
}

impl AttemptStats {
    /// Record a resolved turn.
    pub fn record(&mut self, score: u32, cards: usize, bust: bool, extra_turn: bool) {
        self.turns_used += 1;
        if bust {
            self.busts += 1;
        }
        if extra_turn {
            self.extra_turns += 1;
        }
        self.cards_scored += cards as u32;
        self.best_turn = self.best_turn.max(score);
    }
}

impl std::fmt::Display for AttemptStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} turns, {} busts, {} cards scored, best turn {}",
            self.turns_used, self.busts, self.cards_scored, self.best_turn
        )
    }
}
