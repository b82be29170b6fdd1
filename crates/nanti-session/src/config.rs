//! Configuration for a game session.

use std::time::Duration;

use nanti_mechanics::LevelRules;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible rolls and deals.
    pub seed: u64,
    /// Cards dealt per turn (at least 1).
    pub hand_size: usize,
    /// Pause before a bust is shown.
    pub bust_delay: Duration,
    /// Pause before the next turn is shown.
    pub next_turn_delay: Duration,
    /// Silver a new profile starts with.
    pub starting_silver: u32,
    /// Name given to a new profile.
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let rules = LevelRules::default();
        Self {
            seed: 42,
            hand_size: rules.hand_size,
            bust_delay: rules.bust_delay,
            next_turn_delay: rules.next_turn_delay,
            starting_silver: 0,
            player_name: "Wanderer".to_string(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the hand size (at least 1).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size.max(1);
        self
    }

    /// Set both presentation delays. Zero disables them.
    pub fn with_delays(mut self, bust: Duration, next_turn: Duration) -> Self {
        self.bust_delay = bust;
        self.next_turn_delay = next_turn;
        self
    }

    /// Set the silver a new profile starts with.
    pub fn with_starting_silver(mut self, silver: u32) -> Self {
        self.starting_silver = silver;
        self
    }

    /// Set the name given to a new profile.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// The table rules handed to each level attempt.
    pub fn level_rules(&self) -> LevelRules {
        LevelRules {
            hand_size: self.hand_size,
            bust_delay: self.bust_delay,
            next_turn_delay: self.next_turn_delay,
        }
    }
}
