//! Game mechanics engine for Lands of Nanti.
//!
//! Provides the 52-card deck with equippable skins and special cards,
//! weighted dice, the face-to-card combination table, turn scoring,
//! victory rewards, and the turn/level state machine that ties them
//! together. Ships with the ten-level Lands of Nanti catalog.

pub mod card;
pub mod catalog;
pub mod dice;
pub mod effect;
pub mod error;
pub mod inventory;
pub mod level;
pub mod reward;
pub mod scoring;

pub use card::{Card, CardEffect, CardKind, CardValue, Deck, DrawPile, Suit};
pub use catalog::{Catalog, CombinationRule, Goal, Level, MultiplierTable, Rewards};
pub use dice::{Die, DieEffect, DieKind, FaceWeights, RolledDie};
pub use error::{MechError, MechResult, Severity};
pub use inventory::Inventory;
pub use level::{
    BustReason, LevelOutcome, LevelRules, LevelSession, Phase, Step, Transition, TurnState,
    TurnSummary,
};
pub use reward::{Reward, compute_reward};
pub use scoring::{ScoreBreakdown, compute_turn_score, is_card_valid_for_face, score_turn};
