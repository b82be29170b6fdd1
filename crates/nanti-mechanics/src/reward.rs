//! Victory rewards.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::catalog::Level;
use crate::effect;
use crate::scoring::round_half_up;

/// What a won level pays out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// The level that was won.
    pub level_id: u32,
    /// Silver granted on claim.
    pub silver: u32,
    /// Whether a gold card boosted the payout.
    pub gold_boosted: bool,
    /// Special item to mint, final level only.
    pub special: Option<String>,
}

/// Roll the silver payout for `level`.
///
/// `winning_cards` are the cards scored in the turn that reached the goal;
/// a gold card among them multiplies the silver by 1.25.
pub fn compute_reward<'a>(
    level: &Level,
    is_final: bool,
    winning_cards: impl IntoIterator<Item = &'a Card>,
    rng: &mut StdRng,
) -> Reward {
    let rewards = &level.rewards;
    let base = rng.random_range(rewards.silver_min..=rewards.silver_max);
    let factor = effect::reward_factor(winning_cards);
    let gold_boosted = factor > 1.0;
    let silver = if gold_boosted {
        round_half_up(f64::from(base) * factor)
    } else {
        base
    };
    let special = if is_final {
        rewards.special.clone()
    } else {
        None
    };
    tracing::debug!(level = level.id, base, silver, gold_boosted, "computed reward");
    Reward {
        level_id: level.id,
        silver,
        gold_boosted,
        special,
    }
}
