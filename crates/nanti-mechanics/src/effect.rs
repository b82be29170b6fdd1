//! Effect resolution, one function per category.
//!
//! Dice and cards carry tagged effects. Each stage of play asks a single
//! question of them: which faces come up, how points scale, whether the turn
//! counter advances, and how the reward is boosted.

use crate::card::{Card, CardEffect};
use crate::dice::{Die, FaceWeights};

/// Silver multiplier applied when a gold card scored in the winning turn.
pub const GOLD_MULTIPLIER: f64 = 1.25;

/// Face generation: the weight table a die rolls with, if it is weighted.
pub fn face_weights(die: &Die) -> Option<FaceWeights> {
    let table = die.effect.and_then(|e| e.weights())?;
    Some(die.weights.unwrap_or(table))
}

/// Scoring: the factor applied to one card's base points.
pub fn card_points_factor(card: &Card) -> f64 {
    match card.effect {
        Some(CardEffect::PointsMultiplier) => CardEffect::POINTS_MULTIPLIER,
        _ => 1.0,
    }
}

/// Scoring: the factor the selected die applies to the whole turn.
pub fn die_points_factor(die: Option<&Die>) -> f64 {
    match die.and_then(|d| d.effect) {
        Some(crate::dice::DieEffect::PointsMultiplier(m)) => m,
        _ => 1.0,
    }
}

/// Validity: whether a card matches any face.
pub fn is_wildcard(card: &Card) -> bool {
    matches!(card.effect, Some(CardEffect::Wildcard))
}

/// Turn flow: whether the die or cards used this turn grant an extra turn.
pub fn grants_extra_turn<'a>(die: Option<&Die>, cards: impl IntoIterator<Item = &'a Card>) -> bool {
    let die_extra = matches!(
        die.and_then(|d| d.effect),
        Some(crate::dice::DieEffect::ExtraTurn)
    );
    die_extra
        || cards
            .into_iter()
            .any(|c| matches!(c.effect, Some(CardEffect::ExtraTurn)))
}

/// Reward: the silver factor for the cards scored in the winning turn.
pub fn reward_factor<'a>(cards: impl IntoIterator<Item = &'a Card>) -> f64 {
    if cards
        .into_iter()
        .any(|c| matches!(c.effect, Some(CardEffect::GoldMultiplier)))
    {
        GOLD_MULTIPLIER
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardKind, CardValue, Suit};
    use crate::dice::DieEffect;

    fn card_with(effect: CardEffect) -> Card {
        Card {
            kind: CardKind::SpecialCard,
            effect: Some(effect),
            ..Card::standard(CardValue::Seven, Suit::Clubs)
        }
    }

    #[test]
    fn custom_weights_override_table() {
        let mut die = Die::special("low", "Low Die", DieEffect::WeightedLow);
        assert_eq!(face_weights(&die), Some(FaceWeights::LOW));

        let custom = FaceWeights::new([50.0, 10.0, 10.0, 10.0, 10.0, 10.0]).unwrap();
        die.weights = Some(custom);
        assert_eq!(face_weights(&die), Some(custom));
    }

    #[test]
    fn unweighted_die_ignores_custom_weights() {
        let mut die = Die::standard("plain");
        die.weights = Some(FaceWeights::HIGH);
        assert_eq!(face_weights(&die), None);
    }

    #[test]
    fn points_factors() {
        assert_eq!(card_points_factor(&card_with(CardEffect::PointsMultiplier)), 1.5);
        assert_eq!(card_points_factor(&card_with(CardEffect::Wildcard)), 1.0);

        let die = Die::special("g", "Gilded", DieEffect::PointsMultiplier(2.0));
        assert_eq!(die_points_factor(Some(&die)), 2.0);
        assert_eq!(die_points_factor(None), 1.0);
    }

    #[test]
    fn extra_turn_from_die_or_card() {
        let hourglass = Die::special("h", "Hourglass", DieEffect::ExtraTurn);
        assert!(grants_extra_turn(Some(&hourglass), Vec::<&Card>::new()));

        let card = card_with(CardEffect::ExtraTurn);
        assert!(grants_extra_turn(None, [&card]));

        let plain = Card::standard(CardValue::Two, Suit::Hearts);
        assert!(!grants_extra_turn(Some(&Die::standard("d")), [&plain]));
    }

    #[test]
    fn gold_boosts_reward() {
        let gold = card_with(CardEffect::GoldMultiplier);
        let plain = Card::standard(CardValue::Two, Suit::Hearts);
        assert_eq!(reward_factor([&plain, &gold]), GOLD_MULTIPLIER);
        assert_eq!(reward_factor([&plain]), 1.0);
    }
}
