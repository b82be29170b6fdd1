//! Card validity and turn scoring.
//!
//! A card scores against the selected die face when its value is listed in
//! that face's combination rule, or when it is a wildcard. The turn score is
//! the summed base points times the ace, same-suit and die multipliers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::catalog::Catalog;
use crate::dice::Die;
use crate::effect;
use crate::error::MechResult;

/// Whether `card` may be played against `face`.
pub fn is_card_valid_for_face(catalog: &Catalog, card: &Card, face: u8) -> MechResult<bool> {
    let rule = catalog.rule(face)?;
    Ok(rule.allows(card.value) || effect::is_wildcard(card))
}

/// Whether any card in `hand` may be played against `face`.
pub fn has_any_valid_card(catalog: &Catalog, hand: &[Card], face: u8) -> MechResult<bool> {
    let rule = catalog.rule(face)?;
    Ok(hand
        .iter()
        .any(|c| rule.allows(c.value) || effect::is_wildcard(c)))
}

/// How a turn score was put together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Summed base points before multipliers.
    pub base: f64,
    /// Number of aces among the selected cards.
    pub aces: u32,
    /// Largest number of selected cards sharing one suit.
    pub max_same_suit: usize,
    /// Product of all multipliers.
    pub multiplier: f64,
    /// Final rounded score.
    pub total: u32,
}

impl ScoreBreakdown {
    /// The breakdown of an empty selection.
    pub fn empty() -> Self {
        Self {
            base: 0.0,
            aces: 0,
            max_same_suit: 0,
            multiplier: 1.0,
            total: 0,
        }
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} base x{:.2} = {}", self.base, self.multiplier, self.total)
    }
}

/// Score the selected cards against a face with the selected die.
pub fn score_turn(
    catalog: &Catalog,
    selected: &[Card],
    face: u8,
    die: Option<&Die>,
) -> MechResult<ScoreBreakdown> {
    if selected.is_empty() {
        return Ok(ScoreBreakdown::empty());
    }
    let rule = catalog.rule(face)?;
    let points = f64::from(rule.points);

    let base: f64 = selected
        .iter()
        .map(|c| points * effect::card_points_factor(c))
        .sum();

    let aces = selected.iter().filter(|c| c.is_ace()).count() as u32;
    let max_same_suit = max_same_suit(selected);

    let tables = &catalog.multipliers;
    let mut multiplier = 1.0;
    multiplier *= tables.aces.powi(aces as i32);
    multiplier *= tables.same_suit.for_count(max_same_suit);
    multiplier *= effect::die_points_factor(die);

    let total = round_half_up(base * multiplier);
    tracing::debug!(face, base, multiplier, total, "scored selection");
    Ok(ScoreBreakdown {
        base,
        aces,
        max_same_suit,
        multiplier,
        total,
    })
}

/// The rounded turn score for a selection.
pub fn compute_turn_score(
    catalog: &Catalog,
    selected: &[Card],
    face: u8,
    die: Option<&Die>,
) -> MechResult<u32> {
    Ok(score_turn(catalog, selected, face, die)?.total)
}

/// Round a non-negative value to the nearest integer, halves going up.
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

fn max_same_suit(cards: &[Card]) -> usize {
    let mut counts = HashMap::new();
    for card in cards {
        *counts.entry(card.suit).or_insert(0usize) += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardEffect, CardKind, CardValue, Suit};
    use crate::dice::DieEffect;

    fn card(value: CardValue, suit: Suit) -> Card {
        Card::standard(value, suit)
    }

    fn special(value: CardValue, suit: Suit, effect: CardEffect) -> Card {
        Card {
            kind: CardKind::SpecialCard,
            effect: Some(effect),
            ..Card::standard(value, suit)
        }
    }

    #[test]
    fn validity_follows_rule() {
        let catalog = Catalog::default();
        let king = card(CardValue::King, Suit::Hearts);
        assert!(is_card_valid_for_face(&catalog, &king, 6).unwrap());
        assert!(!is_card_valid_for_face(&catalog, &king, 1).unwrap());
    }

    #[test]
    fn wildcard_valid_everywhere() {
        let catalog = Catalog::default();
        let wild = special(CardValue::King, Suit::Hearts, CardEffect::Wildcard);
        for face in 1..=6 {
            assert!(is_card_valid_for_face(&catalog, &wild, face).unwrap());
        }
    }

    #[test]
    fn missing_rule_is_error() {
        let catalog = Catalog::default();
        let king = card(CardValue::King, Suit::Hearts);
        assert!(is_card_valid_for_face(&catalog, &king, 0).is_err());
        assert!(score_turn(&catalog, &[king], 9, None).is_err());
    }

    #[test]
    fn any_valid_card() {
        let catalog = Catalog::default();
        let hand = vec![
            card(CardValue::Two, Suit::Hearts),
            card(CardValue::King, Suit::Clubs),
        ];
        assert!(has_any_valid_card(&catalog, &hand, 1).unwrap());
        assert!(has_any_valid_card(&catalog, &hand, 6).unwrap());
        assert!(!has_any_valid_card(&catalog, &hand, 4).unwrap());
        assert!(!has_any_valid_card(&catalog, &[], 4).unwrap());
    }

    #[test]
    fn empty_selection_scores_zero() {
        let catalog = Catalog::default();
        let gilded = Die::special("g", "Gilded", DieEffect::PointsMultiplier(3.0));
        assert_eq!(compute_turn_score(&catalog, &[], 6, Some(&gilded)).unwrap(), 0);
    }

    #[test]
    fn plain_cards_distinct_suits() {
        let catalog = Catalog::default();
        // Face 4 = 25 points per card.
        let cards = [
            card(CardValue::Seven, Suit::Hearts),
            card(CardValue::Nine, Suit::Clubs),
        ];
        assert_eq!(compute_turn_score(&catalog, &cards, 4, None).unwrap(), 50);
    }

    #[test]
    fn aces_compound() {
        let catalog = Catalog::default();
        // Face 6 = 40 points, aces 1.5 each, distinct suits.
        let cards = [
            card(CardValue::Ace, Suit::Hearts),
            card(CardValue::Ace, Suit::Spades),
            card(CardValue::King, Suit::Clubs),
        ];
        let breakdown = score_turn(&catalog, &cards, 6, None).unwrap();
        assert_eq!(breakdown.aces, 2);
        assert!((breakdown.multiplier - 2.25).abs() < 1e-9);
        assert_eq!(breakdown.total, 270);
    }

    #[test]
    fn suit_tier_uses_max_count() {
        let catalog = Catalog::default();
        // Two hearts and one spade on face 5 (30 points): tier for 2, not 3.
        let cards = [
            card(CardValue::Nine, Suit::Hearts),
            card(CardValue::Ten, Suit::Hearts),
            card(CardValue::Jack, Suit::Spades),
        ];
        let breakdown = score_turn(&catalog, &cards, 5, None).unwrap();
        assert_eq!(breakdown.max_same_suit, 2);
        assert_eq!(breakdown.total, 108); // 90 * 1.2
    }

    #[test]
    fn four_of_a_suit_uses_top_tier() {
        let catalog = Catalog::default();
        let cards = [
            card(CardValue::Nine, Suit::Clubs),
            card(CardValue::Ten, Suit::Clubs),
            card(CardValue::Jack, Suit::Clubs),
            card(CardValue::Queen, Suit::Clubs),
        ];
        assert_eq!(compute_turn_score(&catalog, &cards, 5, None).unwrap(), 240);
    }

    #[test]
    fn card_points_multiplier_applies_to_base() {
        let catalog = Catalog::default();
        // Face 1 = 10 points; boosted card contributes 15.
        let cards = [
            special(CardValue::Two, Suit::Hearts, CardEffect::PointsMultiplier),
            card(CardValue::Three, Suit::Clubs),
        ];
        let breakdown = score_turn(&catalog, &cards, 1, None).unwrap();
        assert!((breakdown.base - 25.0).abs() < 1e-9);
        assert_eq!(breakdown.total, 25);
    }

    #[test]
    fn boosted_card_alone_scores_one_and_a_half() {
        let catalog = Catalog::default();
        let two = special(CardValue::Two, Suit::Hearts, CardEffect::PointsMultiplier);
        // Face 1 = 10 points * 1.5 = 15
        assert_eq!(compute_turn_score(&catalog, &[two], 1, None).unwrap(), 15);
    }

    #[test]
    fn die_multiplier_applies_last() {
        let catalog = Catalog::default();
        let gilded = Die::special("g", "Gilded", DieEffect::PointsMultiplier(1.5));
        let cards = [card(CardValue::Five, Suit::Hearts)];
        // Face 2 = 15 points * 1.5 = 22.5 -> 23
        assert_eq!(compute_turn_score(&catalog, &cards, 2, Some(&gilded)).unwrap(), 23);
    }

    #[test]
    fn order_independent() {
        let catalog = Catalog::default();
        let a = card(CardValue::Ace, Suit::Hearts);
        let b = card(CardValue::Jack, Suit::Hearts);
        let c = special(CardValue::Queen, Suit::Spades, CardEffect::PointsMultiplier);
        let forward = compute_turn_score(&catalog, &[a.clone(), b.clone(), c.clone()], 6, None);
        let backward = compute_turn_score(&catalog, &[c, b, a], 6, None);
        assert_eq!(forward.unwrap(), backward.unwrap());
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(187.5), 188);
        assert_eq!(round_half_up(22.5), 23);
        assert_eq!(round_half_up(22.49), 22);
        assert_eq!(round_half_up(0.0), 0);
    }
}
