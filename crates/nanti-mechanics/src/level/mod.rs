//! The turn/level state machine.
//!
//! A [`LevelSession`] runs one attempt at a level. Each turn rolls two dice
//! and deals a hand; the player picks a die, selects matching cards, may draw
//! one extra card, and ends the turn. Resolution banks the turn score and
//! then checks victory before defeat.
//!
//! Every action commits its outcome immediately. The returned [`Transition`]
//! carries a presentation delay the host may wait out before showing it.

pub mod stats;
pub mod turn;

pub use stats::AttemptStats;
pub use turn::{DealtCard, TurnState};

use std::time::Duration;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, DrawPile};
use crate::catalog::{Catalog, Level};
use crate::dice::{Die, roll_pair};
use crate::effect;
use crate::error::{MechError, MechResult};
use crate::inventory::Inventory;
use crate::reward::{self, Reward};
use crate::scoring;

/// Table rules for a level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRules {
    /// Cards dealt at the start of each turn.
    pub hand_size: usize,
    /// Pause before a bust is shown.
    pub bust_delay: Duration,
    /// Pause before the next turn is shown.
    pub next_turn_delay: Duration,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            hand_size: 3,
            bust_delay: Duration::from_millis(1500),
            next_turn_delay: Duration::from_millis(1000),
        }
    }
}

/// Why a turn ended with zero points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BustReason {
    /// No card in hand matched the selected face.
    NoValidCard,
    /// The extra card drawn did not match the selected face.
    InvalidDraw(Card),
}

impl std::fmt::Display for BustReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValidCard => write!(f, "no card matches the die"),
            Self::InvalidDraw(card) => write!(f, "drew {card}, which does not match"),
        }
    }
}

/// What happened in a resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSummary {
    /// The turn counter when the turn was played.
    pub turn: u32,
    /// Face of the chosen die.
    pub face: Option<u8>,
    /// Cards that scored.
    pub cards: Vec<Card>,
    /// Points banked.
    pub score: u32,
    /// Set when the turn busted.
    pub bust: Option<BustReason>,
    /// Whether the turn counter stays put.
    pub extra_turn: bool,
}

/// How a level attempt ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// The goal was reached; the reward awaits a claim.
    Victory(Reward),
    /// The turns ran out.
    Defeat,
}

/// Where the state machine stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the player's die, card, draw, or end-turn action.
    TurnActive,
    /// The level is over.
    Complete(LevelOutcome),
}

/// The result of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The current turn changed but is still in progress.
    Updated,
    /// The turn resolved and a new turn has been dealt.
    NextTurn(TurnSummary),
    /// The turn resolved and ended the level.
    Complete(TurnSummary, LevelOutcome),
}

/// An action's result plus the delay before presenting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// What happened.
    pub step: Step,
    /// Presentation delay; the state has already changed.
    pub delay: Duration,
}

impl Transition {
    fn updated() -> Self {
        Self {
            step: Step::Updated,
            delay: Duration::ZERO,
        }
    }
}

/// One attempt at a level.
#[derive(Debug, Clone)]
pub struct LevelSession {
    catalog: Catalog,
    level: Level,
    is_final: bool,
    rules: LevelRules,
    dice_pool: Vec<Die>,
    pile: DrawPile,
    turn: TurnState,
    phase: Phase,
    stats: AttemptStats,
}

impl LevelSession {
    /// Start a level: turn 1, score 0, dice rolled and a hand dealt.
    pub fn start(
        catalog: &Catalog,
        level_id: u32,
        inventory: &Inventory,
        rules: LevelRules,
        rng: &mut StdRng,
    ) -> MechResult<Self> {
        let level = catalog.level(level_id)?.clone();
        let is_final = catalog.is_final_level(level_id);
        let dice_pool = inventory.active_dice();
        let mut pile = DrawPile::new(inventory.active_deck(), rng);
        let dice = roll_pair(&dice_pool, rng);
        let hand = pile.deal_hand(rules.hand_size, rng);
        tracing::info!(level = level.id, name = %level.name, "level started");
        Ok(Self {
            catalog: catalog.clone(),
            level,
            is_final,
            rules,
            dice_pool,
            pile,
            turn: TurnState::new(1, 0, dice, hand),
            phase: Phase::TurnActive,
            stats: AttemptStats::default(),
        })
    }

    /// The level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The current turn.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// The current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Statistics for this attempt.
    pub fn stats(&self) -> &AttemptStats {
        &self.stats
    }

    /// The draw pile.
    pub fn pile(&self) -> &DrawPile {
        &self.pile
    }

    /// The outcome, once the level is over.
    pub fn outcome(&self) -> Option<&LevelOutcome> {
        match &self.phase {
            Phase::Complete(outcome) => Some(outcome),
            Phase::TurnActive => None,
        }
    }

    /// Whether the level is over.
    pub fn is_complete(&self) -> bool {
        self.outcome().is_some()
    }

    /// Select die `index` (0 or 1). Selecting the chosen die again deselects it.
    ///
    /// Selection marks every card in hand as valid or invalid for the face.
    /// When no card matches, the turn busts.
    pub fn select_die(&mut self, index: usize, rng: &mut StdRng) -> MechResult<Transition> {
        self.ensure_active()?;
        let Some(face) = self.turn.dice.get(index).map(|r| r.face) else {
            return Err(MechError::InvalidAction(format!(
                "there is no die {}",
                index + 1
            )));
        };

        if self.turn.selected_die == Some(index) {
            self.turn.selected_die = None;
            self.turn.selected.clear();
            self.turn.turn_score = 0;
            for dealt in &mut self.turn.hand {
                dealt.valid = None;
            }
            return Ok(Transition::updated());
        }

        let validity = self
            .turn
            .hand
            .iter()
            .map(|d| scoring::is_card_valid_for_face(&self.catalog, &d.card, face))
            .collect::<MechResult<Vec<bool>>>()?;

        self.turn.selected_die = Some(index);
        self.turn.selected.clear();
        self.turn.turn_score = 0;
        for (dealt, valid) in self.turn.hand.iter_mut().zip(&validity) {
            dealt.valid = Some(*valid);
        }

        if !validity.contains(&true) {
            tracing::debug!(face, "no valid card for face, forced bust");
            return self.resolve(Some(BustReason::NoValidCard), rng);
        }
        Ok(Transition::updated())
    }

    /// Select or deselect the card at hand index `index`.
    pub fn toggle_card(&mut self, index: usize) -> MechResult<Transition> {
        self.ensure_active()?;
        let face = self.require_face("select a die before choosing cards")?;
        let dealt = self.turn.hand.get(index).ok_or_else(|| {
            MechError::InvalidAction(format!("there is no card {}", index + 1))
        })?;
        if !dealt.is_valid() {
            return Err(MechError::InvalidAction(format!(
                "{} cannot be played on a {face}",
                dealt.card
            )));
        }

        match self.turn.selected.iter().position(|&i| i == index) {
            Some(pos) => {
                self.turn.selected.remove(pos);
            }
            None => self.turn.selected.push(index),
        }
        self.rescore(face)?;
        Ok(Transition::updated())
    }

    /// Draw one extra card. A card that does not match busts the turn.
    pub fn draw_card(&mut self, rng: &mut StdRng) -> MechResult<Transition> {
        self.ensure_active()?;
        let face = self.require_face("select a die before drawing")?;
        if self.turn.drawn {
            return Err(MechError::InvalidAction(
                "only one extra card per turn".to_string(),
            ));
        }
        let card = self
            .pile
            .draw_one(&self.turn.hand_cards(), rng)
            .ok_or_else(|| MechError::InvalidAction("no cards left to draw".to_string()))?;
        let valid = scoring::is_card_valid_for_face(&self.catalog, &card, face)?;

        self.turn.drawn = true;
        self.turn.hand.push(DealtCard {
            card: card.clone(),
            valid: Some(valid),
        });
        tracing::debug!(card = %card, valid, "drew extra card");

        if !valid {
            return self.resolve(Some(BustReason::InvalidDraw(card)), rng);
        }
        Ok(Transition::updated())
    }

    /// End the turn and bank the current selection.
    pub fn end_turn(&mut self, rng: &mut StdRng) -> MechResult<Transition> {
        self.ensure_active()?;
        self.require_face("select a die before ending the turn")?;
        self.resolve(None, rng)
    }

    fn ensure_active(&self) -> MechResult<()> {
        match self.phase {
            Phase::TurnActive => Ok(()),
            Phase::Complete(_) => Err(MechError::LevelFinished),
        }
    }

    fn require_face(&self, message: &str) -> MechResult<u8> {
        self.turn
            .face()
            .ok_or_else(|| MechError::InvalidAction(message.to_string()))
    }

    fn rescore(&mut self, face: u8) -> MechResult<()> {
        let cards = self.turn.selected_cards();
        let die = self.turn.chosen().map(|r| &r.die);
        let score = scoring::compute_turn_score(&self.catalog, &cards, face, die)?;
        self.turn.turn_score = score;
        Ok(())
    }

    fn resolve(&mut self, bust: Option<BustReason>, rng: &mut StdRng) -> MechResult<Transition> {
        let busted = bust.is_some();
        let cards = if busted {
            Vec::new()
        } else {
            self.turn.selected_cards()
        };
        let score = if busted { 0 } else { self.turn.turn_score };
        let extra_turn =
            !busted && effect::grants_extra_turn(self.turn.chosen().map(|r| &r.die), &cards);

        self.turn.turn_score = score;
        self.turn.total_score += score;
        self.turn.ended = true;
        self.stats.record(score, cards.len(), busted, extra_turn);

        let delay = if busted {
            self.rules.bust_delay
        } else {
            self.rules.next_turn_delay
        };
        let summary = TurnSummary {
            turn: self.turn.turn,
            face: self.turn.face(),
            cards,
            score,
            bust,
            extra_turn,
        };

        if self.turn.total_score >= self.level.goal.points {
            let reward = reward::compute_reward(&self.level, self.is_final, &summary.cards, rng);
            tracing::info!(
                level = self.level.id,
                score = self.turn.total_score,
                silver = reward.silver,
                "level won"
            );
            return Ok(self.complete(summary, LevelOutcome::Victory(reward), delay));
        }

        if self.turn.turn >= self.level.goal.turns && !extra_turn {
            tracing::info!(
                level = self.level.id,
                score = self.turn.total_score,
                "level lost"
            );
            return Ok(self.complete(summary, LevelOutcome::Defeat, delay));
        }

        let next = if extra_turn {
            self.turn.turn
        } else {
            self.turn.turn + 1
        };
        self.deal_turn(next, rng);
        Ok(Transition {
            step: Step::NextTurn(summary),
            delay,
        })
    }

    fn complete(
        &mut self,
        summary: TurnSummary,
        outcome: LevelOutcome,
        delay: Duration,
    ) -> Transition {
        self.phase = Phase::Complete(outcome.clone());
        Transition {
            step: Step::Complete(summary, outcome),
            delay,
        }
    }

    fn deal_turn(&mut self, turn: u32, rng: &mut StdRng) {
        let dice = roll_pair(&self.dice_pool, rng);
        let hand = self.pile.deal_hand(self.rules.hand_size, rng);
        self.turn = TurnState::new(turn, self.turn.total_score, dice, hand);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::card::{CardEffect, CardKind, CardValue, Suit};
    use crate::catalog::CombinationRule;
    use crate::dice::{DieEffect, RolledDie};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn session(level: u32) -> (LevelSession, StdRng) {
        let mut rng = rng();
        let s = LevelSession::start(
            &Catalog::default(),
            level,
            &Inventory::starter(),
            LevelRules::default(),
            &mut rng,
        )
        .unwrap();
        (s, rng)
    }

    fn rolled(face: u8) -> RolledDie {
        RolledDie {
            die: Die::standard(format!("d{face}")),
            face,
        }
    }

    fn special(value: CardValue, suit: Suit, effect: CardEffect) -> Card {
        Card {
            kind: CardKind::SpecialCard,
            effect: Some(effect),
            ..Card::standard(value, suit)
        }
    }

    /// Replace the live turn with known dice and cards.
    fn rig(s: &mut LevelSession, turn: u32, total: u32, dice: [RolledDie; 2], hand: Vec<Card>) {
        s.turn = TurnState::new(turn, total, dice, hand);
    }

    fn kings() -> Vec<Card> {
        vec![
            Card::standard(CardValue::King, Suit::Hearts),
            Card::standard(CardValue::King, Suit::Clubs),
            Card::standard(CardValue::Two, Suit::Spades),
        ]
    }

    #[test]
    fn start_deals_first_turn() {
        let (s, _) = session(1);
        assert_eq!(s.turn().turn, 1);
        assert_eq!(s.turn().total_score, 0);
        assert_eq!(s.turn().hand.len(), 3);
        assert!(s.turn().dice.iter().all(|d| (1..=6).contains(&d.face)));
        assert_eq!(s.phase(), &Phase::TurnActive);
    }

    #[test]
    fn unknown_level_aborts() {
        let mut rng = rng();
        let err = LevelSession::start(
            &Catalog::default(),
            42,
            &Inventory::starter(),
            LevelRules::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, MechError::UnknownLevel(42)));
    }

    #[test]
    fn selecting_die_marks_validity() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        let t = s.select_die(0, &mut rng).unwrap();
        assert_eq!(t.step, Step::Updated);
        let valid: Vec<Option<bool>> = s.turn().hand.iter().map(|d| d.valid).collect();
        assert_eq!(valid, vec![Some(true), Some(true), Some(false)]);
        assert_eq!(s.turn().face(), Some(6));
    }

    #[test]
    fn reselecting_die_deselects() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        s.select_die(0, &mut rng).unwrap();
        assert_eq!(s.turn().selected_die, None);
        assert!(s.turn().selected.is_empty());
        assert_eq!(s.turn().turn_score, 0);
        assert!(s.turn().hand.iter().all(|d| d.valid.is_none()));
    }

    #[test]
    fn switching_die_clears_selection() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        s.select_die(1, &mut rng).unwrap();
        assert_eq!(s.turn().face(), Some(1));
        assert!(s.turn().selected.is_empty());
        assert!(s.turn().hand[2].is_valid());
    }

    #[test]
    fn no_valid_card_forces_bust() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 30, [rolled(4), rolled(1)], kings());
        let t = s.select_die(0, &mut rng).unwrap();
        assert_eq!(t.delay, LevelRules::default().bust_delay);
        match t.step {
            Step::NextTurn(summary) => {
                assert_eq!(summary.bust, Some(BustReason::NoValidCard));
                assert_eq!(summary.score, 0);
            }
            other => panic!("expected next turn, got {other:?}"),
        }
        assert_eq!(s.turn().turn, 2);
        assert_eq!(s.turn().total_score, 30);
        assert_eq!(s.stats().busts, 1);
        assert_eq!(s.stats().turns_used, 1);
    }

    #[test]
    fn invalid_card_rejected_without_change() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        let before = s.turn().clone();
        let err = s.toggle_card(2).unwrap_err();
        assert!(matches!(err, MechError::InvalidAction(_)));
        assert_eq!(s.turn(), &before);
    }

    #[test]
    fn card_before_die_rejected() {
        let (mut s, _) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        assert!(matches!(
            s.toggle_card(0),
            Err(MechError::InvalidAction(_))
        ));
        assert!(s.toggle_card(9).is_err());
    }

    #[test]
    fn end_turn_needs_die() {
        let (mut s, mut rng) = session(1);
        assert!(matches!(
            s.end_turn(&mut rng),
            Err(MechError::InvalidAction(_))
        ));
        assert_eq!(s.turn().turn, 1);
    }

    #[test]
    fn toggling_rescores() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        assert_eq!(s.turn().turn_score, 40);
        s.toggle_card(1).unwrap();
        assert_eq!(s.turn().turn_score, 80);
        s.toggle_card(0).unwrap();
        assert_eq!(s.turn().turn_score, 40);
        assert_eq!(s.turn().selected, vec![1]);
    }

    #[test]
    fn end_turn_banks_and_advances() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        let t = s.end_turn(&mut rng).unwrap();
        assert_eq!(t.delay, LevelRules::default().next_turn_delay);
        assert!(matches!(t.step, Step::NextTurn(ref summary) if summary.score == 40));
        assert_eq!(s.turn().turn, 2);
        assert_eq!(s.turn().total_score, 40);
        assert_eq!(s.turn().selected_die, None);
        assert_eq!(s.stats().cards_scored, 1);
    }

    #[test]
    fn victory_precedes_defeat() {
        // Level 1: 100 points in 5 turns.
        let (mut s, mut rng) = session(1);
        rig(&mut s, 5, 90, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        let t = s.end_turn(&mut rng).unwrap();
        match t.step {
            Step::Complete(_, LevelOutcome::Victory(reward)) => {
                assert!((50..=75).contains(&reward.silver));
                assert_eq!(reward.level_id, 1);
                assert!(reward.special.is_none());
            }
            other => panic!("expected victory, got {other:?}"),
        }
        assert!(s.is_complete());
    }

    #[test]
    fn defeat_on_last_turn() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 5, 10, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        let t = s.end_turn(&mut rng).unwrap();
        assert!(matches!(t.step, Step::Complete(_, LevelOutcome::Defeat)));
        assert_eq!(s.outcome(), Some(&LevelOutcome::Defeat));
    }

    #[test]
    fn bust_on_last_turn_is_defeat() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 5, 10, [rolled(4), rolled(1)], kings());
        let t = s.select_die(0, &mut rng).unwrap();
        assert!(matches!(t.step, Step::Complete(_, LevelOutcome::Defeat)));
    }

    #[test]
    fn extra_turn_card_keeps_counter() {
        let (mut s, mut rng) = session(1);
        let hand = vec![
            special(CardValue::King, Suit::Hearts, CardEffect::ExtraTurn),
            Card::standard(CardValue::Two, Suit::Spades),
            Card::standard(CardValue::Three, Suit::Spades),
        ];
        rig(&mut s, 5, 10, [rolled(6), rolled(1)], hand);
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        let t = s.end_turn(&mut rng).unwrap();
        assert!(matches!(t.step, Step::NextTurn(ref summary) if summary.extra_turn));
        assert_eq!(s.phase(), &Phase::TurnActive);
        assert_eq!(s.turn().turn, 5);
        assert_eq!(s.turn().total_score, 50);
        assert_eq!(s.stats().extra_turns, 1);
    }

    #[test]
    fn extra_turn_die_keeps_counter() {
        let (mut s, mut rng) = session(1);
        let hourglass = RolledDie {
            die: Die::special("hourglass", "Hourglass", DieEffect::ExtraTurn),
            face: 6,
        };
        rig(&mut s, 3, 0, [hourglass, rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        s.end_turn(&mut rng).unwrap();
        assert_eq!(s.turn().turn, 3);
    }

    #[test]
    fn unselected_extra_turn_card_does_nothing() {
        let (mut s, mut rng) = session(1);
        let hand = vec![
            special(CardValue::King, Suit::Hearts, CardEffect::ExtraTurn),
            Card::standard(CardValue::Queen, Suit::Spades),
            Card::standard(CardValue::Three, Suit::Spades),
        ];
        rig(&mut s, 2, 0, [rolled(6), rolled(1)], hand);
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(1).unwrap();
        s.end_turn(&mut rng).unwrap();
        assert_eq!(s.turn().turn, 3);
    }

    #[test]
    fn gold_card_in_winning_turn_boosts_reward() {
        let (mut s, mut rng) = session(1);
        let hand = vec![
            special(CardValue::King, Suit::Hearts, CardEffect::GoldMultiplier),
            Card::standard(CardValue::Two, Suit::Spades),
            Card::standard(CardValue::Three, Suit::Spades),
        ];
        rig(&mut s, 2, 90, [rolled(6), rolled(1)], hand);
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        match s.end_turn(&mut rng).unwrap().step {
            Step::Complete(_, LevelOutcome::Victory(reward)) => {
                assert!(reward.gold_boosted);
                assert!((63..=94).contains(&reward.silver));
            }
            other => panic!("expected victory, got {other:?}"),
        }
    }

    #[test]
    fn final_level_victory_carries_special() {
        let (mut s, mut rng) = session(10);
        rig(&mut s, 1, 749, [rolled(6), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        match s.end_turn(&mut rng).unwrap().step {
            Step::Complete(_, LevelOutcome::Victory(reward)) => {
                assert_eq!(reward.special.as_deref(), Some("Crown of Nanti"));
            }
            other => panic!("expected victory, got {other:?}"),
        }
    }

    #[test]
    fn actions_after_completion_rejected() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 5, 10, [rolled(4), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        assert!(matches!(
            s.select_die(1, &mut rng),
            Err(MechError::LevelFinished)
        ));
        assert!(matches!(s.end_turn(&mut rng), Err(MechError::LevelFinished)));
        assert!(matches!(s.draw_card(&mut rng), Err(MechError::LevelFinished)));
    }

    #[test]
    fn invalid_draw_busts() {
        let (mut s, mut rng) = session(1);
        s.catalog.combinations.insert(
            1,
            CombinationRule {
                cards: vec![CardValue::Ace],
                points: 10,
            },
        );
        let aces = Suit::ALL
            .iter()
            .map(|&suit| Card::standard(CardValue::Ace, suit))
            .collect();
        rig(&mut s, 1, 0, [rolled(1), rolled(2)], aces);
        s.select_die(0, &mut rng).unwrap();
        s.toggle_card(0).unwrap();
        let t = s.draw_card(&mut rng).unwrap();
        match t.step {
            Step::NextTurn(summary) => {
                assert!(matches!(summary.bust, Some(BustReason::InvalidDraw(_))));
                assert_eq!(summary.score, 0);
            }
            other => panic!("expected bust, got {other:?}"),
        }
        assert_eq!(s.turn().total_score, 0);
        assert_eq!(s.turn().turn, 2);
    }

    #[test]
    fn valid_draw_joins_hand_once() {
        let (mut s, mut rng) = session(1);
        s.catalog.combinations.insert(
            2,
            CombinationRule {
                cards: CardValue::ALL.to_vec(),
                points: 5,
            },
        );
        rig(&mut s, 1, 0, [rolled(2), rolled(1)], kings());
        s.select_die(0, &mut rng).unwrap();
        let t = s.draw_card(&mut rng).unwrap();
        assert_eq!(t.step, Step::Updated);
        assert_eq!(s.turn().hand.len(), 4);
        assert!(s.turn().hand[3].is_valid());
        s.toggle_card(3).unwrap();
        assert!(matches!(
            s.draw_card(&mut rng),
            Err(MechError::InvalidAction(_))
        ));
    }

    #[test]
    fn draw_needs_die() {
        let (mut s, mut rng) = session(1);
        assert!(matches!(
            s.draw_card(&mut rng),
            Err(MechError::InvalidAction(_))
        ));
    }

    #[test]
    fn missing_rule_is_fatal_and_leaves_state() {
        let (mut s, mut rng) = session(1);
        rig(&mut s, 1, 0, [rolled(6), rolled(1)], kings());
        s.catalog.combinations.remove(&6);
        let before = s.turn().clone();
        let err = s.select_die(0, &mut rng).unwrap_err();
        assert!(matches!(err, MechError::MissingCombinationRule(6)));
        assert_eq!(s.turn(), &before);
    }

    #[test]
    fn long_levels_reshuffle_and_keep_deck() {
        let mut rng = rng();
        let mut catalog = Catalog::default();
        catalog.levels[0].goal.turns = 40;
        catalog.levels[0].goal.points = 100_000;
        let mut s = LevelSession::start(
            &catalog,
            1,
            &Inventory::starter(),
            LevelRules::default(),
            &mut rng,
        )
        .unwrap();
        while !s.is_complete() {
            s.select_die(0, &mut rng).unwrap();
            if !s.turn().ended && s.turn().selected_die.is_some() {
                s.end_turn(&mut rng).unwrap();
            }
        }
        assert!(s.pile().reshuffles() > 0);
        assert_eq!(s.pile().deck().len(), 52);
        assert_eq!(s.stats().turns_used, 40);
        assert_eq!(s.outcome(), Some(&LevelOutcome::Defeat));
    }
}
