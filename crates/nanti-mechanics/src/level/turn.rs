//! Per-turn state: the rolled dice, the hand, and the player's picks.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::dice::RolledDie;

/// A card in the current hand and whether it matches the selected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealtCard {
    /// The card.
    pub card: Card,
    /// `None` until a die is selected.
    pub valid: Option<bool>,
}

impl DealtCard {
    /// A freshly dealt card, not yet checked against a face.
    pub fn new(card: Card) -> Self {
        Self { card, valid: None }
    }

    /// Whether the card has been marked as playable.
    pub fn is_valid(&self) -> bool {
        self.valid == Some(true)
    }
}

/// The live state of one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnState {
    /// Turn counter, starting at 1. Extra turns do not advance it.
    pub turn: u32,
    /// Points banked from previous turns.
    pub total_score: u32,
    /// Score of the current selection.
    pub turn_score: u32,
    /// The two dice rolled this turn.
    pub dice: [RolledDie; 2],
    /// Index into `dice` of the chosen die.
    pub selected_die: Option<usize>,
    /// Dealt cards, in deal order, plus any drawn card.
    pub hand: Vec<DealtCard>,
    /// Indices into `hand`, in the order they were selected.
    pub selected: Vec<usize>,
    /// Whether the one extra draw was used.
    pub drawn: bool,
    /// Set once the turn has been resolved.
    pub ended: bool,
}

impl TurnState {
    /// Start a turn with freshly rolled dice and a dealt hand.
    pub fn new(turn: u32, total_score: u32, dice: [RolledDie; 2], hand: Vec<Card>) -> Self {
        Self {
            turn,
            total_score,
            turn_score: 0,
            dice,
            selected_die: None,
            hand: hand.into_iter().map(DealtCard::new).collect(),
            selected: Vec::new(),
            drawn: false,
            ended: false,
        }
    }

    /// The chosen die and its face.
    pub fn chosen(&self) -> Option<&RolledDie> {
        self.selected_die.and_then(|i| self.dice.get(i))
    }

    /// The face of the chosen die.
    pub fn face(&self) -> Option<u8> {
        self.chosen().map(|d| d.face)
    }

    /// The selected cards, in selection order.
    pub fn selected_cards(&self) -> Vec<Card> {
        self.selected
            .iter()
            .filter_map(|&i| self.hand.get(i))
            .map(|d| d.card.clone())
            .collect()
    }

    /// Whether hand index `i` is selected.
    pub fn is_selected(&self, i: usize) -> bool {
        self.selected.contains(&i)
    }

    /// The cards in hand.
    pub fn hand_cards(&self) -> Vec<Card> {
        self.hand.iter().map(|d| d.card.clone()).collect()
    }
}
