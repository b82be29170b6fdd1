//! The 52-slot active deck and the shuffled draw pile built from it.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::{Card, CardValue, Suit};

/// Number of slots in a deck.
pub const DECK_SIZE: usize = 52;

/// The active deck: exactly one card per (value, suit) slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A deck of 52 standard cards.
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| {
                CardValue::ALL
                    .iter()
                    .map(move |&value| Card::standard(value, suit))
            })
            .collect();
        Self { cards }
    }

    /// A standard deck with some slots replaced.
    ///
    /// Each override replaces the card in its own slot. When two overrides
    /// target the same slot the later one wins.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut deck = Self::standard();
        for card in overrides {
            deck.replace(card.clone());
        }
        deck
    }

    /// Put `card` into its slot, returning the card it displaced.
    pub fn replace(&mut self, card: Card) -> Card {
        let index = slot_index(card.value, card.suit);
        std::mem::replace(&mut self.cards[index], card)
    }

    /// The card currently in a slot.
    pub fn slot(&self, value: CardValue, suit: Suit) -> &Card {
        &self.cards[slot_index(value, suit)]
    }

    /// All cards in slot order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards (always 52).
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// A deck is never empty; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

fn slot_index(value: CardValue, suit: Suit) -> usize {
    suit.index() * CardValue::ALL.len() + value.index()
}

/// A shuffled pile of cards drawn from a [`Deck`] during one level.
///
/// When the pile runs dry mid-deal a fresh full deck is shuffled in. Cards
/// already dealt in the current hand are not held back from the new pile.
#[derive(Debug, Clone)]
pub struct DrawPile {
    deck: Deck,
    pile: Vec<Card>,
    reshuffles: u32,
}

impl DrawPile {
    /// Shuffle a fresh pile from `deck`.
    pub fn new(deck: Deck, rng: &mut StdRng) -> Self {
        let mut pile = Self {
            deck,
            pile: Vec::new(),
            reshuffles: 0,
        };
        pile.refill(rng);
        pile
    }

    /// Deal `count` cards off the top, reshuffling if the pile empties.
    pub fn deal_hand(&mut self, count: usize, rng: &mut StdRng) -> Vec<Card> {
        let mut hand = Vec::with_capacity(count);
        while hand.len() < count {
            match self.pile.pop() {
                Some(card) => hand.push(card),
                None => {
                    self.reshuffles += 1;
                    tracing::debug!(reshuffles = self.reshuffles, "draw pile exhausted, reshuffling");
                    self.refill(rng);
                }
            }
        }
        hand
    }

    /// Draw one extra card that is not already in `hand`.
    ///
    /// Picks uniformly from the whole deck, not from the pile, and never
    /// returns a card sharing a (value, suit) slot with a card in `hand`.
    pub fn draw_one(&self, hand: &[Card], rng: &mut StdRng) -> Option<Card> {
        let candidates: Vec<&Card> = self
            .deck
            .cards()
            .iter()
            .filter(|c| !hand.iter().any(|h| h.same_slot(c)))
            .collect();
        candidates.choose(rng).map(|c| (*c).clone())
    }

    /// Cards left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    /// How many times the pile was rebuilt after running out.
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// The deck this pile draws from.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    fn refill(&mut self, rng: &mut StdRng) {
        self.pile = self.deck.cards().to_vec();
        self.pile.shuffle(rng);
    }
}
