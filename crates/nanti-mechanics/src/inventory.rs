//! The player's owned dice and cards, and what is equipped for play.

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardKind, CardValue, Deck, Suit};
use crate::dice::Die;
use crate::error::{MechError, MechResult};

/// Most dice that can be active at once.
pub const MAX_ACTIVE_DICE: usize = 5;
/// Fewest dice an explicit selection may hold.
pub const MIN_ACTIVE_DICE: usize = 2;

/// Owned items plus the active dice selection and deck slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    dice: Vec<Die>,
    cards: Vec<Card>,
    active_dice: Vec<String>,
    equipped: Vec<String>,
}

impl Inventory {
    /// A new player's inventory: two standard dice, a standard deck.
    pub fn starter() -> Self {
        let dice = vec![Die::standard("standard-1"), Die::standard("standard-2")];
        let active_dice = dice.iter().map(|d| d.id.clone()).collect();
        Self {
            dice,
            cards: Vec::new(),
            active_dice,
            equipped: Vec::new(),
        }
    }

    /// All owned dice.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// All owned skins and special cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether a die with this id is owned.
    pub fn owns_die(&self, id: &str) -> bool {
        self.dice.iter().any(|d| d.id == id)
    }

    /// Whether a card with this id is owned.
    pub fn owns_card(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Add a die to the collection.
    pub fn add_die(&mut self, die: Die) -> MechResult<()> {
        if self.owns_die(&die.id) {
            return Err(MechError::InvalidInventory(format!(
                "die '{}' is already owned",
                die.id
            )));
        }
        self.dice.push(die);
        Ok(())
    }

    /// Add a skin or special card to the collection.
    pub fn add_card(&mut self, card: Card) -> MechResult<()> {
        if card.kind == CardKind::Standard {
            return Err(MechError::InvalidInventory(
                "standard cards are part of every deck".to_string(),
            ));
        }
        if self.owns_card(&card.id) {
            return Err(MechError::InvalidInventory(format!(
                "card '{}' is already owned",
                card.id
            )));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Replace the active dice selection.
    pub fn select_dice(&mut self, ids: &[&str]) -> MechResult<()> {
        if !(MIN_ACTIVE_DICE..=MAX_ACTIVE_DICE).contains(&ids.len()) {
            return Err(MechError::InvalidInventory(format!(
                "select between {MIN_ACTIVE_DICE} and {MAX_ACTIVE_DICE} dice"
            )));
        }
        for (i, id) in ids.iter().enumerate() {
            if !self.owns_die(id) {
                return Err(MechError::InvalidInventory(format!("no die '{id}' owned")));
            }
            if ids[..i].contains(id) {
                return Err(MechError::InvalidInventory(format!(
                    "die '{id}' selected twice"
                )));
            }
        }
        self.active_dice = ids.iter().map(|s| s.to_string()).collect();
        Ok(())
    }

    /// The active dice, in selection order.
    pub fn active_dice(&self) -> Vec<Die> {
        self.active_dice
            .iter()
            .filter_map(|id| self.dice.iter().find(|d| &d.id == id))
            .cloned()
            .collect()
    }

    /// Put an owned card into its deck slot.
    ///
    /// Returns the id of the card it displaced, if the slot held a non-standard card.
    pub fn equip_card(&mut self, id: &str) -> MechResult<Option<String>> {
        let card = self
            .cards
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| MechError::InvalidInventory(format!("no card '{id}' owned")))?;
        let slot = card.slot();
        let displaced = self.reset_slot(slot.0, slot.1);
        self.equipped.push(id.to_string());
        Ok(displaced)
    }

    /// Return a slot to its standard card. Returns the id of the card removed.
    pub fn reset_slot(&mut self, value: CardValue, suit: Suit) -> Option<String> {
        let position = self.equipped.iter().position(|eid| {
            self.cards
                .iter()
                .any(|c| &c.id == eid && c.slot() == (value, suit))
        })?;
        Some(self.equipped.remove(position))
    }

    /// The owned cards currently occupying deck slots.
    pub fn equipped_cards(&self) -> Vec<&Card> {
        self.equipped
            .iter()
            .filter_map(|id| self.cards.iter().find(|c| &c.id == id))
            .collect()
    }

    /// Whether a card id is equipped.
    pub fn is_equipped(&self, id: &str) -> bool {
        self.equipped.iter().any(|e| e == id)
    }

    /// Build the 52-card deck used in play.
    pub fn active_deck(&self) -> Deck {
        Deck::with_overrides(self.equipped_cards())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::starter()
    }
}
