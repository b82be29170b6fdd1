//! Playing cards, deck slots, and dealing.
//!
//! A card occupies one of the 52 (value, suit) slots of the active deck.
//! Skins and special cards replace the standard card in their slot; they
//! never add a 53rd card.

pub mod deck;

pub use deck::{Deck, DrawPile};

use serde::{Deserialize, Serialize};

/// The rank printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardValue {
    /// Two.
    #[serde(rename = "2")]
    Two,
    /// Three.
    #[serde(rename = "3")]
    Three,
    /// Four.
    #[serde(rename = "4")]
    Four,
    /// Five.
    #[serde(rename = "5")]
    Five,
    /// Six.
    #[serde(rename = "6")]
    Six,
    /// Seven.
    #[serde(rename = "7")]
    Seven,
    /// Eight.
    #[serde(rename = "8")]
    Eight,
    /// Nine.
    #[serde(rename = "9")]
    Nine,
    /// Ten.
    #[serde(rename = "10")]
    Ten,
    /// Jack.
    #[serde(rename = "J")]
    Jack,
    /// Queen.
    #[serde(rename = "Q")]
    Queen,
    /// King.
    #[serde(rename = "K")]
    King,
    /// Ace.
    #[serde(rename = "A")]
    Ace,
}

impl CardValue {
    /// All thirteen values in deck order.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Position in [`CardValue::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Two => 0,
            Self::Three => 1,
            Self::Four => 2,
            Self::Five => 3,
            Self::Six => 4,
            Self::Seven => 5,
            Self::Eight => 6,
            Self::Nine => 7,
            Self::Ten => 8,
            Self::Jack => 9,
            Self::Queen => 10,
            Self::King => 11,
            Self::Ace => 12,
        }
    }

    /// The short label used on the card face ("2".."10", "J", "Q", "K", "A").
    pub fn label(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }

    /// Parse a value from a label like "10", "q" or "ace".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "2" | "two" => Some(Self::Two),
            "3" | "three" => Some(Self::Three),
            "4" | "four" => Some(Self::Four),
            "5" | "five" => Some(Self::Five),
            "6" | "six" => Some(Self::Six),
            "7" | "seven" => Some(Self::Seven),
            "8" | "eight" => Some(Self::Eight),
            "9" | "nine" => Some(Self::Nine),
            "10" | "ten" => Some(Self::Ten),
            "j" | "jack" => Some(Self::Jack),
            "q" | "queen" => Some(Self::Queen),
            "k" | "king" => Some(Self::King),
            "a" | "ace" => Some(Self::Ace),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the four suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    /// Position in [`Suit::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Hearts => 0,
            Self::Diamonds => 1,
            Self::Clubs => 2,
            Self::Spades => 3,
        }
    }

    /// The suit symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }

    /// Parse a suit from a name, initial, or symbol.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hearts" | "heart" | "h" | "♥" => Some(Self::Hearts),
            "diamonds" | "diamond" | "d" | "♦" => Some(Self::Diamonds),
            "clubs" | "club" | "c" | "♣" => Some(Self::Clubs),
            "spades" | "spade" | "s" | "♠" => Some(Self::Spades),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hearts => write!(f, "hearts"),
            Self::Diamonds => write!(f, "diamonds"),
            Self::Clubs => write!(f, "clubs"),
            Self::Spades => write!(f, "spades"),
        }
    }
}

/// Whether a card is the plain deck card, a cosmetic skin, or a special card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    /// The default card for its slot.
    #[default]
    Standard,
    /// A cosmetic replacement with no effect.
    CardSkin,
    /// A replacement that carries an effect.
    SpecialCard,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::CardSkin => write!(f, "card-skin"),
            Self::SpecialCard => write!(f, "special-card"),
        }
    }
}

/// An effect carried by a special card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardEffect {
    /// Multiplies this card's base points by [`CardEffect::POINTS_MULTIPLIER`].
    PointsMultiplier,
    /// Valid against every die face.
    Wildcard,
    /// Scoring this card keeps the turn counter where it is.
    ExtraTurn,
    /// Scoring this card in the winning turn boosts the silver reward.
    GoldMultiplier,
}

impl CardEffect {
    /// Factor a points multiplier card applies to its own base points.
    pub const POINTS_MULTIPLIER: f64 = 1.5;
}

impl std::fmt::Display for CardEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PointsMultiplier => write!(f, "points x{}", Self::POINTS_MULTIPLIER),
            Self::Wildcard => write!(f, "wildcard"),
            Self::ExtraTurn => write!(f, "extra turn"),
            Self::GoldMultiplier => write!(f, "gold x1.25"),
        }
    }
}

/// A single card instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique id of this card instance.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The card's value.
    pub value: CardValue,
    /// The card's suit.
    pub suit: Suit,
    /// Standard, skin, or special.
    #[serde(default)]
    pub kind: CardKind,
    /// Optional special effect.
    #[serde(default)]
    pub effect: Option<CardEffect>,
    /// Optional image reference for the card face.
    #[serde(default)]
    pub image: Option<String>,
}

impl Card {
    /// The standard card for a deck slot.
    pub fn standard(value: CardValue, suit: Suit) -> Self {
        Self {
            id: standard_id(value, suit),
            name: format!("{value} of {suit}"),
            value,
            suit,
            kind: CardKind::Standard,
            effect: None,
            image: None,
        }
    }

    /// The (value, suit) slot this card occupies.
    pub fn slot(&self) -> (CardValue, Suit) {
        (self.value, self.suit)
    }

    /// Whether the card is an ace.
    pub fn is_ace(&self) -> bool {
        self.value == CardValue::Ace
    }

    /// Whether this card shares a slot with `other`.
    pub fn same_slot(&self, other: &Card) -> bool {
        self.slot() == other.slot()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.suit.symbol())?;
        if let Some(effect) = &self.effect {
            write!(f, " ({effect})")?;
        }
        Ok(())
    }
}

/// The id of the standard card in a slot, e.g. `std-10-hearts`.
pub fn standard_id(value: CardValue, suit: Suit) -> String {
    format!("std-{}-{suit}", value.label())
}
