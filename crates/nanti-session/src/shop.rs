//! The shop: built-in stock, admin-added items, and purchases.
//!
//! Items added through the content store arrive as [`ItemDefinition`]s, a
//! loose format with a string effect tag. They are validated and turned into
//! typed [`ShopItem`]s before they can be sold.

use nanti_mechanics::{
    Card, CardEffect, CardKind, CardValue, Die, DieEffect, DieKind, FaceWeights, MechError,
    MechResult, Suit,
};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::profile::Profile;
use crate::store::{KeyValueStore, SHOP_ITEMS_KEY, load_json, save_json};

/// How rare an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Common.
    Common,
    /// Rare.
    Rare,
    /// Epic.
    Epic,
    /// Legendary.
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::Rare => write!(f, "rare"),
            Self::Epic => write!(f, "epic"),
            Self::Legendary => write!(f, "legendary"),
        }
    }
}

/// What buying an item puts in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Goods {
    /// A die.
    Die(Die),
    /// A skin or special card.
    Card(Card),
}

/// An item for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    /// Unique id, shared with the owned die or card.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in silver.
    pub price: u32,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Flavor text.
    pub description: String,
    /// Optional image reference.
    pub image: Option<String>,
    /// The die or card sold.
    pub goods: Goods,
}

impl ShopItem {
    /// Short description of what the item is.
    pub fn kind_label(&self) -> String {
        match &self.goods {
            Goods::Die(die) => match &die.effect {
                Some(effect) => format!("die, {effect}"),
                None => "die".to_string(),
            },
            Goods::Card(card) => match &card.effect {
                Some(effect) => format!("{}{}, {effect}", card.value, card.suit.symbol()),
                None => format!("{}{} skin", card.value, card.suit.symbol()),
            },
        }
    }
}

/// The kind of item an [`ItemDefinition`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    /// A die.
    Die,
    /// A cosmetic card.
    CardSkin,
    /// A card with an effect.
    SpecialCard,
}

/// An item as authored in the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in silver.
    pub price: u32,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// What kind of item this is.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Effect tag, e.g. `weightedLow` or `wildcard`.
    #[serde(default)]
    pub effect: Option<String>,
    /// Magnitude for `pointsMultiplier`.
    #[serde(default)]
    pub value: Option<f64>,
    /// Custom face weights for weighted dice.
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    /// Per-face images for dice.
    #[serde(default)]
    pub face_images: Vec<String>,
    /// Deck slot value for cards.
    #[serde(default)]
    pub card: Option<CardValue>,
    /// Deck slot suit for cards.
    #[serde(default)]
    pub suit: Option<Suit>,
}

impl ItemDefinition {
    /// Validate the definition and build the typed item.
    pub fn into_item(self) -> MechResult<ShopItem> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(invalid(&self.id, "id and name are required"));
        }
        if let Some(v) = self.value
            && (!v.is_finite() || v < 1.0)
        {
            return Err(invalid(&self.id, "value must be a number of at least 1"));
        }

        let goods = match self.item_type {
            ItemType::Die => Goods::Die(self.build_die()?),
            ItemType::CardSkin | ItemType::SpecialCard => Goods::Card(self.build_card()?),
        };
        Ok(ShopItem {
            id: self.id,
            name: self.name,
            price: self.price,
            rarity: self.rarity,
            description: self.description,
            image: self.image,
            goods,
        })
    }

    fn build_die(&self) -> MechResult<Die> {
        let effect = match self.effect.as_deref() {
            None => None,
            Some("weightedLow") => Some(DieEffect::WeightedLow),
            Some("weightedHigh") => Some(DieEffect::WeightedHigh),
            Some("weightedEven") => Some(DieEffect::WeightedEven),
            Some("weightedOdd") => Some(DieEffect::WeightedOdd),
            Some("pointsMultiplier") => Some(DieEffect::PointsMultiplier(
                self.value.unwrap_or(DieEffect::DEFAULT_POINTS_MULTIPLIER),
            )),
            Some("extraTurn") => Some(DieEffect::ExtraTurn),
            Some(other) => {
                return Err(invalid(&self.id, &format!("unknown die effect '{other}'")));
            }
        };

        let weights = match &self.weights {
            None => None,
            Some(raw) => {
                if effect.and_then(DieEffect::weights).is_none() {
                    return Err(invalid(&self.id, "weights need a weighted effect"));
                }
                let table: [f64; 6] = raw
                    .as_slice()
                    .try_into()
                    .map_err(|_| invalid(&self.id, "weights need exactly 6 entries"))?;
                Some(FaceWeights::new(table)?)
            }
        };

        if !self.face_images.is_empty() && self.face_images.len() != 6 {
            return Err(invalid(&self.id, "face images need exactly 6 entries"));
        }

        Ok(Die {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: if effect.is_some() {
                DieKind::Special
            } else {
                DieKind::Standard
            },
            effect,
            weights,
            face_images: self.face_images.clone(),
        })
    }

    fn build_card(&self) -> MechResult<Card> {
        let (Some(value), Some(suit)) = (self.card, self.suit) else {
            return Err(invalid(&self.id, "cards need a value and a suit"));
        };
        let (kind, effect) = match (self.item_type, self.effect.as_deref()) {
            (ItemType::CardSkin, None) => (CardKind::CardSkin, None),
            (ItemType::CardSkin, Some(_)) => {
                return Err(invalid(&self.id, "card skins carry no effect"));
            }
            (_, Some("pointsMultiplier")) => {
                if self
                    .value
                    .is_some_and(|v| v != CardEffect::POINTS_MULTIPLIER)
                {
                    return Err(invalid(
                        &self.id,
                        &format!(
                            "card multipliers are fixed at {}",
                            CardEffect::POINTS_MULTIPLIER
                        ),
                    ));
                }
                (CardKind::SpecialCard, Some(CardEffect::PointsMultiplier))
            }
            (_, Some("wildcard")) => (CardKind::SpecialCard, Some(CardEffect::Wildcard)),
            (_, Some("extraTurn")) => (CardKind::SpecialCard, Some(CardEffect::ExtraTurn)),
            (_, Some("goldMultiplier")) => {
                (CardKind::SpecialCard, Some(CardEffect::GoldMultiplier))
            }
            (_, Some(other)) => {
                return Err(invalid(&self.id, &format!("unknown card effect '{other}'")));
            }
            (_, None) => return Err(invalid(&self.id, "special cards need an effect")),
        };
        Ok(Card {
            id: self.id.clone(),
            name: self.name.clone(),
            value,
            suit,
            kind,
            effect,
            image: self.image.clone(),
        })
    }
}

fn invalid(id: &str, reason: &str) -> MechError {
    MechError::InvalidItem(format!("{id}: {reason}"))
}

/// Everything on sale.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    items: Vec<ShopItem>,
}

impl Shop {
    /// The built-in stock only.
    pub fn builtin() -> Self {
        Self {
            items: builtin_stock(),
        }
    }

    /// Built-in stock plus the items stored in the content store.
    ///
    /// Stored definitions that fail validation are skipped with a warning.
    pub fn load(store: &dyn KeyValueStore) -> SessionResult<Self> {
        let mut shop = Self::builtin();
        let defs: Vec<ItemDefinition> = load_json(store, SHOP_ITEMS_KEY)?.unwrap_or_default();
        for def in defs {
            let id = def.id.clone();
            match def.into_item() {
                Ok(item) if shop.find(&item.id).is_none() => shop.items.push(item),
                Ok(_) => tracing::warn!(id, "skipping duplicate shop item"),
                Err(e) => tracing::warn!(id, error = %e, "skipping invalid shop item"),
            }
        }
        Ok(shop)
    }

    /// Validate `defs` and append them to the content store.
    ///
    /// Nothing is written unless every definition is valid and new.
    /// Returns the number of items added.
    pub fn add_definitions(
        store: &mut dyn KeyValueStore,
        defs: Vec<ItemDefinition>,
    ) -> SessionResult<usize> {
        let mut shop = Self::load(store)?;
        let mut stored: Vec<ItemDefinition> =
            load_json(store, SHOP_ITEMS_KEY)?.unwrap_or_default();
        let count = defs.len();
        for def in defs {
            let item = def.clone().into_item()?;
            if shop.find(&item.id).is_some() {
                return Err(SessionError::InvalidChoice(format!(
                    "shop item '{}' already exists",
                    item.id
                )));
            }
            shop.items.push(item);
            stored.push(def);
        }
        save_json(store, SHOP_ITEMS_KEY, &stored)?;
        tracing::info!(count, "added shop items");
        Ok(count)
    }

    /// All items, built-in stock first.
    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn find(&self, id: &str) -> Option<&ShopItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Whether the profile already owns this item.
    pub fn is_owned(item: &ShopItem, profile: &Profile) -> bool {
        match &item.goods {
            Goods::Die(die) => profile.inventory.owns_die(&die.id),
            Goods::Card(card) => profile.inventory.owns_card(&card.id),
        }
    }

    /// Buy `id`: deduct the price and add the item to the inventory.
    pub fn purchase(&self, id: &str, profile: &mut Profile) -> SessionResult<&ShopItem> {
        let item = self
            .find(id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))?;
        if Self::is_owned(item, profile) {
            return Err(SessionError::InvalidChoice(format!(
                "you already own {}",
                item.name
            )));
        }
        if item.price > profile.silver {
            return Err(SessionError::NotEnoughSilver {
                price: item.price,
                available: profile.silver,
            });
        }
        match &item.goods {
            Goods::Die(die) => profile.inventory.add_die(die.clone())?,
            Goods::Card(card) => profile.inventory.add_card(card.clone())?,
        }
        profile.spend(item.price)?;
        tracing::info!(item = %item.id, price = item.price, "purchased item");
        Ok(item)
    }
}

fn stock_die(
    id: &str,
    name: &str,
    effect: DieEffect,
    price: u32,
    rarity: Rarity,
    description: &str,
) -> ShopItem {
    ShopItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        rarity,
        description: description.to_string(),
        image: Some(format!("dice/{id}.png")),
        goods: Goods::Die(Die::special(id, name, effect)),
    }
}

fn stock_card(
    id: &str,
    name: &str,
    slot: (CardValue, Suit),
    effect: Option<CardEffect>,
    price: u32,
    rarity: Rarity,
    description: &str,
) -> ShopItem {
    let image = Some(format!("cards/{id}.png"));
    ShopItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        rarity,
        description: description.to_string(),
        image: image.clone(),
        goods: Goods::Card(Card {
            id: id.to_string(),
            name: name.to_string(),
            value: slot.0,
            suit: slot.1,
            kind: if effect.is_some() {
                CardKind::SpecialCard
            } else {
                CardKind::CardSkin
            },
            effect,
            image,
        }),
    }
}

fn builtin_stock() -> Vec<ShopItem> {
    use CardValue::*;
    use Suit::*;

    vec![
        stock_die(
            "die-ember",
            "Ember Die",
            DieEffect::WeightedLow,
            120,
            Rarity::Common,
            "Banked coals favor the low faces.",
        ),
        stock_die(
            "die-sunforged",
            "Sunforged Die",
            DieEffect::WeightedHigh,
            150,
            Rarity::Rare,
            "Hammered at noon, it leans towards six.",
        ),
        stock_die(
            "die-twin-moons",
            "Twin Moons Die",
            DieEffect::WeightedEven,
            140,
            Rarity::Rare,
            "Rolls in pairs, like the moons over Nanti.",
        ),
        stock_die(
            "die-lone-star",
            "Lone Star Die",
            DieEffect::WeightedOdd,
            140,
            Rarity::Rare,
            "Guided by a single star.",
        ),
        stock_die(
            "die-gilded",
            "Gilded Die",
            DieEffect::PointsMultiplier(DieEffect::DEFAULT_POINTS_MULTIPLIER),
            300,
            Rarity::Epic,
            "Scores half again when chosen.",
        ),
        stock_die(
            "die-hourglass",
            "Hourglass Die",
            DieEffect::ExtraTurn,
            400,
            Rarity::Legendary,
            "Sand runs upward for whoever plays it.",
        ),
        stock_card(
            "card-trickster-queen",
            "Trickster Queen",
            (Queen, Hearts),
            Some(CardEffect::Wildcard),
            250,
            Rarity::Epic,
            "Plays on any face.",
        ),
        stock_card(
            "card-merchant-king",
            "Merchant King",
            (King, Diamonds),
            Some(CardEffect::GoldMultiplier),
            350,
            Rarity::Legendary,
            "Win with him on the table for a quarter more silver.",
        ),
        stock_card(
            "card-twin-blade-ace",
            "Twin-Blade Ace",
            (Ace, Spades),
            Some(CardEffect::PointsMultiplier),
            200,
            Rarity::Rare,
            "Cuts twice: half again the base points.",
        ),
        stock_card(
            "card-echo-seven",
            "Echo Seven",
            (Seven, Clubs),
            Some(CardEffect::ExtraTurn),
            220,
            Rarity::Epic,
            "Score it and the turn comes round again.",
        ),
        stock_card(
            "skin-lantern-ten",
            "Lantern Ten",
            (Ten, Hearts),
            None,
            60,
            Rarity::Common,
            "Painted by the harbor lamplighters.",
        ),
        stock_card(
            "skin-raven-jack",
            "Raven Jack",
            (Jack, Spades),
            None,
            80,
            Rarity::Common,
            "A court favorite.",
        ),
    ]
}
