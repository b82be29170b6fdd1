//! Catalog: levels, combination rules, and scoring multipliers.
//!
//! A [`Catalog`] is the fixed rule data the engine reads. The built-in
//! campaign lives in [`preset`]; a catalog can also be loaded from JSON and
//! checked with [`Catalog::validate`].

pub mod preset;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::card::CardValue;
use crate::dice::FACES;
use crate::error::{MechError, MechResult};

/// What a level asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Points needed to win.
    pub points: u32,
    /// Turns available.
    pub turns: u32,
}

/// What a level pays out on victory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rewards {
    /// Lowest silver payout.
    pub silver_min: u32,
    /// Highest silver payout.
    pub silver_max: u32,
    /// Special item minted on completion, final level only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
}

/// One level of the campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level number, starting at 1.
    pub id: u32,
    /// Level name.
    pub name: String,
    /// Narrative text shown before play.
    #[serde(default)]
    pub lore: String,
    /// Points and turns.
    pub goal: Goal,
    /// Silver range and special reward.
    pub rewards: Rewards,
}

/// Which card values score against a die face, and for how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRule {
    /// Legal card values.
    pub cards: Vec<CardValue>,
    /// Points per matching card.
    pub points: u32,
}

impl CombinationRule {
    /// Whether a card value is legal for this face.
    pub fn allows(&self, value: CardValue) -> bool {
        self.cards.contains(&value)
    }
}

/// Multiplier brackets for cards sharing a suit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SameSuitTiers {
    /// Two cards of one suit.
    #[serde(rename = "2")]
    pub two: f64,
    /// Three cards of one suit.
    #[serde(rename = "3")]
    pub three: f64,
    /// Four or more cards of one suit.
    #[serde(rename = "4")]
    pub four_or_more: f64,
}

impl SameSuitTiers {
    /// The multiplier for the largest same-suit group size.
    pub fn for_count(&self, max_same_suit: usize) -> f64 {
        match max_same_suit {
            0 | 1 => 1.0,
            2 => self.two,
            3 => self.three,
            _ => self.four_or_more,
        }
    }
}

/// Score multipliers applied on top of base points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplierTable {
    /// Multiplier compounded once per selected ace.
    pub aces: f64,
    /// Same-suit brackets.
    pub same_suit: SameSuitTiers,
}

/// The complete rule data for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Levels in unlock order.
    pub levels: Vec<Level>,
    /// Combination rules keyed by die face.
    pub combinations: BTreeMap<u8, CombinationRule>,
    /// Score multipliers.
    pub multipliers: MultiplierTable,
}

impl Catalog {
    /// Parse a catalog from JSON and validate it.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|e| MechError::InvalidCatalog(format!("malformed catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every catalog invariant.
    pub fn validate(&self) -> MechResult<()> {
        for face in 1..=FACES {
            let rule = self.rule(face)?;
            if rule.cards.is_empty() {
                return Err(MechError::InvalidCatalog(format!(
                    "face {face} has no legal cards"
                )));
            }
            if rule.points == 0 {
                return Err(MechError::InvalidCatalog(format!(
                    "face {face} awards no points"
                )));
            }
        }
        if let Some(face) = self.combinations.keys().find(|f| !(1..=FACES).contains(*f)) {
            return Err(MechError::InvalidCatalog(format!(
                "combination rule for impossible face {face}"
            )));
        }

        let m = &self.multipliers;
        for (name, value) in [
            ("aces", m.aces),
            ("same suit 2", m.same_suit.two),
            ("same suit 3", m.same_suit.three),
            ("same suit 4", m.same_suit.four_or_more),
        ] {
            if !value.is_finite() || value < 1.0 {
                return Err(MechError::InvalidCatalog(format!(
                    "{name} multiplier must be at least 1.0, got {value}"
                )));
            }
        }

        if self.levels.is_empty() {
            return Err(MechError::InvalidCatalog("no levels".to_string()));
        }
        for (i, level) in self.levels.iter().enumerate() {
            let expected = i as u32 + 1;
            if level.id != expected {
                return Err(MechError::InvalidCatalog(format!(
                    "level ids must run 1..n in order, found {} at position {expected}",
                    level.id
                )));
            }
            if level.goal.points == 0 || level.goal.turns == 0 {
                return Err(MechError::InvalidCatalog(format!(
                    "level {} needs a positive goal",
                    level.id
                )));
            }
            if level.rewards.silver_min > level.rewards.silver_max {
                return Err(MechError::InvalidCatalog(format!(
                    "level {} silver range is inverted",
                    level.id
                )));
            }
        }
        Ok(())
    }

    /// Look up a level by id.
    pub fn level(&self, id: u32) -> MechResult<&Level> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or(MechError::UnknownLevel(id))
    }

    /// Look up the combination rule for a die face.
    pub fn rule(&self, face: u8) -> MechResult<&CombinationRule> {
        self.combinations
            .get(&face)
            .ok_or(MechError::MissingCombinationRule(face))
    }

    /// The id of the last level.
    pub fn final_level_id(&self) -> u32 {
        self.levels.last().map(|l| l.id).unwrap_or(0)
    }

    /// Whether `id` is the last level.
    pub fn is_final_level(&self, id: u32) -> bool {
        id == self.final_level_id()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        preset::lands_of_nanti()
    }
}
