//! The built-in Lands of Nanti campaign.

use std::collections::BTreeMap;

use crate::card::CardValue::{self, *};
use crate::catalog::{
    Catalog, CombinationRule, Goal, Level, MultiplierTable, Rewards, SameSuitTiers,
};

/// The ten-level campaign with its combination table and multipliers.
pub fn lands_of_nanti() -> Catalog {
    Catalog {
        levels: levels(),
        combinations: combinations(),
        multipliers: MultiplierTable {
            aces: 1.5,
            same_suit: SameSuitTiers {
                two: 1.2,
                three: 1.5,
                four_or_more: 2.0,
            },
        },
    }
}

fn rule(cards: &[CardValue], points: u32) -> CombinationRule {
    CombinationRule {
        cards: cards.to_vec(),
        points,
    }
}

fn combinations() -> BTreeMap<u8, CombinationRule> {
    BTreeMap::from([
        (1, rule(&[Ace, Two, Three, Four], 10)),
        (2, rule(&[Three, Four, Five, Six], 15)),
        (3, rule(&[Five, Six, Seven, Eight], 20)),
        (4, rule(&[Seven, Eight, Nine, Ten], 25)),
        (5, rule(&[Nine, Ten, Jack, Queen], 30)),
        (6, rule(&[Jack, Queen, King, Ace], 40)),
    ])
}

fn level(
    id: u32,
    name: &str,
    lore: &str,
    points: u32,
    turns: u32,
    silver: (u32, u32),
) -> Level {
    Level {
        id,
        name: name.to_string(),
        lore: lore.to_string(),
        goal: Goal { points, turns },
        rewards: Rewards {
            silver_min: silver.0,
            silver_max: silver.1,
            special: None,
        },
    }
}

fn levels() -> Vec<Level> {
    let mut levels = vec![
        level(
            1,
            "The Salt Road",
            "Caravans cross the flats at dusk. A gambler offers you a seat by the fire.",
            100,
            5,
            (50, 75),
        ),
        level(
            2,
            "Harbor of Lanterns",
            "Dockhands bet their wages on the dice while the tide comes in.",
            150,
            5,
            (75, 100),
        ),
        level(
            3,
            "The Copper Market",
            "Merchants trade favors for luck. Every stall hides a game.",
            200,
            6,
            (100, 150),
        ),
        level(
            4,
            "Whispering Fens",
            "Marsh lights drift over the water. The fen witches play for secrets.",
            260,
            6,
            (125, 175),
        ),
        level(
            5,
            "Ashen Pass",
            "Mountain wardens guard the pass and only let winners through.",
            330,
            7,
            (150, 225),
        ),
        level(
            6,
            "The Glass Monastery",
            "Silent monks keep score on panes of glass that never crack.",
            400,
            7,
            (200, 275),
        ),
        level(
            7,
            "Sunken Library",
            "Drowned scholars wager pages of forgotten books.",
            480,
            7,
            (250, 350),
        ),
        level(
            8,
            "Court of Ravens",
            "The raven lords deal from a deck of black feathers.",
            560,
            8,
            (300, 425),
        ),
        level(
            9,
            "The Ember Gate",
            "Beyond the gate lies the throne. Its keeper has never lost.",
            650,
            8,
            (400, 550),
        ),
        level(
            10,
            "Throne of Nanti",
            "The first ruler of Nanti waits with the oldest dice in the land.",
            750,
            8,
            (500, 800),
        ),
    ];
    if let Some(last) = levels.last_mut() {
        last.rewards.special = Some("Crown of Nanti".to_string());
    }
    levels
}
