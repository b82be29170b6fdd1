//! Choosing the turn's dice and rolling faces.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Die, FACES, FaceWeights};
use crate::effect;

/// A die together with the face it landed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledDie {
    /// The die that was rolled.
    pub die: Die,
    /// The face shown, 1 to 6.
    pub face: u8,
}

impl std::fmt::Display for RolledDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.face, self.die)
    }
}

/// Pick the two dice used this turn from the player's active selection.
///
/// Fewer than two selected dice fall back to a pair of standard dice; more
/// than two are sampled without replacement.
pub fn select_active_dice(selected: &[Die], rng: &mut StdRng) -> [Die; 2] {
    match selected {
        [] | [_] => [Die::standard("standard-1"), Die::standard("standard-2")],
        [a, b] => [a.clone(), b.clone()],
        _ => {
            let picked = rand::seq::index::sample(rng, selected.len(), 2);
            [
                selected[picked.index(0)].clone(),
                selected[picked.index(1)].clone(),
            ]
        }
    }
}

/// Roll a single die, honoring its weighting if it has one.
pub fn roll_face(die: &Die, rng: &mut StdRng) -> u8 {
    match effect::face_weights(die) {
        Some(weights) => sample_weighted(&weights, rng),
        None => rng.random_range(1..=FACES),
    }
}

/// Draw a face from a weight table by walking cumulative sums.
pub fn sample_weighted(weights: &FaceWeights, rng: &mut StdRng) -> u8 {
    let total = weights.total();
    let draw = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, w) in weights.values().iter().enumerate() {
        cumulative += w;
        if cumulative > draw {
            return i as u8 + 1;
        }
    }
    FACES
}

/// Select and roll the turn's two dice.
pub fn roll_pair(selected: &[Die], rng: &mut StdRng) -> [RolledDie; 2] {
    let [a, b] = select_active_dice(selected, rng);
    let face_a = roll_face(&a, rng);
    let face_b = roll_face(&b, rng);
    tracing::debug!(first = face_a, second = face_b, "rolled dice");
    [
        RolledDie { die: a, face: face_a },
        RolledDie { die: b, face: face_b },
    ]
}
