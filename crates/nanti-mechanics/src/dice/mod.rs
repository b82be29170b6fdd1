//! Six-sided dice, their effects, and rolling.
//!
//! Every die in Nanti has six faces. Special dice carry one effect: a
//! weighting that skews which faces come up, a score multiplier, or an
//! extra turn.

pub mod roll;

pub use roll::{RolledDie, roll_face, roll_pair, sample_weighted, select_active_dice};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Number of faces on every die.
pub const FACES: u8 = 6;

/// A relative weight for each face, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 6]", into = "[f64; 6]")]
pub struct FaceWeights([f64; 6]);

impl FaceWeights {
    /// Favors low faces.
    pub const LOW: Self = Self([30.0, 22.5, 17.5, 15.0, 10.0, 5.0]);
    /// Favors high faces.
    pub const HIGH: Self = Self([5.0, 10.0, 15.0, 17.5, 22.5, 30.0]);
    /// Favors 2, 4 and 6.
    pub const EVEN: Self = Self([8.0, 25.0, 8.0, 25.0, 9.0, 25.0]);
    /// Favors 1, 3 and 5.
    pub const ODD: Self = Self([25.0, 8.0, 25.0, 8.0, 25.0, 9.0]);

    /// Build a weight table. Weights must be non-negative and sum to 100.
    pub fn new(weights: [f64; 6]) -> MechResult<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(MechError::InvalidItem(
                "face weights must be non-negative numbers".to_string(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 100.0).abs() > 1e-6 {
            return Err(MechError::InvalidItem(format!(
                "face weights must sum to 100, got {total}"
            )));
        }
        Ok(Self(weights))
    }

    /// The weight of each face, index 0 being face 1.
    pub fn values(&self) -> &[f64; 6] {
        &self.0
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl TryFrom<[f64; 6]> for FaceWeights {
    type Error = MechError;

    fn try_from(weights: [f64; 6]) -> MechResult<Self> {
        Self::new(weights)
    }
}

impl From<FaceWeights> for [f64; 6] {
    fn from(weights: FaceWeights) -> Self {
        weights.0
    }
}

/// Whether a die is a plain die or a shop special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    /// A plain fair die.
    #[default]
    Standard,
    /// A die bought from the shop.
    Special,
}

/// An effect carried by a special die.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DieEffect {
    /// Rolls skew towards 1.
    WeightedLow,
    /// Rolls skew towards 6.
    WeightedHigh,
    /// Rolls skew towards even faces.
    WeightedEven,
    /// Rolls skew towards odd faces.
    WeightedOdd,
    /// Multiplies the turn score when this die is the selected one.
    PointsMultiplier(f64),
    /// Using this die keeps the turn counter where it is.
    ExtraTurn,
}

impl DieEffect {
    /// Default magnitude of a die points multiplier.
    pub const DEFAULT_POINTS_MULTIPLIER: f64 = 1.5;

    /// The fixed weight table for weighted effects.
    pub fn weights(self) -> Option<FaceWeights> {
        match self {
            Self::WeightedLow => Some(FaceWeights::LOW),
            Self::WeightedHigh => Some(FaceWeights::HIGH),
            Self::WeightedEven => Some(FaceWeights::EVEN),
            Self::WeightedOdd => Some(FaceWeights::ODD),
            Self::PointsMultiplier(_) | Self::ExtraTurn => None,
        }
    }
}

impl std::fmt::Display for DieEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeightedLow => write!(f, "weighted low"),
            Self::WeightedHigh => write!(f, "weighted high"),
            Self::WeightedEven => write!(f, "weighted even"),
            Self::WeightedOdd => write!(f, "weighted odd"),
            Self::PointsMultiplier(m) => write!(f, "points x{m}"),
            Self::ExtraTurn => write!(f, "extra turn"),
        }
    }
}

/// A die owned by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Die {
    /// Unique id of this die.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Standard or special.
    #[serde(default)]
    pub kind: DieKind,
    /// Optional effect.
    #[serde(default)]
    pub effect: Option<DieEffect>,
    /// Custom weights overriding the effect's fixed table.
    #[serde(default)]
    pub weights: Option<FaceWeights>,
    /// Optional image reference per face.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub face_images: Vec<String>,
}

impl Die {
    /// A plain fair die.
    pub fn standard(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Standard Die".to_string(),
            kind: DieKind::Standard,
            effect: None,
            weights: None,
            face_images: Vec::new(),
        }
    }

    /// A special die with an effect.
    pub fn special(id: impl Into<String>, name: impl Into<String>, effect: DieEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: DieKind::Special,
            effect: Some(effect),
            weights: None,
            face_images: Vec::new(),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(effect) = &self.effect {
            write!(f, " ({effect})")?;
        }
        Ok(())
    }
}
