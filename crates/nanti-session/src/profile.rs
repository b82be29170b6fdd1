//! The persisted player profile.

use std::collections::BTreeSet;

use nanti_mechanics::Inventory;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::store::{KeyValueStore, PROFILE_KEY, load_json, save_json};

/// Everything that survives between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Connected wallet id, if any.
    pub wallet: Option<String>,
    /// Spendable silver.
    pub silver: u32,
    /// Ids of levels won at least once.
    pub completed_levels: BTreeSet<u32>,
    /// Owned items and the active selection.
    pub inventory: Inventory,
    /// Special rewards that were minted successfully.
    #[serde(default)]
    pub minted: Vec<String>,
    /// A special reward whose mint failed and can be retried.
    #[serde(default)]
    pub pending_mint: Option<String>,
}

impl Profile {
    /// A fresh profile with the starter inventory.
    pub fn new(name: impl Into<String>, silver: u32) -> Self {
        Self {
            name: name.into(),
            wallet: None,
            silver,
            completed_levels: BTreeSet::new(),
            inventory: Inventory::starter(),
            minted: Vec::new(),
            pending_mint: None,
        }
    }

    /// Load the stored profile, or start a new one.
    pub fn load_or_new(
        store: &dyn KeyValueStore,
        name: &str,
        silver: u32,
    ) -> SessionResult<Self> {
        Ok(load_json(store, PROFILE_KEY)?.unwrap_or_else(|| Self::new(name, silver)))
    }

    /// Write the profile as one JSON blob.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> SessionResult<()> {
        save_json(store, PROFILE_KEY, self)
    }

    /// Level 1 is always open; level N opens once N-1 is completed.
    pub fn is_level_unlocked(&self, level_id: u32) -> bool {
        level_id == 1 || (level_id > 1 && self.completed_levels.contains(&(level_id - 1)))
    }

    /// Mark a level as completed. Returns whether it was new.
    pub fn complete_level(&mut self, level_id: u32) -> bool {
        self.completed_levels.insert(level_id)
    }

    /// Add silver.
    pub fn earn(&mut self, silver: u32) {
        self.silver = self.silver.saturating_add(silver);
    }

    /// Deduct `price`, or fail without touching the wallet.
    pub fn spend(&mut self, price: u32) -> SessionResult<()> {
        if price > self.silver {
            return Err(SessionError::NotEnoughSilver {
                price,
                available: self.silver,
            });
        }
        self.silver -= price;
        Ok(())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Wanderer", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_level_open_at_start() {
        let p = Profile::default();
        assert!(p.is_level_unlocked(1));
        assert!(!p.is_level_unlocked(2));
        assert!(!p.is_level_unlocked(0));
    }

    #[test]
    fn completing_unlocks_next() {
        let mut p = Profile::default();
        assert!(p.complete_level(1));
        assert!(!p.complete_level(1));
        assert!(p.is_level_unlocked(2));
        assert!(!p.is_level_unlocked(3));
    }

    #[test]
    fn spend_checks_balance() {
        let mut p = Profile::new("Ada", 100);
        assert!(matches!(
            p.spend(150),
            Err(SessionError::NotEnoughSilver {
                price: 150,
                available: 100
            })
        ));
        assert_eq!(p.silver, 100);
        p.spend(60).unwrap();
        assert_eq!(p.silver, 40);
        p.earn(10);
        assert_eq!(p.silver, 50);
    }

    #[test]
    fn load_or_new_round_trip() {
        let mut store = crate::store::MemoryStore::new();
        let fresh = Profile::load_or_new(&store, "Ada", 25).unwrap();
        assert_eq!(fresh.name, "Ada");
        assert_eq!(fresh.silver, 25);

        let mut p = fresh.clone();
        p.complete_level(1);
        p.save(&mut store).unwrap();
        let back = Profile::load_or_new(&store, "Other", 0).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn older_profiles_load_without_minted() {
        let mut value = serde_json::to_value(Profile::default()).unwrap();
        let fields = value.as_object_mut().unwrap();
        fields.remove("minted");
        fields.remove("pending_mint");
        let p: Profile = serde_json::from_value(value).unwrap();
        assert!(p.minted.is_empty());
        assert!(p.pending_mint.is_none());
    }
}
