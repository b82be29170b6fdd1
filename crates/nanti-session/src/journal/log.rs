//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Lands of Nanti Journal\n======================\n\n");
        for entry in &self.entries {
            let line = match entry {
                JournalEntry::LevelStarted {
                    level_id,
                    name,
                    goal_points,
                    goal_turns,
                    timestamp,
                } => format!(
                    "[{}] --- Level {level_id}: {name} --- goal {goal_points} points in {goal_turns} turns\n",
                    timestamp.format("%H:%M:%S")
                ),
                JournalEntry::TurnScored {
                    turn,
                    face,
                    cards,
                    score,
                    total,
                    extra_turn,
                    ..
                } => {
                    let extra = if *extra_turn { " (extra turn)" } else { "" };
                    format!(
                        "Turn {turn}: die {face}, [{}] = {score} (total {total}){extra}\n",
                        cards.join(", ")
                    )
                }
                JournalEntry::Bust { turn, reason, .. } => {
                    format!("Turn {turn}: bust, {reason}\n")
                }
                JournalEntry::LevelEnded {
                    level_id,
                    victory,
                    score,
                    ..
                } => {
                    let result = if *victory { "Victory" } else { "Defeat" };
                    format!("{result} on level {level_id} with {score} points\n\n")
                }
                JournalEntry::LevelLeft {
                    level_id, turn, ..
                } => format!("Left level {level_id} on turn {turn}\n\n"),
                JournalEntry::RewardClaimed {
                    level_id,
                    silver,
                    special,
                    ..
                } => match special {
                    Some(item) => {
                        format!("Claimed {silver} silver and {item} for level {level_id}\n")
                    }
                    None => format!("Claimed {silver} silver for level {level_id}\n"),
                },
                JournalEntry::Purchase { name, price, .. } => {
                    format!("Bought {name} for {price} silver\n")
                }
                JournalEntry::Mint {
                    item,
                    success,
                    detail,
                    ..
                } => {
                    if *success {
                        format!("Minted {item}\n")
                    } else {
                        format!(
                            "Minting {item} failed: {}\n",
                            detail.as_deref().unwrap_or("unknown error")
                        )
                    }
                }
            };
            out.push_str(&line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.len(), 0);
    }

    #[test]
    fn export_text_turns() {
        let mut j = Journal::new();
        j.append(JournalEntry::LevelStarted {
            level_id: 1,
            name: "The Salt Road".to_string(),
            goal_points: 100,
            goal_turns: 5,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::TurnScored {
            turn: 1,
            face: 6,
            cards: vec!["K♥".to_string(), "A♠".to_string()],
            score: 120,
            total: 120,
            extra_turn: false,
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Bust {
            turn: 2,
            reason: "no card matches the die".to_string(),
            timestamp: Utc::now(),
        });
        let txt = j.export_text();
        assert!(txt.contains("Level 1: The Salt Road"));
        assert!(txt.contains("Turn 1: die 6, [K♥, A♠] = 120 (total 120)"));
        assert!(txt.contains("Turn 2: bust, no card matches the die"));
    }

    #[test]
    fn export_text_rewards_and_mint() {
        let mut j = Journal::new();
        j.append(JournalEntry::RewardClaimed {
            level_id: 10,
            silver: 640,
            special: Some("Crown of Nanti".to_string()),
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Mint {
            item: "Crown of Nanti".to_string(),
            success: false,
            detail: Some("offline".to_string()),
            timestamp: Utc::now(),
        });
        let txt = j.export_text();
        assert!(txt.contains("Claimed 640 silver and Crown of Nanti for level 10"));
        assert!(txt.contains("Minting Crown of Nanti failed: offline"));
    }

    #[test]
    fn journal_serde_roundtrip() {
        let mut j = Journal::new();
        j.append(JournalEntry::Purchase {
            item_id: "die-ember".to_string(),
            name: "Ember Die".to_string(),
            price: 120,
            timestamp: Utc::now(),
        });
        let json = serde_json::to_string(&j).unwrap();
        let j2: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(j2.len(), 1);
    }
}
