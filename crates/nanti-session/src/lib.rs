//! Game session layer for Lands of Nanti.
//!
//! Wraps the mechanics engine in a command-driven session: the persisted
//! player profile, a key-value store boundary, the shop and its content
//! store, the special-reward mint collaborator, and a session journal.

pub mod config;
pub mod error;
pub mod journal;
pub mod mint;
pub mod profile;
pub mod session;
pub mod shop;
pub mod store;

pub use config::GameConfig;
pub use error::{SessionError, SessionResult};
pub use mint::{RewardMinter, StubMinter};
pub use profile::Profile;
pub use session::{GameSession, Reply};
pub use shop::{ItemDefinition, Shop, ShopItem};
pub use store::{FileStore, KeyValueStore, MemoryStore};
