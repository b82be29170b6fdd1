//! Session journal: a timestamped record of what happened in play.

pub mod entry;
pub mod log;

pub use entry::JournalEntry;
pub use log::Journal;
