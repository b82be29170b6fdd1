//! The collaborator that mints the final level's special reward.

use crate::error::{SessionError, SessionResult};

/// Mints a special reward for a wallet.
pub trait RewardMinter {
    /// Mint `item` for `wallet`.
    fn mint_special_reward(&mut self, wallet: Option<&str>, item: &str) -> SessionResult<()>;
}

/// A local stand-in that records what it minted.
///
/// With `fail_first` set it rejects that many attempts before succeeding,
/// which lets the retry path be exercised without a real backend.
#[derive(Debug, Clone, Default)]
pub struct StubMinter {
    minted: Vec<String>,
    fail_first: u32,
}

impl StubMinter {
    /// A minter that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A minter that fails the first `attempts` calls.
    pub fn failing(attempts: u32) -> Self {
        Self {
            minted: Vec::new(),
            fail_first: attempts,
        }
    }

    /// Items minted so far.
    pub fn minted(&self) -> &[String] {
        &self.minted
    }
}

impl RewardMinter for StubMinter {
    fn mint_special_reward(&mut self, wallet: Option<&str>, item: &str) -> SessionResult<()> {
        if self.fail_first > 0 {
            self.fail_first -= 1;
            return Err(SessionError::Mint("minting service unavailable".to_string()));
        }
        tracing::info!(wallet = wallet.unwrap_or("<none>"), item, "minted special reward");
        self.minted.push(item.to_string());
        Ok(())
    }
}
