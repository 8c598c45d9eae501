//! Mass address creation
//!
//! Derives a batch of sequential addresses onto a working copy of the state
//! and persists the batch with a single write.

use super::address_manager::AddressManager;
use crate::error::WalletError;
use crate::storage::{RootKey, StateStore, WalletState};

#[derive(Debug, Clone)]
pub struct MassAddOutcome {
    /// State after the batch, already persisted
    pub state: WalletState,
    /// Newly derived (index, address) pairs
    pub added: Vec<(u32, String)>,
}

impl MassAddOutcome {
    pub fn total(&self) -> usize {
        self.state.len()
    }
}

/// Parse a user-supplied account count; only positive integers are accepted
pub fn parse_count(input: &str) -> Result<u32, WalletError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(WalletError::InvalidCount(trimmed.to_string())),
        Ok(count) => Ok(count),
    }
}

/// Derive `count` addresses at indices `state.len()..state.len() + count`
///
/// The caller's `state` is never modified; on success the returned outcome
/// holds the new state, which has been saved exactly once.
pub fn add_wallets<S: StateStore + ?Sized>(
    store: &S,
    root: &RootKey,
    state: &WalletState,
    count: u32,
) -> Result<MassAddOutcome, WalletError> {
    if count == 0 {
        return Err(WalletError::InvalidCount(count.to_string()));
    }

    let start = state.next_index();
    let added = AddressManager::derive_addresses(root, start, count)?;

    let mut working = state.clone();
    for (index, address) in &added {
        let appended_at = working.append(address.clone());
        debug_assert_eq!(appended_at, *index);
        log::debug!("Derived account {} at index {}: {}", index + 1, index, address);
    }

    store.save_state(&working)?;
    log::info!(
        "✅ Added {} account(s), total now {}",
        added.len(),
        working.len()
    );

    Ok(MassAddOutcome {
        state: working,
        added,
    })
}
