//! Data models for wallet storage

use serde::{Deserialize, Serialize};

/// Ordered list of derived addresses
///
/// `wallets[i]` is always the address derived at child index `i`. The list
/// only grows at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub wallets: Vec<String>,
}

impl WalletState {
    /// Append an address at the next index and return that index
    pub fn append(&mut self, address: String) -> u32 {
        let index = self.wallets.len() as u32;
        self.wallets.push(address);
        index
    }

    /// Child index the next appended address must be derived at
    pub fn next_index(&self) -> u32 {
        self.wallets.len() as u32
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// `(index, address)` pairs in derivation order
    pub fn iter_indexed(&self) -> impl Iterator<Item = (u32, &str)> {
        self.wallets
            .iter()
            .enumerate()
            .map(|(i, addr)| (i as u32, addr.as_str()))
    }
}
