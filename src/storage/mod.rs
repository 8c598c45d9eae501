//! Storage and persistence layer
//!
//! - File system operations
//! - Key management
//! - Data models

mod file_system;
mod keys;
mod models;

pub use file_system::Storage;
pub use keys::{KeyManager, RootKey, WalletKeys};
pub use models::WalletState;

use crate::error::StorageError;

/// Persistence boundary for the wallet index
///
/// `load_state` treats a missing document as an empty state. `save_state`
/// replaces the whole document.
pub trait StateStore {
    fn load_state(&self) -> Result<WalletState, StorageError>;
    fn save_state(&self, state: &WalletState) -> Result<(), StorageError>;
}
