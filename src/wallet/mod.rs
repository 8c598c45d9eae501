/// Wallet Core Module
///
/// - `address_manager.rs` - Seed-derived address derivation
/// - `mass_add.rs` - Batched address creation
/// - `manager.rs` - Session orchestrator (generate, import, mass add, scan)

pub mod address_manager;
pub mod mass_add;
pub mod manager;

pub use address_manager::AddressManager;
pub use mass_add::{add_wallets, parse_count, MassAddOutcome};
pub use manager::{ImportInfo, WalletInfo, WalletManager};
