//! HD token balance scanner
//!
//! Manages one hierarchical-deterministic wallet tree derived from a single
//! seed phrase, persists the list of derived addresses, and scans an ERC-20
//! token balance for each of them across a pool of RPC endpoints.
//!
//! # Architecture
//!
//! - **Storage**: the `{ "wallets": [...] }` document and seed-derived key material
//! - **Wallet**: address derivation, batched account creation, session manager
//! - **RPC**: endpoint pool with failover cursor, JSON-RPC `balanceOf` client
//! - **Scanner**: sequential per-address retry state machine and scan report
//!
//! # Example
//!
//! ```ignore
//! use hd_token_scan::{ScanConfig, Storage, WalletManager};
//!
//! let config = ScanConfig::from_env();
//! let storage = Storage::new_with_path(config.state_file.clone());
//! let (mut manager, _info) = WalletManager::import(config, storage, phrase)?;
//!
//! manager.mass_add(5)?;
//! let report = manager.scan().await?;
//! println!("{}", report);
//! ```

pub mod config;
pub mod error;
pub mod rpc;
pub mod scanner;
pub mod storage;
pub mod wallet;

pub use config::ScanConfig;
pub use error::{RpcError, StorageError, WalletError};
pub use rpc::{BalanceSource, EndpointPool, JsonRpcClient};
pub use scanner::{
    BalanceScanner, Delay, FoundBalance, ScanOutcome, ScanReport, ScanResult, ScanSettings,
    TokenAmount, TokioDelay,
};
pub use storage::{KeyManager, RootKey, StateStore, Storage, WalletState};
pub use wallet::{AddressManager, MassAddOutcome, WalletManager};

pub use primitive_types::U256;

// Common result type
pub type Result<T> = std::result::Result<T, WalletError>;
