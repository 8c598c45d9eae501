#![allow(dead_code)]

/// Common test utilities
///
/// - Fixed seed phrase with known derived addresses
/// - Scripted balance source that records every query
/// - Delay that records waits instead of sleeping
/// - In-memory state store that counts saves

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hd_token_scan::{
    BalanceSource, Delay, KeyManager, RootKey, RpcError, ScanConfig, StateStore, StorageError,
    WalletState, U256,
};

/// Standard development mnemonic
pub const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

pub const ACCOUNT_0: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const ACCOUNT_1: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

pub fn test_root() -> RootKey {
    KeyManager::from_mnemonic(TEST_MNEMONIC, "m/44'/60'/0'/0")
        .expect("test mnemonic derives")
        .root
}

pub fn test_config(endpoints: &[&str]) -> ScanConfig {
    ScanConfig {
        rpc_urls: endpoints.iter().map(|s| s.to_string()).collect(),
        ..ScanConfig::default()
    }
}

pub fn state_of(addresses: &[&str]) -> WalletState {
    WalletState {
        wallets: addresses.iter().map(|s| s.to_string()).collect(),
    }
}

/// Balance source driven by a script instead of the network
///
/// Queries fail when the endpoint is marked down or while `fail_next` is
/// positive; otherwise the address's configured balance (default 0) is
/// returned.
#[derive(Default)]
pub struct ScriptedSource {
    down: HashSet<String>,
    balances: HashMap<String, U256>,
    fail_next: Mutex<u32>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_down_endpoint(mut self, endpoint: &str) -> Self {
        self.down.insert(endpoint.to_string());
        self
    }

    pub fn with_balance(mut self, address: &str, raw: u64) -> Self {
        self.balances.insert(address.to_string(), U256::from(raw));
        self
    }

    pub fn failing_next(self, count: u32) -> Self {
        *self.fail_next.lock().unwrap() = count;
        self
    }

    /// Every (endpoint, address) query issued so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn endpoints_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(e, _)| e).collect()
    }

    pub fn calls_for(&self, address: &str) -> usize {
        self.calls().iter().filter(|(_, a)| a == address).count()
    }
}

#[async_trait]
impl BalanceSource for ScriptedSource {
    async fn balance_of(&self, endpoint: &str, address: &str) -> Result<U256, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), address.to_string()));

        if self.down.contains(endpoint) {
            return Err(RpcError::Transport(format!("{} unreachable", endpoint)));
        }

        let mut fail_next = self.fail_next.lock().unwrap();
        if *fail_next > 0 {
            *fail_next -= 1;
            return Err(RpcError::Rpc {
                code: -32005,
                message: "rate limited".into(),
            });
        }

        Ok(self.balances.get(address).copied().unwrap_or_default())
    }
}

/// Records requested waits; returns immediately
#[derive(Default)]
pub struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }

    pub fn count(&self, duration: Duration) -> usize {
        self.waits().iter().filter(|d| **d == duration).count()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// In-memory state store counting `save_state` calls
#[derive(Default)]
pub struct CountingStore {
    state: Mutex<Option<WalletState>>,
    saves: AtomicUsize,
    fail_saves: bool,
}

impl CountingStore {
    pub fn with_state(state: WalletState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    /// Store whose writes always fail
    pub fn failing(state: Option<WalletState>) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
            fail_saves: true,
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn persisted(&self) -> Option<WalletState> {
        self.state.lock().unwrap().clone()
    }
}

impl StateStore for CountingStore {
    fn load_state(&self) -> Result<WalletState, StorageError> {
        Ok(self.persisted().unwrap_or_default())
    }

    fn save_state(&self, state: &WalletState) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only state file",
            )));
        }
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}
