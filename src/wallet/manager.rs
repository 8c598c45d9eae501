use super::address_manager::AddressManager;
use super::mass_add::{self, MassAddOutcome};
use crate::config::ScanConfig;
use crate::error::WalletError;
use crate::rpc::{BalanceSource, EndpointPool, JsonRpcClient};
use crate::scanner::{BalanceScanner, Delay, ScanReport, ScanSettings, TokioDelay};
use crate::storage::{KeyManager, RootKey, StateStore, Storage, WalletState};

/// One session over a single seed
///
/// Holds the seed-derived root key and the current wallet state explicitly;
/// every operation reads or replaces them through `&self` / `&mut self`.
pub struct WalletManager<S: StateStore = Storage> {
    config: ScanConfig,
    store: S,
    root: RootKey,
    state: WalletState,
}

impl<S: StateStore> WalletManager<S> {
    /// Start a session with a freshly generated seed phrase
    ///
    /// Resets the persisted state to the single account at index 0.
    pub fn generate(config: ScanConfig, store: S) -> Result<(Self, WalletInfo), WalletError> {
        let keys = KeyManager::generate(&config.derivation_path)?;

        let first_address = AddressManager::derive_address(&keys.root, 0)?;
        let mut state = WalletState::default();
        state.append(first_address.clone());
        store.save_state(&state)?;

        log::info!("✅ Generated new seed phrase, account 1: {}", first_address);

        let info = WalletInfo {
            mnemonic: keys.mnemonic.to_string(),
            first_address,
        };
        Ok((
            Self {
                config,
                store,
                root: keys.root,
                state,
            },
            info,
        ))
    }

    /// Start a session from an existing seed phrase, recovering prior state
    ///
    /// If no accounts were persisted yet, account 1 is derived and saved.
    pub fn import(
        config: ScanConfig,
        store: S,
        phrase: &str,
    ) -> Result<(Self, ImportInfo), WalletError> {
        let keys = KeyManager::from_mnemonic(phrase, &config.derivation_path)?;

        let mut state = store.load_state()?;
        let prior_accounts = state.len();
        log::info!("🔍 Detected {} existing account(s)", prior_accounts);

        let created_first = if state.is_empty() {
            let first_address = AddressManager::derive_address(&keys.root, 0)?;
            state.append(first_address.clone());
            store.save_state(&state)?;
            Some(first_address)
        } else {
            let expected = AddressManager::derive_address(&keys.root, 0)?;
            if !state.wallets[0].eq_ignore_ascii_case(&expected) {
                log::warn!(
                    "⚠️  Stored account 1 ({}) does not match this seed ({}); state may belong to another phrase",
                    state.wallets[0],
                    expected
                );
            }
            None
        };

        Ok((
            Self {
                config,
                store,
                root: keys.root,
                state,
            },
            ImportInfo {
                prior_accounts,
                created_first,
            },
        ))
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derive and persist `count` more accounts
    ///
    /// The session state is only replaced after the batch was saved.
    pub fn mass_add(&mut self, count: u32) -> Result<MassAddOutcome, WalletError> {
        let outcome = mass_add::add_wallets(&self.store, &self.root, &self.state, count)?;
        self.state = outcome.state.clone();
        Ok(outcome)
    }

    /// Scan all accounts with a caller-supplied balance source and delay
    pub async fn scan_with<B: BalanceSource, D: Delay>(
        &self,
        source: B,
        delay: D,
    ) -> Result<ScanReport, WalletError> {
        let mut pool = EndpointPool::new(self.config.rpc_urls.clone())?;
        let scanner = BalanceScanner::new(source, delay, ScanSettings::from(&self.config));
        Ok(scanner.scan(&self.state, &mut pool).await)
    }

    /// Scan all accounts over JSON-RPC with wall-clock pacing
    pub async fn scan(&self) -> Result<ScanReport, WalletError> {
        let client = JsonRpcClient::new(&self.config.token_contract, self.config.rpc_timeout)?;
        self.scan_with(client, TokioDelay).await
    }
}

#[derive(Debug, Clone)]
pub struct WalletInfo {
    pub mnemonic: String,
    pub first_address: String,
}

#[derive(Debug, Clone)]
pub struct ImportInfo {
    /// Accounts found in the persisted state before import
    pub prior_accounts: usize,
    /// Account 1, when it had to be created during import
    pub created_first: Option<String>,
}
