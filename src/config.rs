/// Scanner configuration from environment variables
///
/// Every value has a default matching the Base mainnet USDC deployment,
/// so running without any environment set up is the normal case.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_RPC_URLS: [&str; 3] = [
    "https://mainnet.base.org",
    "https://base.publicnode.com",
    "https://base.blockpi.network/v1/rpc/public",
];

/// USDC on Base
pub const DEFAULT_TOKEN_CONTRACT: &str = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913";
pub const DEFAULT_TOKEN_SYMBOL: &str = "USDC";
pub const DEFAULT_TOKEN_DECIMALS: u8 = 6;
pub const DEFAULT_STATE_FILE: &str = "./wallet_state.json";

/// MetaMask-compatible account root; child `i` is appended to it
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Upper bound on query attempts per address; larger settings are clamped
pub const MAX_QUERY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 900;
pub const DEFAULT_ADDRESS_DELAY_MS: u64 = 700;
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Ordered RPC endpoint pool, tried round-robin on failure
    pub rpc_urls: Vec<String>,
    /// ERC-20 contract queried with `balanceOf`
    pub token_contract: String,
    pub token_symbol: String,
    pub token_decimals: u8,
    /// Location of the persisted `{ "wallets": [...] }` document
    pub state_file: PathBuf,
    pub derivation_path: String,
    /// Query attempts per address before giving up on it, `1..=MAX_QUERY_ATTEMPTS`
    pub max_attempts: u32,
    /// Wait between a failed attempt and the next one
    pub retry_backoff: Duration,
    /// Wait after each address, success or not
    pub address_delay: Duration,
    /// Per-request timeout enforced by the HTTP client
    pub rpc_timeout: Duration,
}

impl ScanConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `RPC_URLS`: comma-separated endpoint list
    /// - `TOKEN_CONTRACT`, `TOKEN_SYMBOL`, `TOKEN_DECIMALS`
    /// - `STATE_FILE`: path of the wallet state document
    /// - `DERIVATION_PATH`: BIP32 path of the account root
    /// - `MAX_ATTEMPTS` (at most 3), `RETRY_BACKOFF_MS`, `ADDRESS_DELAY_MS`, `RPC_TIMEOUT_SECS`
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let rpc_urls = match env::var("RPC_URLS") {
            Ok(raw) => {
                let urls: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect();
                if urls.is_empty() {
                    log::warn!("⚠️  RPC_URLS is empty, using default endpoints");
                    defaults.rpc_urls
                } else {
                    urls
                }
            }
            Err(_) => defaults.rpc_urls,
        };
        log::info!("📡 RPC endpoints: {}", rpc_urls.join(", "));

        let token_contract = env::var("TOKEN_CONTRACT").unwrap_or(defaults.token_contract);
        let token_symbol = env::var("TOKEN_SYMBOL").unwrap_or(defaults.token_symbol);
        let token_decimals = parse_var("TOKEN_DECIMALS", defaults.token_decimals);
        log::info!(
            "🪙 Token: {} at {} ({} decimals)",
            token_symbol,
            token_contract,
            token_decimals
        );

        let state_file = env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file);
        let derivation_path = env::var("DERIVATION_PATH").unwrap_or(defaults.derivation_path);

        let max_attempts = match parse_var("MAX_ATTEMPTS", defaults.max_attempts) {
            0 => {
                log::warn!(
                    "⚠️  MAX_ATTEMPTS must be at least 1, using {}",
                    DEFAULT_MAX_ATTEMPTS
                );
                DEFAULT_MAX_ATTEMPTS
            }
            n if n > MAX_QUERY_ATTEMPTS => {
                log::warn!(
                    "⚠️  MAX_ATTEMPTS={} exceeds the limit, using {}",
                    n,
                    MAX_QUERY_ATTEMPTS
                );
                MAX_QUERY_ATTEMPTS
            }
            n => n,
        };

        Self {
            rpc_urls,
            token_contract,
            token_symbol,
            token_decimals,
            state_file,
            derivation_path,
            max_attempts,
            retry_backoff: Duration::from_millis(parse_var(
                "RETRY_BACKOFF_MS",
                DEFAULT_RETRY_BACKOFF_MS,
            )),
            address_delay: Duration::from_millis(parse_var(
                "ADDRESS_DELAY_MS",
                DEFAULT_ADDRESS_DELAY_MS,
            )),
            rpc_timeout: Duration::from_secs(parse_var(
                "RPC_TIMEOUT_SECS",
                DEFAULT_RPC_TIMEOUT_SECS,
            )),
        }
    }
}

fn parse_var<T: FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("⚠️  Invalid {}='{}', using default {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for ScanConfig {
    /// Base mainnet USDC deployment
    fn default() -> Self {
        Self {
            rpc_urls: DEFAULT_RPC_URLS.iter().map(|s| s.to_string()).collect(),
            token_contract: DEFAULT_TOKEN_CONTRACT.to_string(),
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            derivation_path: DEFAULT_DERIVATION_PATH.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            address_delay: Duration::from_millis(DEFAULT_ADDRESS_DELAY_MS),
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
        }
    }
}
