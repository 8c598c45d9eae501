use std::time::Duration;

use primitive_types::U256;

use super::delay::Delay;
use super::report::{ScanOutcome, ScanReport, ScanResult, TokenAmount};
use crate::config::{ScanConfig, MAX_QUERY_ATTEMPTS};
use crate::error::RpcError;
use crate::rpc::{BalanceSource, EndpointPool};
use crate::storage::WalletState;

/// Retry and pacing parameters of a scan run
#[derive(Debug, Clone, Copy)]
pub struct ScanSettings {
    pub max_attempts: u32,
    pub retry_backoff: Duration,
    pub address_delay: Duration,
    pub token_decimals: u8,
}

impl ScanSettings {
    /// Attempt count kept within `1..=MAX_QUERY_ATTEMPTS`
    fn bounded(self) -> Self {
        Self {
            max_attempts: self.max_attempts.clamp(1, MAX_QUERY_ATTEMPTS),
            ..self
        }
    }
}

impl From<&ScanConfig> for ScanSettings {
    fn from(config: &ScanConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            retry_backoff: config.retry_backoff,
            address_delay: config.address_delay,
            token_decimals: config.token_decimals,
        }
        .bounded()
    }
}

/// Per-address query state
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryState {
    Pending,
    Querying { attempt: u32 },
    TransientFailure { attempt: u32 },
    Success { attempt: u32, raw: U256 },
    ExhaustedFailure { attempts: u32, last_error: RpcError },
}

/// Sequential balance scanner over the wallet index
///
/// Addresses are visited strictly in index order, one query in flight at a
/// time. The endpoint pool is borrowed mutably for the whole run and its
/// cursor is never reset between addresses.
pub struct BalanceScanner<B, D> {
    source: B,
    delay: D,
    settings: ScanSettings,
}

impl<B: BalanceSource, D: Delay> BalanceScanner<B, D> {
    pub fn new(source: B, delay: D, settings: ScanSettings) -> Self {
        Self {
            source,
            delay,
            settings: settings.bounded(),
        }
    }

    /// Scan every address in `state` once, front to back
    pub async fn scan(&self, state: &WalletState, pool: &mut EndpointPool) -> ScanReport {
        log::info!(
            "🔍 Scanning {} account(s) across {} endpoint(s)",
            state.len(),
            pool.len()
        );

        let mut report = ScanReport::default();
        for (index, address) in state.iter_indexed() {
            let result = self.scan_address(pool, index, address).await;

            match &result.outcome {
                ScanOutcome::Success(amount) if !amount.is_zero() => {
                    log::info!("✅ Account {} -> {} = {}", index + 1, address, amount);
                }
                ScanOutcome::Success(_) => {
                    log::debug!("Account {} -> {} has no balance", index + 1, address);
                }
                ScanOutcome::Failed { last_error } => {
                    log::warn!(
                        "⚠️  Account {} -> failed after {} attempt(s): {}",
                        index + 1,
                        result.attempts,
                        last_error
                    );
                }
            }
            report.push(result);

            self.delay.wait(self.settings.address_delay).await;
        }

        if !report.any_found() {
            log::info!("❌ No account holds a balance");
        }
        report
    }

    /// Drive one address from `Pending` to a terminal state
    pub async fn scan_address(
        &self,
        pool: &mut EndpointPool,
        index: u32,
        address: &str,
    ) -> ScanResult {
        let mut state = QueryState::Pending;
        loop {
            state = match state {
                QueryState::Pending => QueryState::Querying { attempt: 1 },

                QueryState::Querying { attempt } => {
                    let endpoint = pool.current_endpoint();
                    log::debug!(
                        "Querying account {} (attempt {}/{}) via {}",
                        index + 1,
                        attempt,
                        self.settings.max_attempts,
                        endpoint
                    );

                    let result = self.source.balance_of(endpoint, address).await;
                    match result {
                        Ok(raw) => QueryState::Success { attempt, raw },
                        Err(e) => {
                            log::warn!(
                                "Attempt {} for account {} via {} failed: {}",
                                attempt,
                                index + 1,
                                endpoint,
                                e
                            );
                            pool.rotate();
                            if attempt >= self.settings.max_attempts {
                                QueryState::ExhaustedFailure {
                                    attempts: attempt,
                                    last_error: e,
                                }
                            } else {
                                QueryState::TransientFailure { attempt }
                            }
                        }
                    }
                }

                QueryState::TransientFailure { attempt } => {
                    self.delay.wait(self.settings.retry_backoff).await;
                    QueryState::Querying {
                        attempt: attempt + 1,
                    }
                }

                QueryState::Success { attempt, raw } => {
                    return ScanResult {
                        index,
                        address: address.to_string(),
                        outcome: ScanOutcome::Success(TokenAmount::new(
                            raw,
                            self.settings.token_decimals,
                        )),
                        attempts: attempt,
                    };
                }

                QueryState::ExhaustedFailure {
                    attempts,
                    last_error,
                } => {
                    return ScanResult {
                        index,
                        address: address.to_string(),
                        outcome: ScanOutcome::Failed { last_error },
                        attempts,
                    };
                }
            };
        }
    }
}
