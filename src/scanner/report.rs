//! Scan outcomes and the per-run report

use std::fmt;

use primitive_types::U256;

use crate::error::RpcError;

/// Raw token amount with the decimal count needed to display it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    pub raw: U256,
    pub decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: impl Into<U256>, decimals: u8) -> Self {
        Self {
            raw: raw.into(),
            decimals,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

impl fmt::Display for TokenAmount {
    /// Exact decimal rendering without trailing zeros: `2500000` @ 6 is `2.5`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.raw.to_string();
        let decimals = self.decimals as usize;
        if decimals == 0 {
            return f.write_str(&digits);
        }

        let padded = format!("{:0>width$}", digits, width = decimals + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
        let frac = frac_part.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{}", int_part)
        } else {
            write!(f, "{}.{}", int_part, frac)
        }
    }
}

/// Terminal state of one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Success(TokenAmount),
    /// Every attempt failed; `last_error` is the final attempt's error
    Failed { last_error: RpcError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub index: u32,
    pub address: String,
    pub outcome: ScanOutcome,
    /// Query attempts issued for this address
    pub attempts: u32,
}

impl ScanResult {
    pub fn balance(&self) -> Option<TokenAmount> {
        match &self.outcome {
            ScanOutcome::Success(amount) => Some(*amount),
            ScanOutcome::Failed { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.balance().map(|a| !a.is_zero()).unwrap_or(false)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Failed { .. })
    }
}

/// Address holding a nonzero balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundBalance {
    pub index: u32,
    pub address: String,
    pub amount: TokenAmount,
}

/// Everything one scan run produced, in index order
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub results: Vec<ScanResult>,
}

impl ScanReport {
    pub fn push(&mut self, result: ScanResult) {
        self.results.push(result);
    }

    pub fn found(&self) -> Vec<FoundBalance> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                ScanOutcome::Success(amount) if !amount.is_zero() => Some(FoundBalance {
                    index: r.index,
                    address: r.address.clone(),
                    amount: *amount,
                }),
                _ => None,
            })
            .collect()
    }

    pub fn any_found(&self) -> bool {
        self.results.iter().any(ScanResult::is_found)
    }

    pub fn scanned(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> Vec<&ScanResult> {
        self.results.iter().filter(|r| r.is_failed()).collect()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let found = self.found();
        if found.is_empty() {
            writeln!(f, "No balance found")?;
        } else {
            for entry in &found {
                writeln!(
                    f,
                    "Account {} -> {} = {}",
                    entry.index + 1,
                    entry.address,
                    entry.amount
                )?;
            }
        }
        write!(
            f,
            "Scanned {} account(s): {} with balance, {} failed",
            self.scanned(),
            found.len(),
            self.failed().len()
        )
    }
}
