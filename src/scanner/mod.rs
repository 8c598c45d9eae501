//! Balance scan engine
//!
//! - `engine.rs` - Per-address retry state machine and the sequential scan loop
//! - `delay.rs` - Backoff / rate-limit waiting
//! - `report.rs` - Scan results and the per-run report

mod delay;
mod engine;
mod report;

pub use delay::{Delay, TokioDelay};
pub use engine::{BalanceScanner, ScanSettings};
pub use report::{FoundBalance, ScanOutcome, ScanReport, ScanResult, TokenAmount};
