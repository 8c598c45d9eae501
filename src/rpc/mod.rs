//! EVM JSON-RPC access
//!
//! - Endpoint pool with a round-robin failover cursor
//! - `balanceOf` queries over JSON-RPC `eth_call`

mod client;
mod endpoint_pool;
mod types;

pub use client::{decode_uint, encode_balance_of, JsonRpcClient, BALANCE_OF_SELECTOR};
pub use endpoint_pool::EndpointPool;
pub use types::{JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse};

use crate::error::RpcError;
use async_trait::async_trait;
use primitive_types::U256;

/// Source of raw token balances
///
/// One call is one query attempt against one endpoint. Any `Err` counts as a
/// failed attempt; a zero balance is `Ok(U256::zero())`.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance_of(&self, endpoint: &str, address: &str) -> Result<U256, RpcError>;
}

#[async_trait]
impl<T: BalanceSource + ?Sized> BalanceSource for &T {
    async fn balance_of(&self, endpoint: &str, address: &str) -> Result<U256, RpcError> {
        (**self).balance_of(endpoint, address).await
    }
}
