use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use primitive_types::U256;
use serde_json::json;

use super::types::{JsonRpcRequest, JsonRpcResponse};
use super::BalanceSource;
use crate::error::{RpcError, WalletError};
use crate::wallet::AddressManager;

/// `balanceOf(address)` function selector
pub const BALANCE_OF_SELECTOR: &str = "70a08231";

/// ERC-20 `balanceOf` over JSON-RPC `eth_call`
pub struct JsonRpcClient {
    client: reqwest::Client,
    token_contract: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(token_contract: &str, timeout: Duration) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token_contract: token_contract.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);

        let response = self.client.post(endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Transport(format!("HTTP {} from {}", status, endpoint)));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| RpcError::InvalidResponse("missing result".into()))
    }
}

#[async_trait]
impl BalanceSource for JsonRpcClient {
    async fn balance_of(&self, endpoint: &str, address: &str) -> Result<U256, RpcError> {
        let data = encode_balance_of(address)?;
        let params = json!([
            { "to": self.token_contract, "data": data },
            "latest"
        ]);

        let result = self.call(endpoint, "eth_call", params).await?;
        let raw = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse(format!("non-string result: {}", result)))?;

        decode_uint(raw)
    }
}

/// ABI-encode `balanceOf(address)` call data
pub fn encode_balance_of(address: &str) -> Result<String, RpcError> {
    let bytes = AddressManager::parse_address(address)
        .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;

    Ok(format!(
        "0x{}{}{}",
        BALANCE_OF_SELECTOR,
        "0".repeat(24),
        hex::encode(bytes)
    ))
}

/// Decode a hex-encoded `uint256` return value
///
/// Empty return data (`0x`, as returned when no contract is deployed at the
/// target) and anything wider than one 32-byte word are errors.
pub fn decode_uint(raw: &str) -> Result<U256, RpcError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("not hex: {}", raw)))?;

    if digits.is_empty() {
        return Err(RpcError::InvalidResponse("empty return data".into()));
    }
    if digits.len() > 64 {
        return Err(RpcError::InvalidResponse(format!(
            "return data longer than one word: {} hex digits",
            digits.len()
        )));
    }

    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(padded).map_err(|e| RpcError::InvalidResponse(e.to_string()))?;

    Ok(U256::from_big_endian(&bytes))
}
