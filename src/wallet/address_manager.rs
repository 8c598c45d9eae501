use sha3::{Digest, Keccak256};

use crate::error::WalletError;
use crate::storage::RootKey;

pub struct AddressManager;

impl AddressManager {
    /// Derive the EIP-55 checksummed address of the child at `index`
    pub fn derive_address(root: &RootKey, index: u32) -> Result<String, WalletError> {
        let public_key = root.child_public_key(index)?;

        // Uncompressed SEC1 encoding minus the 0x04 prefix
        let uncompressed = public_key.serialize_uncompressed();
        let hash = Keccak256::digest(&uncompressed[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);

        Ok(Self::to_checksum_address(&address))
    }

    /// Derive multiple addresses, returning (index, address) pairs
    pub fn derive_addresses(
        root: &RootKey,
        start: u32,
        count: u32,
    ) -> Result<Vec<(u32, String)>, WalletError> {
        let mut addresses = Vec::with_capacity(count as usize);

        for i in 0..count {
            let index = start
                .checked_add(i)
                .ok_or_else(|| WalletError::Derivation("child index overflow".into()))?;
            let address = Self::derive_address(root, index)?;
            addresses.push((index, address));
        }

        Ok(addresses)
    }

    /// EIP-55 mixed-case encoding of a 20-byte address
    pub fn to_checksum_address(address: &[u8; 20]) -> String {
        let lower = hex::encode(address);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Parse a `0x`-prefixed hex address into its 20 raw bytes
    ///
    /// Checksum casing is not verified.
    pub fn parse_address(address: &str) -> Result<[u8; 20], WalletError> {
        let stripped = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);

        let bytes = hex::decode(stripped)
            .map_err(|e| WalletError::Derivation(format!("invalid address {}: {}", address, e)))?;

        bytes.try_into().map_err(|b: Vec<u8>| {
            WalletError::Derivation(format!(
                "invalid address {}: expected 20 bytes, got {}",
                address,
                b.len()
            ))
        })
    }
}
