use bip39::Mnemonic;
use bitcoin::bip32::{ChildNumber, DerivationPath, Xpriv};
use bitcoin::key::rand;
use bitcoin::secp256k1::{All, PublicKey, Secp256k1};
use bitcoin::Network;
use std::str::FromStr;

use crate::error::WalletError;

pub struct KeyManager;

impl KeyManager {
    /// Generate a new random 12-word mnemonic and derive its account root
    pub fn generate(derivation_path: &str) -> Result<WalletKeys, WalletError> {
        let entropy = rand::random::<[u8; 16]>();

        let mnemonic = Mnemonic::from_entropy(&entropy)
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Self::derive_keys(mnemonic, derivation_path)
    }

    /// Import a wallet from an existing mnemonic phrase (12 or 24 words)
    pub fn from_mnemonic(words: &str, derivation_path: &str) -> Result<WalletKeys, WalletError> {
        let normalized = words.split_whitespace().collect::<Vec<_>>().join(" ");
        let mnemonic = Mnemonic::parse(&normalized)
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

        Self::derive_keys(mnemonic, derivation_path)
    }

    /// Derive the account-level extended key the address children hang off
    fn derive_keys(mnemonic: Mnemonic, derivation_path: &str) -> Result<WalletKeys, WalletError> {
        let secp = Secp256k1::new();
        let seed = mnemonic.to_seed("");

        let master_key = Xpriv::new_master(Network::Bitcoin, &seed)
            .map_err(|e| WalletError::Derivation(e.to_string()))?;

        let path = DerivationPath::from_str(derivation_path)
            .map_err(|e| WalletError::Derivation(e.to_string()))?;

        let account_key = master_key
            .derive_priv(&secp, &path)
            .map_err(|e| WalletError::Derivation(e.to_string()))?;

        log::debug!("Derived account root at {}", derivation_path);

        Ok(WalletKeys {
            mnemonic,
            root: RootKey {
                xprv: account_key,
                secp,
            },
        })
    }
}

pub struct WalletKeys {
    pub mnemonic: Mnemonic,
    pub root: RootKey,
}

/// Account-level key material, held in memory for one session only
#[derive(Clone)]
pub struct RootKey {
    xprv: Xpriv,
    secp: Secp256k1<All>,
}

impl RootKey {
    /// Public key of the non-hardened child at `index`
    pub fn child_public_key(&self, index: u32) -> Result<PublicKey, WalletError> {
        let child = ChildNumber::from_normal_idx(index)
            .map_err(|e| WalletError::Derivation(e.to_string()))?;

        let child_key = self
            .xprv
            .derive_priv(&self.secp, &[child])
            .map_err(|e| WalletError::Derivation(e.to_string()))?;

        Ok(child_key.private_key.public_key(&self.secp))
    }
}

impl std::fmt::Debug for RootKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RootKey(..)")
    }
}
