//! Wallet key derivation.
//!
//! Derives addresses and signing keys from a 32-byte seed via HKDF-SHA256.
//! The hierarchy is split the same way a view/spend key pair is: a hot
//! address-derivation secret can produce the address at any
//! `(account, role, index)` coordinate, while the spend seed — optional, and
//! normally kept sealed in the [`crate::vault::SeedVault`] — is required to
//! produce signing keys. Fee estimation therefore never needs the spend
//! seed.

use crate::error::WalletError;
use ed25519_dalek::SigningKey;
use hkdf::Hkdf;
use plume_types::{Address, DerivationPath, Network};
use sha2::Sha256;

/// Bytes of the derived hash that make up an address body.
const ADDRESS_BODY_LEN: usize = 20;

/// Wallet key material.
pub struct WalletKeys {
    network: Network,
    derive_key: [u8; 32],
    spend_seed: Option<[u8; 32]>,
}

fn hkdf32(ikm: &[u8], info: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(None, ikm);
    let mut okm = [0u8; 32];
    hk.expand(info, &mut okm).expect("32 bytes is a valid HKDF output length");
    okm
}

impl WalletKeys {
    /// Create full keys (address derivation + signing) from a seed.
    pub fn from_seed(seed: [u8; 32], network: Network) -> Self {
        Self {
            network,
            derive_key: hkdf32(&seed, b"plume/address-derivation"),
            spend_seed: Some(seed),
        }
    }

    /// The address-only view of these keys: derives addresses, cannot sign.
    pub fn address_only(&self) -> Self {
        Self {
            network: self.network,
            derive_key: self.derive_key,
            spend_seed: None,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Whether these keys can produce signatures.
    pub fn can_spend(&self) -> bool {
        self.spend_seed.is_some()
    }

    /// Derive the address at a path.
    ///
    /// Deterministic: the same seed and path always produce the same id.
    pub fn address(&self, path: &DerivationPath) -> Address {
        let info = format!("plume/addr/{}", path);
        let material = hkdf32(&self.derive_key, info.as_bytes());
        let id = format!(
            "{}1{}",
            self.network.address_prefix(),
            hex::encode(&material[..ADDRESS_BODY_LEN])
        );
        Address::new(id, *path)
    }

    /// Derive the signing key for the address at a path.
    pub fn signing_key(&self, path: &DerivationPath) -> Result<SigningKey, WalletError> {
        let seed = self.spend_seed.ok_or(WalletError::CannotSign)?;
        let info = format!("plume/key/{}", path);
        Ok(SigningKey::from_bytes(&hkdf32(&seed, info.as_bytes())))
    }
}
