//! Seed vault.
//!
//! Seals the 32-byte spend seed under a password using Argon2id key
//! derivation + AES-256-GCM. The sealed blob is self-contained with all
//! parameters needed for unlocking (except the password).

use crate::error::WalletError;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;

/// Magic bytes identifying a sealed Plume seed.
const MAGIC: &[u8; 4] = b"PLMV";

/// Current vault format version.
const VERSION: u8 = 1;

/// Header size: 4 (magic) + 1 (version) + 32 (salt) + 12 (nonce) = 49 bytes.
const HEADER_SIZE: usize = 49;

/// Argon2id parameters (OWASP recommended minimums).
const ARGON2_T_COST: u32 = 3;
const ARGON2_M_COST: u32 = 65536; // 64 MiB
const ARGON2_PARALLELISM: u32 = 4;

fn derive_key(password: &str, salt: &[u8]) -> Result<[u8; 32], WalletError> {
    let params = argon2::Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_PARALLELISM, Some(32))
        .map_err(|e| WalletError::Vault(e.to_string()))?;
    let argon = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
    let mut key = [0u8; 32];
    argon
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| WalletError::Vault(e.to_string()))?;
    Ok(key)
}

/// A password-sealed spend seed.
#[derive(Debug)]
pub struct SeedVault {
    blob: Vec<u8>,
}

impl SeedVault {
    /// Seal a seed under a password.
    #[allow(deprecated)] // aes-gcm 0.10 uses generic-array 0.x
    pub fn seal(seed: &[u8; 32], password: &str) -> Result<Self, WalletError> {
        let mut rng = rand::thread_rng();

        let mut salt = [0u8; 32];
        let mut nonce_bytes = [0u8; 12];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut nonce_bytes);

        let key_bytes = derive_key(password, &salt)?;
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        let cipher = Aes256Gcm::new(key);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = cipher
            .encrypt(nonce, seed.as_slice())
            .map_err(|e| WalletError::Vault(e.to_string()))?;

        let mut blob = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
        blob.extend_from_slice(MAGIC);
        blob.push(VERSION);
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);

        Ok(Self { blob })
    }

    /// Rehydrate a vault from a previously sealed blob.
    pub fn from_blob(blob: Vec<u8>) -> Result<Self, WalletError> {
        if blob.len() < HEADER_SIZE || &blob[0..4] != MAGIC {
            return Err(WalletError::Vault("not a sealed seed".into()));
        }
        if blob[4] != VERSION {
            return Err(WalletError::Vault(format!(
                "unsupported vault version: {}",
                blob[4]
            )));
        }
        Ok(Self { blob })
    }

    /// The sealed bytes, for the caller to store wherever it likes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blob
    }

    /// Unlock the seed with a password.
    #[allow(deprecated)] // aes-gcm 0.10 uses generic-array 0.x
    pub fn unlock(&self, password: &str) -> Result<[u8; 32], WalletError> {
        let salt = &self.blob[5..37];
        let nonce_bytes = &self.blob[37..49];
        let ciphertext = &self.blob[HEADER_SIZE..];

        let key_bytes = derive_key(password, salt)?;
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        let cipher = Aes256Gcm::new(key);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| WalletError::DecryptionFailed)?;

        plaintext
            .try_into()
            .map_err(|_| WalletError::Vault("sealed payload has wrong length".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_unlock_roundtrip() {
        let seed = [7u8; 32];
        let vault = SeedVault::seal(&seed, "hunter2").unwrap();
        assert_eq!(vault.unlock("hunter2").unwrap(), seed);
    }

    #[test]
    fn test_wrong_password_fails() {
        let vault = SeedVault::seal(&[7u8; 32], "hunter2").unwrap();
        assert!(matches!(
            vault.unlock("hunter3"),
            Err(WalletError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_blob_roundtrip() {
        let seed = [9u8; 32];
        let vault = SeedVault::seal(&seed, "pw").unwrap();
        let restored = SeedVault::from_blob(vault.as_bytes().to_vec()).unwrap();
        assert_eq!(restored.unlock("pw").unwrap(), seed);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let err = SeedVault::from_blob(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, WalletError::Vault(_)));
    }

    #[test]
    fn test_truncated_blob_rejected() {
        let mut blob = MAGIC.to_vec();
        blob.push(VERSION);
        let err = SeedVault::from_blob(blob).unwrap_err();
        assert!(matches!(err, WalletError::Vault(_)));
    }
}
