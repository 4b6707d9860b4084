//! Wallet error types and selection-failure classification.

use plume_backend::BackendError;
use plume_tx::{SelectError, TxError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("not enough funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("transaction construction failed: {0}")]
    Construction(String),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("UTXO owned by unknown address {0} (address map is incomplete)")]
    UnknownAddress(String),

    #[error("decryption failed (wrong password or corrupted data)")]
    DecryptionFailed,

    #[error("seed vault error: {0}")]
    Vault(String),

    #[error("wallet cannot sign (no spend seed)")]
    CannotSign,
}

impl From<TxError> for WalletError {
    fn from(err: TxError) -> Self {
        WalletError::Construction(err.to_string())
    }
}

/// Single translation point from selection failures to the caller-facing
/// taxonomy.
///
/// The two shortfall kinds become [`WalletError::InsufficientFunds`]
/// (user-correctable); everything else, including kinds added to
/// [`SelectError`] later, falls back to the generic construction error. An
/// empty wallet reports both figures as zero.
pub fn classify_selection_failure(err: SelectError) -> WalletError {
    match err {
        SelectError::NoInputs => WalletError::InsufficientFunds {
            required: 0,
            available: 0,
        },
        SelectError::NotEnoughInput {
            required,
            available,
        } => WalletError::InsufficientFunds {
            required,
            available,
        },
        other => WalletError::Construction(other.to_string()),
    }
}
