//! Plume transaction construction.
//!
//! Provides the spendable-input and transaction-plan types, the pluggable
//! fee policy, deterministic coin selection, the binary wire format, and
//! witness signing.

pub mod fee;
pub mod select;
pub mod serial;
pub mod sign;
pub mod types;

pub use fee::{FeePolicy, LinearFeePolicy};
pub use select::{select_inputs, SelectError};
pub use sign::sign_plan;
pub use types::{SpendableInput, TransactionPlan};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("malformed transaction id {0:?} (expected 32 bytes of hex)")]
    MalformedTxId(String),

    #[error("amount overflow")]
    AmountOverflow,

    #[error("fee policy error: {0}")]
    FeePolicy(String),

    #[error("signing error: {0}")]
    Signing(String),
}
