//! Unspent outputs and transaction outputs.
//!
//! Amounts are exact integer counts of the smallest currency unit. They are
//! never carried as floating-point values: a 53-bit float mantissa silently
//! loses precision on large amounts.

use serde::{Deserialize, Serialize};

/// An unspent transaction output owned by one address.
///
/// Sourced read-only from the backend; never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Hex-encoded id of the transaction that created this output.
    pub tx_hash: String,
    /// Index of this output within that transaction.
    pub tx_index: u32,
    /// Owning address id.
    pub receiver: String,
    /// Amount in atomic units.
    pub amount: u64,
}

/// A requested output of a transaction: destination and amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: String,
    pub amount: u64,
}

impl TxOutput {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Sum a slice of output amounts, failing on overflow.
pub fn sum_amounts(outputs: &[TxOutput]) -> Option<u64> {
    outputs
        .iter()
        .try_fold(0u64, |acc, o| acc.checked_add(o.amount))
}
