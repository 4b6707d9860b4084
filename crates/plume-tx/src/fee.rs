//! Fee policies and transaction size estimation.
//!
//! The fee is a function of the serialized transaction's size, which is in
//! turn determined by the input and output counts and the output address
//! lengths. The policy is pluggable so the engine can be exercised with a
//! flat fee in tests while production uses the linear per-byte rule.

use crate::types::SpendableInput;
use crate::TxError;
use plume_types::TxOutput;

/// Serialized size of one input reference: 32-byte tx hash + u32 index.
const INPUT_REF_SIZE: usize = 36;

/// Serialized size of one witness: 32-byte public key + 64-byte signature
/// plus its length-free fixed layout.
const WITNESS_SIZE: usize = 96;

/// Fixed overhead: version byte plus the three varint section counts
/// (conservatively 2 bytes each).
const TX_OVERHEAD: usize = 7;

/// Estimate the serialized byte size of a transaction.
///
/// Counts the unsigned body (input refs, outputs with varint-length
/// addresses and 8-byte amounts) plus one witness per input.
pub fn estimated_tx_size(
    num_inputs: usize,
    outputs: &[TxOutput],
    change: Option<&TxOutput>,
) -> usize {
    let mut size = TX_OVERHEAD;
    size += num_inputs * (INPUT_REF_SIZE + WITNESS_SIZE);
    for output in outputs.iter().chain(change) {
        // varint address length (≤2 bytes for realistic addresses) + bytes + u64 amount
        size += 2 + output.address.len() + 8;
    }
    size
}

/// Pluggable fee computation: `fee(inputs, outputs, change) -> integer`.
///
/// Implementations must be deterministic so that fee estimation and the
/// actual send agree when invoked twice for the same request.
pub trait FeePolicy {
    fn fee_for(
        &self,
        inputs: &[SpendableInput],
        outputs: &[TxOutput],
        change: Option<&TxOutput>,
    ) -> Result<u64, TxError>;
}

/// Production fee rule: `constant + per_byte × estimated size`.
#[derive(Debug, Clone, Copy)]
pub struct LinearFeePolicy {
    pub constant: u64,
    pub per_byte: u64,
}

impl Default for LinearFeePolicy {
    fn default() -> Self {
        Self {
            constant: 155_381,
            per_byte: 44,
        }
    }
}

impl FeePolicy for LinearFeePolicy {
    fn fee_for(
        &self,
        inputs: &[SpendableInput],
        outputs: &[TxOutput],
        change: Option<&TxOutput>,
    ) -> Result<u64, TxError> {
        let size = estimated_tx_size(inputs.len(), outputs, change) as u64;
        self.per_byte
            .checked_mul(size)
            .and_then(|v| v.checked_add(self.constant))
            .ok_or(TxError::AmountOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_types::{AddressRole, DerivationPath};

    fn input(amount: u64) -> SpendableInput {
        SpendableInput {
            tx_hash: "00".repeat(32),
            tx_index: 0,
            receiver: "pl1sender".into(),
            amount,
            path: DerivationPath::new(0, AddressRole::External, 0),
        }
    }

    #[test]
    fn test_size_grows_with_inputs() {
        let outputs = [TxOutput::new("pl1dest", 100)];
        let small = estimated_tx_size(1, &outputs, None);
        let large = estimated_tx_size(4, &outputs, None);
        assert!(large > small);
    }

    #[test]
    fn test_size_counts_change_output() {
        let outputs = [TxOutput::new("pl1dest", 100)];
        let change = TxOutput::new("pl1change", 50);
        let without = estimated_tx_size(1, &outputs, None);
        let with = estimated_tx_size(1, &outputs, Some(&change));
        assert!(with > without);
    }

    #[test]
    fn test_linear_policy_is_deterministic() {
        let policy = LinearFeePolicy::default();
        let inputs = vec![input(500_000), input(250_000)];
        let outputs = [TxOutput::new("pl1dest", 600_000)];
        let a = policy.fee_for(&inputs, &outputs, None).unwrap();
        let b = policy.fee_for(&inputs, &outputs, None).unwrap();
        assert_eq!(a, b);
        assert!(a > policy.constant);
    }

    #[test]
    fn test_linear_policy_overflow() {
        let policy = LinearFeePolicy {
            constant: u64::MAX,
            per_byte: 1,
        };
        let outputs = [TxOutput::new("pl1dest", 1)];
        let err = policy.fee_for(&[input(1)], &outputs, None).unwrap_err();
        assert!(matches!(err, TxError::AmountOverflow));
    }
}
