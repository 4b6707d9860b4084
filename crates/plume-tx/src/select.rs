//! Deterministic coin selection.
//!
//! Selects a subset of spendable inputs covering the requested outputs plus
//! the policy-computed fee. Candidates are taken largest-first under a total
//! order (amount descending, then tx hash and index ascending), so the same
//! input set always yields the same selection and fee estimation agrees with
//! the actual send. The fee is recomputed as the input count grows, since it
//! depends on the serialized size.

use crate::fee::FeePolicy;
use crate::types::{SpendableInput, TransactionPlan};
use crate::TxError;
use plume_types::{sum_amounts, TxOutput};
use thiserror::Error;

/// Selection failures.
///
/// `NoInputs` and `NotEnoughInput` both mean the wallet cannot fund the
/// request; everything else is a construction failure. Marked non-exhaustive
/// so callers classify unrecognized kinds through a fallback arm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SelectError {
    #[error("no spendable inputs available")]
    NoInputs,

    #[error("not enough input: required {required}, available {available}")]
    NotEnoughInput { required: u64, available: u64 },

    #[error(transparent)]
    Tx(#[from] TxError),
}

/// Select inputs for `outputs`, paying change to `change_address`.
///
/// Terminates after at most one pass over the candidates. A change amount of
/// exactly zero drops the change output from the plan.
pub fn select_inputs(
    available: &[SpendableInput],
    outputs: &[TxOutput],
    change_address: &str,
    policy: &dyn FeePolicy,
) -> Result<TransactionPlan, SelectError> {
    if available.is_empty() {
        return Err(SelectError::NoInputs);
    }

    let target = sum_amounts(outputs).ok_or(TxError::AmountOverflow)?;

    let mut candidates: Vec<&SpendableInput> = available.iter().collect();
    candidates.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.tx_hash.cmp(&b.tx_hash))
            .then_with(|| a.tx_index.cmp(&b.tx_index))
    });

    // Fee is probed with a change output present; the amount does not affect
    // the size, only the address length does.
    let change_probe = TxOutput::new(change_address, 0);

    let mut selected: Vec<SpendableInput> = Vec::new();
    let mut total = 0u64;

    for candidate in candidates {
        selected.push(candidate.clone());
        total = total
            .checked_add(candidate.amount)
            .ok_or(TxError::AmountOverflow)?;

        let fee = policy.fee_for(&selected, outputs, Some(&change_probe))?;
        let needed = target.checked_add(fee).ok_or(TxError::AmountOverflow)?;

        if total >= needed {
            let change_amount = total - needed;
            let change = if change_amount > 0 {
                Some(TxOutput::new(change_address, change_amount))
            } else {
                None
            };
            let plan = TransactionPlan {
                inputs: selected,
                outputs: outputs.to_vec(),
                change,
                fee,
            };
            debug_assert!(plan.balanced());
            return Ok(plan);
        }
    }

    // Even spending everything falls short; report the minimal requirement.
    let min_fee = policy.fee_for(&selected, outputs, Some(&change_probe))?;
    Err(SelectError::NotEnoughInput {
        required: target.saturating_add(min_fee),
        available: total,
    })
}
