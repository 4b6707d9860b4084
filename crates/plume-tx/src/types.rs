//! Spendable inputs and transaction plans.

use plume_types::{sum_amounts, DerivationPath, TxOutput};
use serde::{Deserialize, Serialize};

/// A UTXO enriched with the derivation path of its owning address.
///
/// Built per transaction attempt from the raw UTXO plus the wallet's
/// address map; the path lets the signer produce the correct key without
/// re-querying wallet state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendableInput {
    pub tx_hash: String,
    pub tx_index: u32,
    pub receiver: String,
    pub amount: u64,
    pub path: DerivationPath,
}

/// A fully selected transaction: inputs, requested outputs, the reserved
/// change output (absent when change is exactly zero), and the fee.
///
/// Invariant: `sum(inputs) == sum(outputs) + fee + change`.
#[derive(Debug, Clone)]
pub struct TransactionPlan {
    pub inputs: Vec<SpendableInput>,
    pub outputs: Vec<TxOutput>,
    pub change: Option<TxOutput>,
    pub fee: u64,
}

impl TransactionPlan {
    /// Total value of the selected inputs.
    pub fn input_total(&self) -> u64 {
        self.inputs.iter().map(|i| i.amount).sum()
    }

    /// Change amount, zero when no change output is present.
    pub fn change_amount(&self) -> u64 {
        self.change.as_ref().map(|c| c.amount).unwrap_or(0)
    }

    /// Whether the plan satisfies the value-conservation invariant.
    pub fn balanced(&self) -> bool {
        let outputs = match sum_amounts(&self.outputs) {
            Some(v) => v,
            None => return false,
        };
        outputs
            .checked_add(self.fee)
            .and_then(|v| v.checked_add(self.change_amount()))
            == Some(self.input_total())
    }

    /// All outputs as they will appear on the wire: requested first, then
    /// change.
    pub fn wire_outputs(&self) -> Vec<TxOutput> {
        let mut outputs = self.outputs.clone();
        if let Some(change) = &self.change {
            outputs.push(change.clone());
        }
        outputs
    }
}
