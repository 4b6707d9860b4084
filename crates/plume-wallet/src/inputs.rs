//! Mapping raw UTXOs to spendable inputs.

use crate::error::WalletError;
use plume_tx::SpendableInput;
use plume_types::{DerivationPath, Utxo};
use std::collections::HashMap;

/// Enrich each UTXO with the derivation path of its owning address.
///
/// Pure and synchronous. Every receiver must be present in `paths`; a miss
/// means the caller passed an incomplete address set, which is an invariant
/// violation rather than a user-facing condition.
pub fn map_inputs(
    utxos: Vec<Utxo>,
    paths: &HashMap<String, DerivationPath>,
) -> Result<Vec<SpendableInput>, WalletError> {
    utxos
        .into_iter()
        .map(|utxo| {
            let path = paths
                .get(&utxo.receiver)
                .copied()
                .ok_or_else(|| WalletError::UnknownAddress(utxo.receiver.clone()))?;
            Ok(SpendableInput {
                tx_hash: utxo.tx_hash,
                tx_index: utxo.tx_index,
                receiver: utxo.receiver,
                amount: utxo.amount,
                path,
            })
        })
        .collect()
}
