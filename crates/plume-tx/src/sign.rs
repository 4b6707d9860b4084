//! Witness signing.
//!
//! Signing hashes the unsigned body once (SHA-256) and produces one ed25519
//! witness per input. Keys are supplied through a caller-provided lookup so
//! this crate never holds wallet secrets; fee-only flows skip signing
//! entirely.

use crate::serial::{attach_witnesses, serialize_body};
use crate::types::TransactionPlan;
use crate::TxError;
use ed25519_dalek::{Signer, SigningKey};
use plume_types::DerivationPath;
use sha2::{Digest, Sha256};

/// One witness: the spending key's public half and its signature over the
/// body digest.
#[derive(Debug, Clone)]
pub struct TxWitness {
    pub pubkey: [u8; 32],
    pub signature: [u8; 64],
}

/// Sign a plan and return the full serialized transaction.
///
/// `key_for` maps each input's derivation path to its signing key; it is
/// called once per input, in input order.
pub fn sign_plan<F>(plan: &TransactionPlan, mut key_for: F) -> Result<Vec<u8>, TxError>
where
    F: FnMut(&DerivationPath) -> Result<SigningKey, TxError>,
{
    let body = serialize_body(plan)?;
    let digest = Sha256::digest(&body);

    let mut witnesses = Vec::with_capacity(plan.inputs.len());
    for input in &plan.inputs {
        let key = key_for(&input.path)?;
        let signature = key.sign(&digest);
        witnesses.push(TxWitness {
            pubkey: key.verifying_key().to_bytes(),
            signature: signature.to_bytes(),
        });
    }

    Ok(attach_witnesses(body, &witnesses))
}
