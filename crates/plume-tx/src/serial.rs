//! Binary wire format.
//!
//! Layout (all integers little-endian, counts as LEB128 varints):
//!
//! ```text
//! [version: u8]
//! [input count: varint]   then per input:  [tx hash: 32 bytes] [index: u32]
//! [output count: varint]  then per output: [addr len: varint] [addr bytes] [amount: u64]
//! [witness count: varint] then per witness: [pubkey: 32 bytes] [signature: 64 bytes]
//! ```
//!
//! The unsigned body (everything before the witness section) is what gets
//! hashed and signed. Serialization is deterministic: the same plan always
//! produces the same bytes.

use crate::sign::TxWitness;
use crate::types::TransactionPlan;
use crate::TxError;

/// Current wire format version.
pub const TX_VERSION: u8 = 1;

/// Append an unsigned LEB128 varint.
fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn decode_tx_hash(hash: &str) -> Result<[u8; 32], TxError> {
    let bytes = hex::decode(hash).map_err(|_| TxError::MalformedTxId(hash.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| TxError::MalformedTxId(hash.to_string()))
}

/// Serialize the unsigned transaction body.
pub fn serialize_body(plan: &TransactionPlan) -> Result<Vec<u8>, TxError> {
    let mut out = Vec::new();
    out.push(TX_VERSION);

    write_varint(&mut out, plan.inputs.len() as u64);
    for input in &plan.inputs {
        out.extend_from_slice(&decode_tx_hash(&input.tx_hash)?);
        out.extend_from_slice(&input.tx_index.to_le_bytes());
    }

    let outputs = plan.wire_outputs();
    write_varint(&mut out, outputs.len() as u64);
    for output in &outputs {
        write_varint(&mut out, output.address.len() as u64);
        out.extend_from_slice(output.address.as_bytes());
        out.extend_from_slice(&output.amount.to_le_bytes());
    }

    Ok(out)
}

/// Append the witness section to a serialized body.
pub fn attach_witnesses(mut body: Vec<u8>, witnesses: &[TxWitness]) -> Vec<u8> {
    write_varint(&mut body, witnesses.len() as u64);
    for witness in witnesses {
        body.extend_from_slice(&witness.pubkey);
        body.extend_from_slice(&witness.signature);
    }
    body
}
