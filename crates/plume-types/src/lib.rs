//! Core types for the Plume light-client wallet.
//!
//! This crate provides the foundational types used across all Plume crates:
//! network identifiers, address roles and derivation paths, unspent output
//! references, and transaction outputs.

pub mod address;
pub mod utxo;

pub use address::{Address, AddressRole, DerivationPath, Network};
pub use utxo::{sum_amounts, TxOutput, Utxo};
