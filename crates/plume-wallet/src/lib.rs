//! Plume wallet core.
//!
//! Ties together key derivation, the seed vault, change-address management,
//! UTXO discovery over the paginated backend, input mapping, and the
//! fee-estimation / send engine.

pub mod addresses;
pub mod discover;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod keys;
pub mod vault;

pub use addresses::AddressBook;
pub use discover::{all_utxos, chunk_addresses};
pub use engine::{FeeEstimate, TxEngine};
pub use error::{classify_selection_failure, WalletError};
pub use inputs::map_inputs;
pub use keys::WalletKeys;
pub use vault::SeedVault;
