//! Plume backend client library.
//!
//! Provides the async HTTP client for the light-wallet backend and the
//! [`ChainBackend`] trait the transaction engine consumes. The backend is an
//! external service with a fixed contract: bulk UTXO lookup (capped at
//! [`ADDRESSES_LIMIT`] addresses per call) and signed-transaction submission.
//!
//! # Example
//!
//! ```ignore
//! use plume_backend::{ChainBackend, HttpBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HttpBackend::new("https://backend.example.com");
//!     let utxos = backend
//!         .utxos_for_addresses(&["pl1...".to_string()])
//!         .await
//!         .unwrap();
//!     println!("{} UTXOs", utxos.len());
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{BackendAcceptance, BackendConfig, ChainBackend, HttpBackend, ADDRESSES_LIMIT};
pub use error::BackendError;
