//! UTXO discovery across a paginated backend.
//!
//! The backend caps each lookup at [`ADDRESSES_LIMIT`] addresses, so the
//! address set is partitioned into fixed-size batches and one call is issued
//! per batch, concurrently. The batching itself is a pure function so the
//! policy is testable without a backend. All batches must succeed; any
//! failure fails the whole discovery and the caller retries from scratch.

use futures::future;
use plume_backend::{BackendError, ChainBackend, ADDRESSES_LIMIT};
use plume_types::Utxo;

/// Partition addresses into batches of at most `limit`.
pub fn chunk_addresses(addresses: &[String], limit: usize) -> Vec<Vec<String>> {
    assert!(limit >= 1, "address batch limit must be at least 1");
    addresses.chunks(limit).map(|c| c.to_vec()).collect()
}

/// Fetch every UTXO owned by any of `addresses`, batching by the backend's
/// per-request address limit.
pub async fn all_utxos<B: ChainBackend>(
    backend: &B,
    addresses: &[String],
) -> Result<Vec<Utxo>, BackendError> {
    all_utxos_batched(backend, addresses, ADDRESSES_LIMIT).await
}

/// [`all_utxos`] with an explicit batch limit.
pub async fn all_utxos_batched<B: ChainBackend>(
    backend: &B,
    addresses: &[String],
    limit: usize,
) -> Result<Vec<Utxo>, BackendError> {
    let batches = chunk_addresses(addresses, limit);
    log::debug!(
        "discovering UTXOs for {} addresses in {} batches",
        addresses.len(),
        batches.len()
    );

    let fetches = batches
        .iter()
        .map(|batch| backend.utxos_for_addresses(batch));
    let groups = future::try_join_all(fetches).await?;

    Ok(groups.into_iter().flatten().collect())
}
