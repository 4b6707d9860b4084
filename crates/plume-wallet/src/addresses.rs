//! Address book and change-address management.
//!
//! The book owns two pieces of state under one mutex: the known-address set
//! (address id → derivation path, the wallet's persisted view of its own
//! addresses) and a per-(account, role) watermark of the next derivation
//! index to hand out.
//!
//! Change addresses follow a two-phase lifecycle: [`AddressBook::reserve`]
//! derives the next Internal address and advances the watermark without
//! touching the known set; [`AddressBook::commit`] is called only once the
//! network has accepted the broadcast and persists the address so future
//! balance and UTXO queries include it. A reservation that is never
//! committed leaves the known set unchanged — the index it consumed is
//! skipped, which never collides with later reservations.

use crate::keys::WalletKeys;
use plume_types::{Address, AddressRole, DerivationPath};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    by_id: HashMap<String, DerivationPath>,
    /// Next index to hand out per (account, role).
    watermarks: HashMap<(u32, u32), u32>,
}

/// The wallet's known-address set plus derivation watermarks.
#[derive(Default)]
pub struct AddressBook {
    inner: Mutex<Inner>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("address book lock poisoned")
    }

    /// Derive the address at the lowest unused index for `(account, role)`
    /// and advance the watermark. The known set is not modified.
    pub fn derive_next(&self, keys: &WalletKeys, account: u32, role: AddressRole) -> Address {
        let mut inner = self.lock();
        let slot = inner.watermarks.entry((account, role.as_u32())).or_insert(0);
        let index = *slot;
        *slot += 1;
        drop(inner);
        keys.address(&DerivationPath::new(account, role, index))
    }

    /// Reserve a fresh change (Internal) address for a send attempt.
    ///
    /// Concurrent reservations for the same account always receive distinct
    /// indices. Discarding the result is safe and side-effect free.
    pub fn reserve(&self, keys: &WalletKeys, account: u32) -> Address {
        self.derive_next(keys, account, AddressRole::Internal)
    }

    /// Persist an address into the known set.
    ///
    /// For a reserved change address this is called only after a successful
    /// broadcast. Also bumps the watermark so later reservations never
    /// collide with a committed index.
    pub fn commit(&self, address: Address) {
        let mut inner = self.lock();
        let path = address.path;
        let slot = inner
            .watermarks
            .entry((path.account, path.role.as_u32()))
            .or_insert(0);
        if *slot <= path.index {
            *slot = path.index + 1;
        }
        inner.by_id.insert(address.id, path);
    }

    /// Whether an address id is in the known set.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().by_id.contains_key(id)
    }

    /// All known address ids, in no particular order.
    pub fn known_ids(&self) -> Vec<String> {
        self.lock().by_id.keys().cloned().collect()
    }

    /// Snapshot of the known-address map.
    pub fn paths(&self) -> HashMap<String, DerivationPath> {
        self.lock().by_id.clone()
    }

    /// Next index that would be handed out for `(account, role)`.
    pub fn next_index(&self, account: u32, role: AddressRole) -> u32 {
        *self
            .lock()
            .watermarks
            .get(&(account, role.as_u32()))
            .unwrap_or(&0)
    }

    /// Number of known addresses.
    pub fn len(&self) -> usize {
        self.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
