//! End-to-end engine tests against an in-memory backend.

use plume_backend::{BackendAcceptance, BackendError, ChainBackend};
use plume_tx::fee::FeePolicy;
use plume_tx::{SpendableInput, TxError};
use plume_types::{AddressRole, Network, TxOutput, Utxo};
use plume_wallet::{AddressBook, SeedVault, TxEngine, WalletError, WalletKeys};
use std::sync::{Arc, Mutex};

const PASSWORD: &str = "correct horse";

/// Backend double: serves a fixed UTXO set, records every call, and answers
/// broadcasts from a scripted queue (empty queue = accept).
struct MockBackend {
    utxos: Vec<Utxo>,
    utxo_calls: Mutex<Vec<Vec<String>>>,
    submitted: Mutex<Vec<String>>,
    broadcast_script: Mutex<Vec<Result<(), (String, String)>>>,
    fail_address: Option<String>,
}

impl MockBackend {
    fn new(utxos: Vec<Utxo>) -> Arc<Self> {
        Arc::new(Self {
            utxos,
            utxo_calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            broadcast_script: Mutex::new(Vec::new()),
            fail_address: None,
        })
    }

    fn script_broadcasts(self: &Arc<Self>, script: Vec<Result<(), (String, String)>>) {
        *self.broadcast_script.lock().unwrap() = script;
    }

    fn utxo_call_count(&self) -> usize {
        self.utxo_calls.lock().unwrap().len()
    }

    fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

impl ChainBackend for MockBackend {
    async fn utxos_for_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<Utxo>, BackendError> {
        self.utxo_calls.lock().unwrap().push(addresses.to_vec());
        if let Some(bad) = &self.fail_address {
            if addresses.contains(bad) {
                return Err(BackendError::HttpStatus {
                    endpoint: "/api/v1/txs/utxoForAddresses".into(),
                    status: 500,
                    body: "boom".into(),
                });
            }
        }
        Ok(self
            .utxos
            .iter()
            .filter(|u| addresses.contains(&u.receiver))
            .cloned()
            .collect())
    }

    async fn submit_tx(
        &self,
        signed_tx_base64: &str,
    ) -> Result<BackendAcceptance, BackendError> {
        self.submitted
            .lock()
            .unwrap()
            .push(signed_tx_base64.to_string());
        let next = {
            let mut script = self.broadcast_script.lock().unwrap();
            if script.is_empty() {
                Ok(())
            } else {
                script.remove(0)
            }
        };
        match next {
            Ok(()) => Ok(BackendAcceptance {
                tx_id: Some("txid-1".into()),
            }),
            Err((code, message)) => Err(BackendError::Rejected { code, message }),
        }
    }
}

struct FlatFee(u64);

impl FeePolicy for FlatFee {
    fn fee_for(
        &self,
        _inputs: &[SpendableInput],
        _outputs: &[TxOutput],
        _change: Option<&TxOutput>,
    ) -> Result<u64, TxError> {
        Ok(self.0)
    }
}

/// Wallet funded with one external address holding the given UTXO amounts.
fn funded_engine(
    amounts: &[u64],
    fee: u64,
) -> (TxEngine<Arc<MockBackend>, FlatFee>, Arc<MockBackend>, Arc<AddressBook>) {
    let seed = [3u8; 32];
    let keys = WalletKeys::from_seed(seed, Network::Testnet);
    let vault = SeedVault::seal(&seed, PASSWORD).unwrap();
    let book = Arc::new(AddressBook::new());

    let receive = book.derive_next(&keys, 0, AddressRole::External);
    book.commit(receive.clone());

    let utxos = amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| Utxo {
            tx_hash: format!("{:064x}", i),
            tx_index: i as u32,
            receiver: receive.id.clone(),
            amount,
        })
        .collect();
    let backend = MockBackend::new(utxos);

    let engine = TxEngine::new(
        Arc::clone(&backend),
        keys.address_only(),
        vault,
        Arc::clone(&book),
        FlatFee(fee),
        0,
    );
    (engine, backend, book)
}

#[tokio::test]
async fn estimate_fee_reports_policy_fee_without_password() {
    let (engine, backend, _book) = funded_engine(&[200], 1);
    let estimate = engine.estimate_fee("tpl1dest", 150).await.unwrap();
    assert_eq!(estimate.fee, 1);
    // Estimation never broadcasts.
    assert_eq!(backend.submit_count(), 0);
}

#[tokio::test]
async fn estimate_fee_insufficient_funds() {
    // 100 < 150 + 1.
    let (engine, _backend, _book) = funded_engine(&[100], 1);
    let err = engine.estimate_fee("tpl1dest", 150).await.unwrap_err();
    match err {
        WalletError::InsufficientFunds {
            required,
            available,
        } => {
            assert_eq!(required, 151);
            assert_eq!(available, 100);
        }
        other => panic!("unexpected: {other}"),
    }
}

#[tokio::test]
async fn send_commits_change_address_on_acceptance() {
    let (engine, backend, book) = funded_engine(&[200], 1);
    assert_eq!(book.len(), 1);

    let accepted = engine.send("tpl1dest", 150, PASSWORD).await.unwrap();
    assert_eq!(accepted.tx_id.as_deref(), Some("txid-1"));
    assert_eq!(backend.submit_count(), 1);

    // Exactly one new known address: the committed change address at
    // Internal index 0.
    assert_eq!(book.len(), 2);
    let committed: Vec<_> = book
        .paths()
        .into_values()
        .filter(|p| p.role == AddressRole::Internal)
        .collect();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].index, 0);
}

#[tokio::test]
async fn rejected_broadcast_never_commits() {
    let (engine, backend, book) = funded_engine(&[200], 1);
    backend.script_broadcasts(vec![Err((
        "UTXO_SPENT".into(),
        "input already spent".into(),
    ))]);

    let err = engine.send("tpl1dest", 150, PASSWORD).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::Backend(BackendError::Rejected { .. })
    ));
    assert_eq!(backend.submit_count(), 1);
    // The known set still only holds the receiving address.
    assert_eq!(book.len(), 1);
    assert!(book
        .paths()
        .into_values()
        .all(|p| p.role == AddressRole::External));
}

#[tokio::test]
async fn retry_after_rejection_uses_a_fresh_change_index() {
    let (engine, backend, book) = funded_engine(&[200], 1);
    backend.script_broadcasts(vec![
        Err(("MEMPOOL_FULL".into(), "try later".into())),
        Ok(()),
    ]);

    engine.send("tpl1dest", 150, PASSWORD).await.unwrap_err();
    engine.send("tpl1dest", 150, PASSWORD).await.unwrap();

    // The abandoned reservation consumed index 0; the committed change
    // address sits at index 1 and no index is ever committed twice.
    let committed: Vec<_> = book
        .paths()
        .into_values()
        .filter(|p| p.role == AddressRole::Internal)
        .collect();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].index, 1);
}

#[tokio::test]
async fn estimate_and_send_agree_on_fee() {
    let (engine, _backend, _book) = funded_engine(&[500, 300], 7);
    let estimate = engine.estimate_fee("tpl1dest", 400).await.unwrap();
    engine.send("tpl1dest", 400, PASSWORD).await.unwrap();
    assert_eq!(estimate.fee, 7);
}

#[tokio::test]
async fn wrong_password_fails_before_broadcast() {
    let (engine, backend, book) = funded_engine(&[200], 1);
    let err = engine.send("tpl1dest", 150, "nope").await.unwrap_err();
    assert!(matches!(err, WalletError::DecryptionFailed));
    assert_eq!(backend.submit_count(), 0);
    assert_eq!(book.len(), 1);
}

#[tokio::test]
async fn discovery_issues_one_call_per_batch() {
    let addresses: Vec<String> = vec!["A".into(), "B".into()];
    let backend = MockBackend::new(vec![
        Utxo {
            tx_hash: "aa".repeat(32),
            tx_index: 0,
            receiver: "A".into(),
            amount: 10,
        },
        Utxo {
            tx_hash: "bb".repeat(32),
            tx_index: 1,
            receiver: "B".into(),
            amount: 20,
        },
    ]);

    // addressesLimit = 1 → exactly 2 calls, one address each.
    let utxos = plume_wallet::discover::all_utxos_batched(&backend, &addresses, 1)
        .await
        .unwrap();
    assert_eq!(backend.utxo_call_count(), 2);
    let calls = backend.utxo_calls.lock().unwrap();
    assert!(calls.iter().all(|c| c.len() == 1));
    drop(calls);

    // The merged result is the union, nothing dropped, nothing duplicated.
    assert_eq!(utxos.len(), 2);
    let mut amounts: Vec<u64> = utxos.iter().map(|u| u.amount).collect();
    amounts.sort_unstable();
    assert_eq!(amounts, vec![10, 20]);
}

#[tokio::test]
async fn discovery_call_count_matches_ceiling_law() {
    for len in [1usize, 3, 7, 12] {
        let addresses: Vec<String> = (0..len).map(|i| format!("addr{}", i)).collect();
        let backend = MockBackend::new(Vec::new());
        plume_wallet::discover::all_utxos_batched(&backend, &addresses, 5)
            .await
            .unwrap();
        assert_eq!(backend.utxo_call_count(), len.div_ceil(5), "len={len}");
    }
}

#[tokio::test]
async fn one_failed_batch_fails_the_whole_discovery() {
    let addresses: Vec<String> = vec!["A".into(), "B".into(), "C".into()];
    let utxos = vec![Utxo {
        tx_hash: "aa".repeat(32),
        tx_index: 0,
        receiver: "A".into(),
        amount: 10,
    }];
    let mut backend = MockBackend::new(utxos);
    Arc::get_mut(&mut backend).unwrap().fail_address = Some("B".into());

    let err = plume_wallet::discover::all_utxos_batched(&backend, &addresses, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::HttpStatus { status: 500, .. }));
}
