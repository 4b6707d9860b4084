//! Fee estimation and send engine.
//!
//! Orchestrates the full construction sequence: discover UTXOs across the
//! paginated backend, map them to spendable inputs, reserve a change
//! address, select inputs and compute the fee, then either report the fee
//! (estimation) or sign, broadcast, and commit the change address.
//!
//! The change address is committed if and only if the backend accepts the
//! broadcast. Every failure path before that point simply abandons the plan
//! and its reservation; a retry starts from scratch with a fresh
//! reservation. Each network call is a single suspension point — there are
//! no background retries at this layer.

use crate::addresses::AddressBook;
use crate::discover;
use crate::error::{classify_selection_failure, WalletError};
use crate::inputs::map_inputs;
use crate::keys::WalletKeys;
use crate::vault::SeedVault;
use base64::Engine as _;
use plume_backend::{BackendAcceptance, ChainBackend};
use plume_tx::fee::FeePolicy;
use plume_tx::{select_inputs, sign_plan, TransactionPlan, TxError};
use plume_types::{Address, TxOutput};
use std::sync::Arc;

/// Result of a fee-only simulation. Carries no signing material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEstimate {
    pub fee: u64,
}

/// The transaction construction engine.
pub struct TxEngine<B, P> {
    backend: B,
    keys: WalletKeys,
    vault: SeedVault,
    book: Arc<AddressBook>,
    policy: P,
    account: u32,
}

impl<B: ChainBackend, P: FeePolicy> TxEngine<B, P> {
    /// Create an engine for one account.
    ///
    /// `keys` only needs to derive addresses; the spend seed stays sealed in
    /// `vault` until a send supplies the password.
    pub fn new(
        backend: B,
        keys: WalletKeys,
        vault: SeedVault,
        book: Arc<AddressBook>,
        policy: P,
        account: u32,
    ) -> Self {
        Self {
            backend,
            keys,
            vault,
            book,
            policy,
            account,
        }
    }

    /// The engine's address book.
    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    /// Compute the fee for sending `amount` to `receiver` without signing.
    pub async fn estimate_fee(
        &self,
        receiver: &str,
        amount: u64,
    ) -> Result<FeeEstimate, WalletError> {
        let (plan, _reservation) = self.build_plan(receiver, amount).await?;
        Ok(FeeEstimate { fee: plan.fee })
    }

    /// Construct, sign, and broadcast a transaction.
    ///
    /// On acceptance the reserved change address is committed to the known
    /// set; on any failure it is discarded untouched.
    pub async fn send(
        &self,
        receiver: &str,
        amount: u64,
        password: &str,
    ) -> Result<BackendAcceptance, WalletError> {
        let (plan, reservation) = self.build_plan(receiver, amount).await?;

        let seed = self.vault.unlock(password)?;
        let signing_keys = WalletKeys::from_seed(seed, self.keys.network());

        let raw = sign_plan(&plan, |path| {
            signing_keys
                .signing_key(path)
                .map_err(|e| TxError::Signing(e.to_string()))
        })?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);

        log::info!(
            "broadcasting: {} inputs, {} outputs, fee {}",
            plan.inputs.len(),
            plan.wire_outputs().len(),
            plan.fee
        );

        let accepted = self.backend.submit_tx(&encoded).await?;

        // Only a confirmed-accepted broadcast makes the change address real.
        self.book.commit(reservation);

        Ok(accepted)
    }

    /// Discovery → mapping → reservation → selection.
    ///
    /// Shared by estimation and send so the two always agree on the plan.
    async fn build_plan(
        &self,
        receiver: &str,
        amount: u64,
    ) -> Result<(TransactionPlan, Address), WalletError> {
        let known = self.book.known_ids();
        let utxos = discover::all_utxos(&self.backend, &known).await?;
        let available = map_inputs(utxos, &self.book.paths())?;

        let reservation = self.book.reserve(&self.keys, self.account);
        let outputs = vec![TxOutput::new(receiver, amount)];

        log::debug!(
            "selecting from {} spendable inputs for target {}",
            available.len(),
            amount
        );

        let plan = select_inputs(&available, &outputs, &reservation.id, &self.policy)
            .map_err(classify_selection_failure)?;

        Ok((plan, reservation))
    }
}
