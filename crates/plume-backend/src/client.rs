//! HTTP backend client.
//!
//! Typed async methods for the two light-wallet backend endpoints: bulk UTXO
//! lookup and signed-transaction submission. Errors propagate unchanged to
//! the caller; there is no retry or caching at this layer — the engine above
//! decides whether an operation is worth repeating.

use crate::error::BackendError;
use plume_types::Utxo;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Maximum number of addresses the backend accepts per UTXO lookup.
///
/// Deployment constant of the backend contract, not user-configurable.
pub const ADDRESSES_LIMIT: usize = 50;

/// Abstract backend consumed by the transaction engine.
///
/// Implemented by [`HttpBackend`] for production and by in-memory mocks in
/// tests.
pub trait ChainBackend {
    /// Fetch every UTXO owned by any of `addresses`.
    ///
    /// Callers must respect [`ADDRESSES_LIMIT`]; an oversized call is a
    /// caller error.
    fn utxos_for_addresses(
        &self,
        addresses: &[String],
    ) -> impl Future<Output = Result<Vec<Utxo>, BackendError>> + Send;

    /// Submit a base64-encoded signed transaction for broadcast.
    fn submit_tx(
        &self,
        signed_tx_base64: &str,
    ) -> impl Future<Output = Result<BackendAcceptance, BackendError>> + Send;
}

/// A shared backend is still a backend.
impl<B: ChainBackend + Send + Sync> ChainBackend for Arc<B> {
    async fn utxos_for_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<Utxo>, BackendError> {
        (**self).utxos_for_addresses(addresses).await
    }

    async fn submit_tx(
        &self,
        signed_tx_base64: &str,
    ) -> Result<BackendAcceptance, BackendError> {
        (**self).submit_tx(signed_tx_base64).await
    }
}

/// Configuration for the HTTP backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL (e.g., `https://backend.example.com`).
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Backend acceptance response for a broadcast transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendAcceptance {
    /// Transaction id assigned by the backend, when it reports one.
    #[serde(default, rename = "txId")]
    pub tx_id: Option<String>,
}

/// Wire record for one UTXO as the backend serves it.
///
/// The amount is a decimal string on the wire so it never passes through a
/// JSON float.
#[derive(Debug, Clone, Deserialize)]
struct UtxoRecord {
    #[serde(rename = "txHash")]
    tx_hash: String,
    #[serde(rename = "txIndex")]
    tx_index: u32,
    receiver: String,
    amount: String,
}

impl UtxoRecord {
    fn into_utxo(self) -> Result<Utxo, BackendError> {
        let amount = self
            .amount
            .parse::<u64>()
            .map_err(|_| BackendError::InvalidAmount {
                tx_hash: self.tx_hash.clone(),
                tx_index: self.tx_index,
                value: self.amount.clone(),
            })?;
        Ok(Utxo {
            tx_hash: self.tx_hash,
            tx_index: self.tx_index,
            receiver: self.receiver,
            amount,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UtxoResponse {
    utxos: Vec<UtxoRecord>,
}

#[derive(Serialize)]
struct UtxoRequest<'a> {
    addresses: &'a [String],
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    #[serde(rename = "signedTx")]
    signed_tx: &'a str,
}

/// Structured rejection body from the backend.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    code: String,
    message: String,
}

/// Async HTTP client for the light-wallet backend.
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// Create a new client with the given base URL.
    pub fn new(url: &str) -> Self {
        Self::with_config(BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to create HTTP client");

        Self { client, config }
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::Response, BackendError> {
        let url = format!("{}{}", self.config.url, endpoint);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        Ok(resp)
    }
}

impl ChainBackend for HttpBackend {
    async fn utxos_for_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<Utxo>, BackendError> {
        if addresses.len() > ADDRESSES_LIMIT {
            return Err(BackendError::TooManyAddresses {
                count: addresses.len(),
                limit: ADDRESSES_LIMIT,
            });
        }

        let endpoint = "/api/v1/txs/utxoForAddresses";
        let resp = self.post(endpoint, &UtxoRequest { addresses }).await?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
                body: body.chars().take(500).collect(),
            });
        }

        let parsed: UtxoResponse = resp.json().await.map_err(|e| BackendError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        log::debug!(
            "fetched {} UTXOs for {} addresses",
            parsed.utxos.len(),
            addresses.len()
        );

        parsed
            .utxos
            .into_iter()
            .map(UtxoRecord::into_utxo)
            .collect()
    }

    async fn submit_tx(
        &self,
        signed_tx_base64: &str,
    ) -> Result<BackendAcceptance, BackendError> {
        let endpoint = "/api/v1/txs/signed";
        let resp = self
            .post(
                endpoint,
                &SubmitRequest {
                    signed_tx: signed_tx_base64,
                },
            )
            .await?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            // The backend reports rejections as a structured {code, message}
            // document; anything else is a plain HTTP failure.
            if let Ok(rejection) = serde_json::from_str::<RejectionBody>(&body) {
                return Err(BackendError::Rejected {
                    code: rejection.code,
                    message: rejection.message,
                });
            }
            return Err(BackendError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
                body: body.chars().take(500).collect(),
            });
        }

        let accepted: BackendAcceptance =
            resp.json().await.map_err(|e| BackendError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        log::info!(
            "transaction accepted by backend{}",
            accepted
                .tx_id
                .as_deref()
                .map(|id| format!(": {}", id))
                .unwrap_or_default()
        );

        Ok(accepted)
    }
}
