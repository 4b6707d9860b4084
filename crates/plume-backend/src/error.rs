//! Backend error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid amount {value:?} for UTXO {tx_hash}:{tx_index}")]
    InvalidAmount {
        tx_hash: String,
        tx_index: u32,
        value: String,
    },

    #[error("{count} addresses exceeds the per-request limit of {limit}")]
    TooManyAddresses { count: usize, limit: usize },

    #[error("transaction rejected by backend ({code}): {message}")]
    Rejected { code: String, message: String },
}
