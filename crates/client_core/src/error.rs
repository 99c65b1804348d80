use shared::{domain::ProductId, error::ApiException};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server rejected request to {path} with status {status}: {source}")]
    Rejected {
        path: String,
        status: u16,
        #[source]
        source: ApiException,
    },
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("quantity must be a non-negative integer, got '{0}'")]
    InvalidQuantity(String),
    #[error("product {0} is not in the local list")]
    UnknownProduct(ProductId),
}

impl ClientError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
