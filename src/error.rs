// src/error.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// JSON-RPC "internal error" code wallets report when the account cannot
/// cover value plus gas.
pub const INSUFFICIENT_FUNDS_CODE: i64 = -32603;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Failures of the browser-facing proxy endpoints.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("invalid image payload: {0}")]
    InvalidImage(String),

    #[error("image storage failed: {0}")]
    Storage(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Backend(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidImage(_) | ProxyError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Failures of the typed HTTP clients (browser side and server side).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error status={status} body={body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// An on-chain call that was rejected or reverted.
#[derive(Debug, Clone, Error)]
#[error("contract call failed (code={code:?}): {message}")]
pub struct ContractError {
    pub code: Option<i64>,
    pub message: String,
}

impl ContractError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_insufficient_funds(&self) -> bool {
        self.code == Some(INSUFFICIENT_FUNDS_CODE)
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("Insufficient funds in your wallet.")]
    InsufficientFunds,

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("unknown token {0}")]
    UnknownToken(String),

    #[error("operation not allowed in current state: {0}")]
    InvalidState(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_is_matched_by_code() {
        assert!(ContractError::new(Some(-32603), "boom").is_insufficient_funds());
        assert!(!ContractError::new(Some(4001), "user rejected").is_insufficient_funds());
        assert!(!ContractError::new(None, "reverted").is_insufficient_funds());
    }

    #[test]
    fn proxy_errors_map_to_status_codes() {
        assert_eq!(
            ProxyError::InvalidImage("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::Storage("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
