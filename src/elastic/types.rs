//! Log documents, index results and error definitions.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// One log entry, created right before it is indexed and dropped afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LogDocument {
    /// Document ID. Travels in the request path, not in the body.
    #[serde(skip)]
    pub id: Uuid,

    /// Configured log message.
    pub message: String,
}

impl LogDocument {
    /// Create a document with a fresh random ID.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
        }
    }
}

/// Successful index operation as reported by Elasticsearch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReceipt {
    pub status: StatusCode,
    /// e.g. `created` or `updated`.
    pub result: String,
    pub version: i64,
}

impl IndexReceipt {
    /// Extract `result` and `_version` from a decoded response body.
    ///
    /// `_version` has to be a number. A missing `result` is reported as
    /// `unknown` rather than failing the whole interpretation.
    pub fn from_fields(status: StatusCode, fields: &Map<String, Value>) -> ElasticResult<Self> {
        let version = match fields.get("_version") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(whole_i64))
                .ok_or_else(|| ElasticError::Decoding(format!("'_version' out of range: {n}")))?,
            Some(other) => {
                return Err(ElasticError::Decoding(format!(
                    "expected '_version' to be a number, got {other}"
                )))
            }
            None => {
                return Err(ElasticError::Decoding(
                    "response has no '_version' field".to_string(),
                ))
            }
        };

        let result = fields
            .get("result")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            status,
            result,
            version,
        })
    }
}

/// `f` as an `i64`, if it is a whole number inside the `i64` range.
fn whole_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

impl std::fmt::Display for IndexReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}; version={}", self.status, self.result, self.version)
    }
}

/// Errors that can occur while talking to Elasticsearch.
#[derive(Debug, Error)]
pub enum ElasticError {
    /// The HTTP client could not be built from the configuration.
    #[error("Client construction failed: {0}")]
    ClientConstruction(String),

    /// The index request did not complete (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Elasticsearch answered with a non-success status.
    #[error("Elasticsearch returned {status}")]
    Response { status: StatusCode, body: String },

    /// The response body did not have the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),
}

impl ElasticError {
    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            ElasticError::ClientConstruction(_) => "client_error",
            ElasticError::Transport(_) => "transport_error",
            ElasticError::Response { .. } => "rejected",
            ElasticError::Decoding(_) => "decoding_error",
        }
    }
}

/// Result type for Elasticsearch operations.
pub type ElasticResult<T> = Result<T, ElasticError>;
