//! Backend error type and message normalisation.
//!
//! The backend reports failures in several shapes depending on which layer
//! rejected the request: `{"message": "..."}`, validation arrays such as
//! `{"message": ["a", "b"], "error": "Bad Request"}`, `{"error": "..."}`, or
//! `{"errors": [...]}`. [`message_from_body`] flattens all of them into a single
//! user-facing string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors produced while talking to the backend.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum BackendError {
    /// The request never produced a response (DNS, connection, timeout).
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body (or a token) could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
    /// The call needs a bearer token and none is available.
    #[error("Sessão expirada. Faça login novamente.")]
    Unauthenticated,
    /// The account was created but signing in with it failed.
    #[error("Conta criada! Faça login para continuar.")]
    Registered,
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Invalid(String),
}

impl BackendError {
    /// HTTP status of the rejection, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a user-facing message from a backend error body.
///
/// Looks at `message`, then `error`, then `errors`. Arrays are joined with `". "`.
pub fn message_from_body(body: &Value) -> Option<String> {
    ["message", "error", "errors"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(flatten)
}

/// Like [`message_from_body`], falling back to `fallback` when nothing usable is found.
pub fn message_or(body: &Value, fallback: &str) -> String {
    message_from_body(body).unwrap_or_else(|| fallback.to_string())
}

fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(". "))
            }
        }
        Value::Object(map) => match map.get("message") {
            Some(inner) => flatten(inner),
            None => Some(value.to_string()),
        },
        other => Some(other.to_string()),
    }
}
