//! Failure classification
//!
//! One total mapping from [`RequestFailure`] to [`ErrorKind`], plus the
//! message extraction every screen used to do by hand:
//! body `error`, then body `message`, then the transport's own message, then a
//! generic default for the kind. Empty strings are skipped at every step.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RequestFailure;
use crate::outcome::Failure;

/// Classification of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// No response was received
    Network,
    /// 5xx response
    Server,
    /// 4xx response other than 401, including a 404 for a missing record;
    /// `Failure::status` keeps the exact code
    ClientValidation,
    /// 401 response; the stored token has been cleared
    Unauthorized,
    /// The caller's scope was cancelled
    Cancelled,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Server => "server",
            ErrorKind::ClientValidation => "client-validation",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Fallback text when neither the body nor the transport says anything
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Unable to reach the server",
            ErrorKind::Server => "The server encountered an error",
            ErrorKind::ClientValidation => "The request was rejected",
            ErrorKind::Unauthorized => "Your session has expired, please sign in again",
            ErrorKind::Cancelled => "The request was cancelled",
            ErrorKind::Unknown => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a failure to its kind
pub fn classify(failure: &RequestFailure) -> ErrorKind {
    match failure {
        RequestFailure::Transport { .. } => ErrorKind::Network,
        RequestFailure::Status { status: 401, .. } => ErrorKind::Unauthorized,
        RequestFailure::Status { status, .. } if (400..500).contains(status) => {
            ErrorKind::ClientValidation
        }
        RequestFailure::Status { status, .. } if *status >= 500 => ErrorKind::Server,
        RequestFailure::Cancelled => ErrorKind::Cancelled,
        _ => ErrorKind::Unknown,
    }
}

/// Human-readable message for a failure of the given kind
pub fn extract_message(failure: &RequestFailure, kind: ErrorKind) -> String {
    let from_body = match failure {
        RequestFailure::Status { body, .. } => body_message(body),
        _ => None,
    };

    from_body
        .or_else(|| non_empty(failure.to_string()))
        .unwrap_or_else(|| kind.default_message().to_string())
}

/// Classify and describe a failure in one step
pub fn to_failure(failure: &RequestFailure) -> Failure {
    let kind = classify(failure);
    Failure {
        kind,
        message: extract_message(failure, kind),
        status: failure.status(),
    }
}

/// `error` or `message` from a JSON error body, skipping empty values
pub(crate) fn body_message(body: &[u8]) -> Option<String> {
    let fields = error_fields(body)?;
    field_text(fields.get("error")).or_else(|| field_text(fields.get("message")))
}

/// Only the `error` field of a body; used on 2xx responses where `message`
/// is often an informational success note.
pub(crate) fn body_error(body: &[u8]) -> Option<String> {
    field_text(error_fields(body)?.get("error"))
}

/// Error bodies are JSON objects; anything else carries no message.
fn error_fields(body: &[u8]) -> Option<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_slice(body).ok()? {
        serde_json::Value::Object(fields) => Some(fields),
        _ => None,
    }
}

fn field_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => non_empty(s.clone()),
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
