use bytes::Bytes;
use thiserror::Error;

/// Why a request did not produce a usable 2xx response.
///
/// Raised by the executor and folded into an `Outcome` by the facade; it never
/// crosses the public boundary of a facade call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestFailure {
    /// No response was received (connect, DNS, TLS, timeout)
    #[error("{message}")]
    Transport { message: String },

    /// A response arrived with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Bytes },

    /// The caller's scope was cancelled before the response could be used
    #[error("Request cancelled")]
    Cancelled,

    /// The request could not be built or its response could not be read
    #[error("{message}")]
    Other { message: String },
}

impl RequestFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn other(message: impl Into<String>) -> Self {
        RequestFailure::Other {
            message: message.into(),
        }
    }
}
