use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, Result};

/// Opaque bearer credential issued by the backend at login.
///
/// The value is never printed: `Debug` shows a redacted placeholder and there
/// is no `Display`. Use [`SessionToken::expose`] at the one place that builds
/// the `Authorization` header.
///
/// # Examples
///
/// ```
/// use core_auth::SessionToken;
///
/// let token = SessionToken::new("eyJhbGciOiJIUzI1NiJ9").unwrap();
/// assert_eq!(format!("{:?}", token), "SessionToken([REDACTED])");
/// assert!(SessionToken::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token, rejecting empty or whitespace-only values
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Interpret a stored value; blank values count as "no token"
    pub fn from_stored(raw: Option<String>) -> Option<Self> {
        raw.and_then(|value| Self::new(value).ok())
    }

    /// Raw token text, for the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

impl TryFrom<String> for SessionToken {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}
