use thiserror::Error;

use crate::classifier::ErrorKind;

/// A classified failure, ready to show to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status of the response, when one was received
    pub status: Option<u16>,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Result of every facade operation. Exactly one variant applies.
///
/// Screens map `Unauthenticated` to a login redirect, `Failure` to an error
/// message and `Success` to display. `Cancelled` means the caller no longer
/// cares and must not be shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Unauthenticated,
    Cancelled,
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// Whether the screen should send the user to the login page
    pub fn requires_login(&self) -> bool {
        match self {
            Outcome::Unauthenticated => true,
            Outcome::Failure(failure) => failure.kind == ErrorKind::Unauthorized,
            _ => false,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Unauthenticated => Outcome::Unauthenticated,
            Outcome::Cancelled => Outcome::Cancelled,
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Message to surface, if any. `Cancelled` and `Success` have none.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Outcome::Failure(failure) => Some(&failure.message),
            Outcome::Unauthenticated => Some(ErrorKind::Unauthorized.default_message()),
            _ => None,
        }
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Outcome::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(Outcome::<()>::Unauthenticated.requires_login());
        assert!(Outcome::<()>::from(Failure::new(ErrorKind::Unauthorized, "expired")).requires_login());
        assert!(!Outcome::<()>::from(Failure::new(ErrorKind::Server, "boom")).requires_login());
        assert!(!Outcome::Success(1).requires_login());
    }

    #[test]
    fn test_map_preserves_tag() {
        assert_eq!(Outcome::Success(2).map(|v| v * 2), Outcome::Success(4));
        assert_eq!(Outcome::<i32>::Cancelled.map(|v| v * 2), Outcome::Cancelled);

        let failure = Failure::new(ErrorKind::Network, "offline");
        assert_eq!(
            Outcome::<i32>::Failure(failure.clone()).map(|v| v * 2),
            Outcome::Failure(failure)
        );
    }

    #[test]
    fn test_cancelled_is_silent() {
        let outcome = Outcome::<()>::Cancelled;
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.user_message(), None);
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::new(ErrorKind::ClientValidation, "title required").with_status(422);
        assert_eq!(failure.to_string(), "client-validation: title required");
        assert_eq!(failure.status, Some(422));
    }
}
