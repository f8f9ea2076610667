use serde::{Deserialize, Serialize};

use crate::{BiometricError, NativeError, NativeStatus};

/// The outcome of one authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The user was authenticated.
    Succeeded,
    /// The presented biometric did not match.
    Failed,
    /// The user or the caller canceled the prompt.
    Canceled,
    /// The user asked for the fallback method (e.g. passcode).
    FallbackRequested,
    /// Biometry is locked out after too many failed attempts.
    TooManyAttempts,
    /// Any other native failure.
    UnknownError,
    /// No prompt was shown because biometric authentication is unavailable.
    NotAvailable,
}

impl From<NativeStatus> for Status {
    fn from(status: NativeStatus) -> Self {
        match status {
            NativeStatus::AuthenticationFailed => Self::Failed,
            NativeStatus::UserCancel => Self::Canceled,
            NativeStatus::UserFallback => Self::FallbackRequested,
            NativeStatus::BiometryLockout => Self::TooManyAttempts,
            _ => Self::UnknownError,
        }
    }
}

/// Whether biometric authentication can be performed, and why not if it cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Ready to authenticate.
    Available,
    /// The device has no biometric sensor.
    NoSensor,
    /// No biometric identity is enrolled, or no device passcode is set.
    NoFingerprint,
    /// The platform predates biometric authentication support.
    NoApi,
    /// Unavailable for another reason.
    Unknown,
}

impl From<NativeStatus> for Availability {
    fn from(status: NativeStatus) -> Self {
        match status {
            NativeStatus::BiometryNotAvailable => Self::NoSensor,
            NativeStatus::BiometryNotEnrolled | NativeStatus::PasscodeNotSet => Self::NoFingerprint,
            _ => Self::Unknown,
        }
    }
}

/// The normalized result of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    status: Status,
    error_message: Option<String>,
}

impl AuthenticationResult {
    /// A successful attempt.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            status: Status::Succeeded,
            error_message: None,
        }
    }

    /// An unsuccessful attempt with a message describing why.
    pub fn with_error(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            error_message: Some(message.into()),
        }
    }

    /// The outcome of the attempt.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// The platform's description of the failure. Absent on success.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether the user was authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == Status::Succeeded
    }

    /// Convert into a `Result`, folding every non-success status into a [`BiometricError`].
    ///
    /// # Errors
    /// Returns [`BiometricError::NotAvailable`], [`BiometricError::Cancelled`] or
    /// [`BiometricError::Failed`] for the corresponding statuses.
    pub fn into_result(self) -> Result<(), BiometricError> {
        match self.status {
            Status::Succeeded => Ok(()),
            Status::NotAvailable => Err(BiometricError::NotAvailable),
            Status::Canceled => Err(BiometricError::Cancelled),
            status => Err(BiometricError::Failed {
                status,
                message: self.error_message.unwrap_or_default(),
            }),
        }
    }
}

impl From<NativeError> for AuthenticationResult {
    fn from(error: NativeError) -> Self {
        Self::with_error(error.status.into(), error.description)
    }
}
