//! The seam between the portable authenticator and a platform authentication service.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::{BiometricType, Capabilities};

/// Status codes reported by the native authentication service.
///
/// Numeric values follow `LAError.Code` from `LocalAuthentication`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeStatus {
    /// The user failed to provide valid credentials.
    AuthenticationFailed,
    /// The user tapped the cancel button.
    UserCancel,
    /// The user tapped the fallback button.
    UserFallback,
    /// The system canceled authentication, e.g. another app came to the foreground.
    SystemCancel,
    /// No passcode is set on the device.
    PasscodeNotSet,
    /// Biometry hardware is absent or unusable.
    BiometryNotAvailable,
    /// The user has no enrolled biometric identities.
    BiometryNotEnrolled,
    /// Biometry is locked after too many failed attempts.
    BiometryLockout,
    /// The app invalidated the context while it was in use.
    AppCancel,
    /// The context was already invalidated or used.
    InvalidContext,
    /// A paired biometric accessory is required but missing.
    BiometryNotPaired,
    /// The paired biometric accessory is disconnected.
    BiometryDisconnected,
    /// Invalid dimensions were supplied for the prompt.
    InvalidDimensions,
    /// Displaying the prompt was disallowed.
    NotInteractive,
    /// A code this crate does not know about.
    Other(i64),
}

impl NativeStatus {
    /// Decode a raw `LAError` code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            -1 => Self::AuthenticationFailed,
            -2 => Self::UserCancel,
            -3 => Self::UserFallback,
            -4 => Self::SystemCancel,
            -5 => Self::PasscodeNotSet,
            -6 => Self::BiometryNotAvailable,
            -7 => Self::BiometryNotEnrolled,
            -8 => Self::BiometryLockout,
            -9 => Self::AppCancel,
            -10 => Self::InvalidContext,
            -11 => Self::BiometryNotPaired,
            -12 => Self::BiometryDisconnected,
            -14 => Self::InvalidDimensions,
            -1004 => Self::NotInteractive,
            other => Self::Other(other),
        }
    }

    /// The raw `LAError` code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::AuthenticationFailed => -1,
            Self::UserCancel => -2,
            Self::UserFallback => -3,
            Self::SystemCancel => -4,
            Self::PasscodeNotSet => -5,
            Self::BiometryNotAvailable => -6,
            Self::BiometryNotEnrolled => -7,
            Self::BiometryLockout => -8,
            Self::AppCancel => -9,
            Self::InvalidContext => -10,
            Self::BiometryNotPaired => -11,
            Self::BiometryDisconnected => -12,
            Self::InvalidDimensions => -14,
            Self::NotInteractive => -1004,
            Self::Other(code) => code,
        }
    }
}

impl From<i64> for NativeStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

/// An error returned by the native authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description} (code {})", .status.code())]
pub struct NativeError {
    /// The decoded status code.
    pub status: NativeStatus,
    /// The localized description supplied by the platform.
    pub description: String,
}

impl NativeError {
    /// Create a new native error.
    pub fn new(status: impl Into<NativeStatus>, description: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            description: description.into(),
        }
    }
}

/// The answer to one policy evaluation.
pub type EvaluationOutcome = Result<(), NativeError>;

/// Receives the answer to one policy evaluation.
///
/// A closed channel means the backend gave up on the evaluation without answering.
pub type EvaluationReply = oneshot::Receiver<EvaluationOutcome>;

/// One native authentication session.
///
/// A context may be evaluated at most once. Dropping it disposes the native handle.
pub trait NativeContext {
    /// Check whether device owner authentication with biometrics can be evaluated right now.
    ///
    /// # Errors
    /// Returns the native error explaining why the policy cannot be evaluated.
    fn can_evaluate(&self) -> Result<(), NativeError>;

    /// Override the label of the fallback button. An empty title hides the button.
    fn set_fallback_title(&self, title: &str);

    /// Override the label of the cancel button.
    fn set_cancel_title(&self, title: &str);

    /// Show the biometric prompt with `reason` and start evaluating the policy.
    fn evaluate(&self, reason: &str) -> EvaluationReply;

    /// The biometry the device offers, if any.
    fn biometry_type(&self) -> Option<BiometricType>;

    /// Invalidate the context, canceling any evaluation in flight.
    fn invalidate(&self);
}

/// Creates native contexts for a [`BiometricAuthenticator`](crate::BiometricAuthenticator).
pub trait ContextFactory {
    /// The context type this factory produces.
    type Context: NativeContext;

    /// What the running platform supports. Resolved once per authenticator.
    fn capabilities(&self) -> Capabilities;

    /// Construct a fresh context, or `None` when the platform cannot provide one.
    fn create(&self) -> Option<Self::Context>;
}
