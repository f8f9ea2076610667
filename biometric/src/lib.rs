//! This crate provides a unified API for biometric authentication (`TouchID`, `FaceID`, `OpticID`)
//! backed by Apple's `LocalAuthentication` framework on iOS and macOS.
//!
//! The [`BiometricAuthenticator`] owns a single one-shot native context. Every call to
//! [`BiometricAuthenticator::authenticate`] consumes that context and leaves a fresh one behind,
//! whatever the outcome. Native error codes are folded into the portable [`Status`] and
//! [`Availability`] enumerations, so neither operation fails the caller.
//!
//! ```ignore
//! use touchkit_biometric::{AuthenticationRequest, BiometricAuthenticator, Status};
//!
//! let mut authenticator = BiometricAuthenticator::new();
//! let request = AuthenticationRequest::new("Unlock your vault")?
//!     .with_fallback_title("Use Passcode");
//!
//! let result = authenticator.authenticate(&request, None).await;
//! if result.status() == Status::Succeeded {
//!     // ...
//! }
//! ```

#![warn(missing_docs)]

mod authenticator;
mod cancel;
mod capability;
mod native;
mod request;
mod result;
pub mod sim;

/// Platform-specific implementations.
mod sys;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

pub use authenticator::BiometricAuthenticator;
pub use cancel::{CancellationSource, CancellationToken};
pub use capability::{ApplePlatform, Capabilities, OsVersion};
pub use native::{
    ContextFactory, EvaluationOutcome, EvaluationReply, NativeContext, NativeError, NativeStatus,
};
pub use request::AuthenticationRequest;
pub use result::{AuthenticationResult, Availability, Status};
pub use sys::PlatformFactory;

/// An authenticator bound to the backend of the current target platform.
pub type PlatformAuthenticator = BiometricAuthenticator<PlatformFactory>;

/// The type of biometric authentication available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiometricType {
    /// Fingerprint authentication (`TouchID`)
    Fingerprint,
    /// Facial recognition (`FaceID`)
    Face,
    /// Iris scanning (`OpticID`)
    Iris,
    /// Unknown or other biometric type
    Unknown,
}

/// Errors that can occur during biometric authentication.
#[derive(Debug, Error)]
pub enum BiometricError {
    /// Biometric authentication is not available on this device.
    #[error("Biometric authentication is not available on this device")]
    NotAvailable,
    /// The authentication was cancelled by the user or the caller.
    #[error("Authentication was cancelled")]
    Cancelled,
    /// Authentication did not succeed.
    #[error("Authentication failed ({status:?}): {message}")]
    Failed {
        /// The mapped outcome of the attempt.
        status: Status,
        /// The localized description reported by the platform.
        message: String,
    },
    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn shared() -> &'static Mutex<PlatformAuthenticator> {
    static AUTHENTICATOR: OnceLock<Mutex<PlatformAuthenticator>> = OnceLock::new();
    AUTHENTICATOR.get_or_init(|| Mutex::new(PlatformAuthenticator::new()))
}

/// Reports whether biometric authentication can currently be performed, and why not if it cannot.
pub async fn availability() -> Availability {
    shared().lock().await.availability()
}

/// Checks if biometric authentication is available on the current device.
pub async fn is_available() -> bool {
    shared().lock().await.is_available()
}

/// Get the available biometric type.
///
/// Returns `None` if biometrics are not available.
pub async fn get_biometric_type() -> Option<BiometricType> {
    shared().lock().await.biometric_type()
}

/// Request biometric authentication with a reason.
///
/// # Errors
/// Returns a [`BiometricError`] if:
/// - The reason is empty.
/// - Biometric authentication is not available.
/// - The user cancels the authentication.
/// - Authentication fails.
pub async fn authenticate(reason: &str) -> Result<(), BiometricError> {
    let request = AuthenticationRequest::new(reason)?;
    authenticate_with(&request, None).await.into_result()
}

/// Run one authentication attempt with the full request and an optional cancellation token.
///
/// Calls are serialized across the process. When biometrics are unavailable the prompt is skipped
/// and the result carries [`Status::NotAvailable`].
pub async fn authenticate_with(
    request: &AuthenticationRequest,
    cancel: Option<&CancellationToken>,
) -> AuthenticationResult {
    let mut authenticator = shared().lock().await;
    authenticator.authenticate_if_available(request, cancel).await
}

#[cfg(all(test, not(any(target_os = "ios", target_os = "macos"))))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn free_functions_degrade_without_api() {
        assert_eq!(availability().await, Availability::NoApi);
        assert!(!is_available().await);
        assert_eq!(get_biometric_type().await, None);

        let request = AuthenticationRequest::new("Unlock").unwrap();
        let result = authenticate_with(&request, None).await;
        assert_eq!(result.status(), Status::NotAvailable);
        assert!(result.error_message().is_some());
    }

    #[tokio::test]
    async fn authenticate_reports_errors() {
        assert!(matches!(
            authenticate("  ").await,
            Err(BiometricError::InvalidRequest(_))
        ));
        assert!(matches!(
            authenticate("Unlock").await,
            Err(BiometricError::NotAvailable)
        ));
    }
}
