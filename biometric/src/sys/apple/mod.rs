//! Apple platform (iOS/macOS) biometric implementation using swift-bridge.

use std::fmt;

use log::debug;
use tokio::sync::oneshot;

use crate::{
    ApplePlatform, BiometricType, Capabilities, ContextFactory, EvaluationOutcome,
    EvaluationReply, NativeContext, NativeError, NativeStatus, OsVersion,
};

#[swift_bridge::bridge]
mod ffi {
    extern "Rust" {
        type EvaluationCallback;
        fn on_complete(self, success: bool, code: i64, message: String);
    }

    extern "Swift" {
        type LocalAuthContext;

        #[swift_bridge(init)]
        fn new() -> LocalAuthContext;

        fn can_evaluate_biometrics(self: &LocalAuthContext) -> i64;
        fn last_error_description(self: &LocalAuthContext) -> String;
        fn set_fallback_title(self: &LocalAuthContext, title: &str);
        fn set_cancel_title(self: &LocalAuthContext, title: &str);
        fn evaluate_biometrics(self: &LocalAuthContext, reason: &str, callback: EvaluationCallback);
        // 0: None, 1: TouchID, 2: FaceID, 3: OpticID
        fn biometry_type(self: &LocalAuthContext) -> u8;
        fn invalidate(self: &LocalAuthContext);
    }

    extern "Swift" {
        fn local_auth_os_major() -> u32;
        fn local_auth_os_minor() -> u32;
        fn local_auth_os_patch() -> u32;
    }
}

/// Delivers the completion of `evaluatePolicy` back to Rust.
pub struct EvaluationCallback {
    sender: oneshot::Sender<EvaluationOutcome>,
}

impl EvaluationCallback {
    fn on_complete(self, success: bool, code: i64, message: String) {
        let outcome = if success {
            Ok(())
        } else {
            Err(NativeError::new(NativeStatus::from_code(code), message))
        };
        let _ = self.sender.send(outcome);
    }
}

/// Builds `LAContext`-backed contexts.
#[derive(Debug, Clone, Copy)]
pub struct AppleFactory {
    capabilities: Capabilities,
}

impl Default for AppleFactory {
    fn default() -> Self {
        let platform = if cfg!(target_os = "ios") {
            ApplePlatform::Ios
        } else {
            ApplePlatform::MacOs
        };
        let version = OsVersion::new(
            ffi::local_auth_os_major(),
            ffi::local_auth_os_minor(),
            ffi::local_auth_os_patch(),
        );
        debug!("LocalAuthentication on {platform:?} {version}");
        Self {
            capabilities: Capabilities::for_platform(platform, version),
        }
    }
}

impl ContextFactory for AppleFactory {
    type Context = AppleContext;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create(&self) -> Option<AppleContext> {
        Some(AppleContext {
            inner: ffi::LocalAuthContext::new(),
        })
    }
}

/// One `LAContext`. Dropping it releases the Swift object.
pub struct AppleContext {
    inner: ffi::LocalAuthContext,
}

// Safety: LAContext may be used from any thread, and the authenticator never shares a context
// between concurrent callers.
#[allow(clippy::non_send_fields_in_send_ty)]
unsafe impl Send for AppleContext {}

impl fmt::Debug for AppleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppleContext").finish_non_exhaustive()
    }
}

impl NativeContext for AppleContext {
    fn can_evaluate(&self) -> Result<(), NativeError> {
        match self.inner.can_evaluate_biometrics() {
            0 => Ok(()),
            code => Err(NativeError::new(
                NativeStatus::from_code(code),
                self.inner.last_error_description(),
            )),
        }
    }

    fn set_fallback_title(&self, title: &str) {
        self.inner.set_fallback_title(title);
    }

    fn set_cancel_title(&self, title: &str) {
        self.inner.set_cancel_title(title);
    }

    fn evaluate(&self, reason: &str) -> EvaluationReply {
        let (sender, receiver) = oneshot::channel();
        self.inner.evaluate_biometrics(reason, EvaluationCallback { sender });
        receiver
    }

    fn biometry_type(&self) -> Option<BiometricType> {
        match self.inner.biometry_type() {
            1 => Some(BiometricType::Fingerprint),
            2 => Some(BiometricType::Face),
            3 => Some(BiometricType::Iris),
            _ => None,
        }
    }

    fn invalidate(&self) {
        self.inner.invalidate();
    }
}
