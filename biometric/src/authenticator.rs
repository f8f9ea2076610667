//! One-shot context management around a native authentication service.

use std::fmt;

use log::{debug, warn};

use crate::{
    AuthenticationRequest, AuthenticationResult, Availability, BiometricType, CancellationToken,
    Capabilities, ContextFactory, NativeContext, PlatformFactory, Status,
};

const CALLER_CANCELLED: &str = "Authentication was canceled by the application";
const NO_CONTEXT: &str = "Biometric authentication is not supported on this platform version";
const REPLY_DROPPED: &str = "The authentication service dropped the request without replying";

/// Drives biometric authentication attempts against a native backend.
///
/// The authenticator owns exactly one native context. Each attempt consumes it and a fresh one is
/// in place by the time [`authenticate`](Self::authenticate) returns, so attempts never reuse a
/// context. Attempts take `&mut self` and are therefore serialized per instance.
pub struct BiometricAuthenticator<F: ContextFactory = PlatformFactory> {
    factory: F,
    capabilities: Capabilities,
    context: Option<F::Context>,
}

impl BiometricAuthenticator<PlatformFactory> {
    /// Create an authenticator for the current platform.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(PlatformFactory::default())
    }
}

impl Default for BiometricAuthenticator<PlatformFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ContextFactory> BiometricAuthenticator<F> {
    /// Create an authenticator on top of a custom backend.
    pub fn with_factory(factory: F) -> Self {
        let capabilities = factory.capabilities();
        debug!("biometric capabilities: {capabilities:?}");
        let context = create_context(&factory, capabilities);
        Self {
            factory,
            capabilities,
            context,
        }
    }

    /// What the backing platform supports.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether a native context exists. `false` means the platform predates biometric support.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.context.is_some()
    }

    /// Reports whether biometric authentication can currently be performed.
    #[must_use]
    pub fn availability(&self) -> Availability {
        let Some(context) = &self.context else {
            return Availability::NoApi;
        };

        match context.can_evaluate() {
            Ok(()) => Availability::Available,
            Err(error) => {
                debug!("biometric policy cannot be evaluated: {error}");
                Availability::from(error.status)
            }
        }
    }

    /// Shorthand for `availability() == Availability::Available`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability() == Availability::Available
    }

    /// The kind of biometry the device offers.
    #[must_use]
    pub fn biometric_type(&self) -> Option<BiometricType> {
        if !self.capabilities.biometry_type {
            return None;
        }
        self.context.as_ref()?.biometry_type()
    }

    /// Run one authentication attempt.
    ///
    /// Suspends until the platform answers or `cancel` fires. Cancellation invalidates the
    /// in-flight context right away and yields [`Status::Canceled`]. The context is replaced on
    /// every exit path, including when this future is dropped before completion.
    pub async fn authenticate(
        &mut self,
        request: &AuthenticationRequest,
        cancel: Option<&CancellationToken>,
    ) -> AuthenticationResult {
        let capabilities = self.capabilities;
        let mut lease = ContextLease {
            slot: &mut self.context,
            factory: &self.factory,
            capabilities,
        };

        let Some(context) = lease.current() else {
            return AuthenticationResult::with_error(Status::NotAvailable, NO_CONTEXT);
        };

        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return AuthenticationResult::with_error(Status::Canceled, CALLER_CANCELLED);
        }

        if let Some(title) = request.fallback_title().filter(|_| capabilities.fallback_title) {
            context.set_fallback_title(title);
        }
        if let Some(title) = request.cancel_title().filter(|_| capabilities.cancel_title) {
            context.set_cancel_title(title);
        }

        let reply = context.evaluate(request.reason());
        let answer = match cancel {
            Some(token) => tokio::select! {
                biased;
                answer = reply => Some(answer),
                () = token.cancelled() => None,
            },
            None => Some(reply.await),
        };

        match answer {
            Some(Ok(Ok(()))) => AuthenticationResult::succeeded(),
            Some(Ok(Err(error))) => {
                let result = AuthenticationResult::from(error);
                if result.status() == Status::UnknownError {
                    warn!("unmapped biometric failure: {:?}", result.error_message());
                }
                result
            }
            Some(Err(_)) => {
                warn!("biometric evaluation reply dropped");
                AuthenticationResult::with_error(Status::UnknownError, REPLY_DROPPED)
            }
            None => {
                debug!("biometric authentication cancelled by caller");
                lease.release();
                AuthenticationResult::with_error(Status::Canceled, CALLER_CANCELLED)
            }
        }
    }

    /// Run one authentication attempt if biometrics are available right now.
    ///
    /// Returns [`Status::NotAvailable`] without prompting otherwise.
    pub async fn authenticate_if_available(
        &mut self,
        request: &AuthenticationRequest,
        cancel: Option<&CancellationToken>,
    ) -> AuthenticationResult {
        match self.availability() {
            Availability::Available => self.authenticate(request, cancel).await,
            availability => AuthenticationResult::with_error(
                Status::NotAvailable,
                format!("Biometric authentication is unavailable: {availability:?}"),
            ),
        }
    }
}

impl<F: ContextFactory> fmt::Debug for BiometricAuthenticator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiometricAuthenticator")
            .field("capabilities", &self.capabilities)
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

fn create_context<F: ContextFactory>(
    factory: &F,
    capabilities: Capabilities,
) -> Option<F::Context> {
    if !capabilities.context {
        return None;
    }
    let context = factory.create();
    if context.is_none() {
        warn!("native authentication context could not be created");
    }
    context
}

/// Borrows the authenticator's context for one attempt.
///
/// Dropping the lease releases whatever context is left and installs a fresh one.
struct ContextLease<'a, F: ContextFactory> {
    slot: &'a mut Option<F::Context>,
    factory: &'a F,
    capabilities: Capabilities,
}

impl<F: ContextFactory> ContextLease<'_, F> {
    fn current(&self) -> Option<&F::Context> {
        self.slot.as_ref()
    }

    /// Invalidate and dispose the current context.
    fn release(&mut self) {
        if let Some(context) = self.slot.take() {
            if self.capabilities.invalidate {
                context.invalidate();
            }
            drop(context);
        }
    }
}

impl<F: ContextFactory> Drop for ContextLease<'_, F> {
    fn drop(&mut self) {
        self.release();
        *self.slot = create_context(self.factory, self.capabilities);
    }
}
