//! A scriptable in-process backend.
//!
//! [`SimulatedDevice`] stands in for the platform authentication service so applications (and
//! this crate) can exercise every authentication outcome without a sensor. It records the
//! lifecycle of every context it hands out.
//!
//! ```ignore
//! let device = SimulatedDevice::new();
//! device.push_reply(Reply::Fail(NativeError::new(NativeStatus::BiometryLockout, "Locked out")));
//!
//! let mut authenticator = BiometricAuthenticator::with_factory(device.factory());
//! let result = authenticator.authenticate(&request, None).await;
//! assert_eq!(result.status(), Status::TooManyAttempts);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::{
    BiometricType, Capabilities, ContextFactory, EvaluationOutcome, EvaluationReply,
    NativeContext, NativeError, NativeStatus,
};

/// How the simulated service answers the next evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Authenticate the user.
    Succeed,
    /// Fail with the given native error.
    Fail(NativeError),
    /// Never answer until the context is invalidated, then report an app cancel.
    Hold,
    /// Drop the reply channel without answering.
    Abandon,
}

/// One recorded policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The context that was evaluated.
    pub context: u64,
    /// The reason shown in the prompt.
    pub reason: String,
    /// The fallback label in effect.
    pub fallback_title: Option<String>,
    /// The cancel label in effect.
    pub cancel_title: Option<String>,
}

#[derive(Debug)]
struct DeviceState {
    next_id: u64,
    refuse_contexts: bool,
    policy: Result<(), NativeError>,
    biometry: Option<BiometricType>,
    replies: VecDeque<Reply>,
    created: Vec<u64>,
    invalidated: Vec<u64>,
    disposed: Vec<u64>,
    evaluations: Vec<Evaluation>,
    reuse_attempts: usize,
}

/// A simulated biometric device. Clones share the same state.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl SimulatedDevice {
    /// A device with enrolled face biometry that authenticates every request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState {
                next_id: 1,
                refuse_contexts: false,
                policy: Ok(()),
                biometry: Some(BiometricType::Face),
                replies: VecDeque::new(),
                created: Vec::new(),
                invalidated: Vec::new(),
                disposed: Vec::new(),
                evaluations: Vec::new(),
                reuse_attempts: 0,
            })),
        }
    }

    /// A factory backed by this device with every capability present.
    #[must_use]
    pub fn factory(&self) -> SimulatedFactory {
        self.factory_with(Capabilities::all())
    }

    /// A factory backed by this device reporting `capabilities`.
    #[must_use]
    pub fn factory_with(&self, capabilities: Capabilities) -> SimulatedFactory {
        SimulatedFactory {
            device: self.clone(),
            capabilities,
        }
    }

    fn state(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the answer to a future evaluation. With an empty queue evaluations succeed.
    pub fn push_reply(&self, reply: Reply) {
        self.state().replies.push_back(reply);
    }

    /// Make the biometric policy unevaluable with `status`.
    pub fn set_unavailable(&self, status: NativeStatus, description: impl Into<String>) {
        self.state().policy = Err(NativeError::new(status, description));
    }

    /// Make the biometric policy evaluable again.
    pub fn set_available(&self) {
        self.state().policy = Ok(());
    }

    /// Set the biometry the device reports.
    pub fn set_biometry(&self, biometry: Option<BiometricType>) {
        self.state().biometry = biometry;
    }

    /// Refuse to construct contexts, as a platform without the authentication API would.
    pub fn refuse_contexts(&self, refuse: bool) {
        self.state().refuse_contexts = refuse;
    }

    /// Identifiers of every context created, in order.
    #[must_use]
    pub fn created(&self) -> Vec<u64> {
        self.state().created.clone()
    }

    /// Identifiers of every context invalidated, in order.
    #[must_use]
    pub fn invalidated(&self) -> Vec<u64> {
        self.state().invalidated.clone()
    }

    /// Identifiers of every context disposed, in order.
    #[must_use]
    pub fn disposed(&self) -> Vec<u64> {
        self.state().disposed.clone()
    }

    /// Number of contexts created but not yet disposed.
    #[must_use]
    pub fn live(&self) -> usize {
        let state = self.state();
        state.created.len() - state.disposed.len()
    }

    /// Every evaluation performed, in order.
    #[must_use]
    pub fn evaluations(&self) -> Vec<Evaluation> {
        self.state().evaluations.clone()
    }

    /// How many times a context was evaluated after it had been used or invalidated.
    #[must_use]
    pub fn reuse_attempts(&self) -> usize {
        self.state().reuse_attempts
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out [`SimulatedContext`]s for a [`SimulatedDevice`].
#[derive(Debug, Clone)]
pub struct SimulatedFactory {
    device: SimulatedDevice,
    capabilities: Capabilities,
}

impl ContextFactory for SimulatedFactory {
    type Context = SimulatedContext;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create(&self) -> Option<SimulatedContext> {
        let mut state = self.device.state();
        if state.refuse_contexts {
            return None;
        }
        let id = state.next_id;
        state.next_id += 1;
        state.created.push(id);
        Some(SimulatedContext {
            id,
            device: self.device.clone(),
            used: AtomicBool::new(false),
            invalidated: AtomicBool::new(false),
            fallback_title: Mutex::new(None),
            cancel_title: Mutex::new(None),
            held: Mutex::new(None),
        })
    }
}

/// A one-shot context on a [`SimulatedDevice`].
#[derive(Debug)]
pub struct SimulatedContext {
    id: u64,
    device: SimulatedDevice,
    used: AtomicBool,
    invalidated: AtomicBool,
    fallback_title: Mutex<Option<String>>,
    cancel_title: Mutex<Option<String>>,
    held: Mutex<Option<oneshot::Sender<EvaluationOutcome>>>,
}

impl SimulatedContext {
    /// The identifier recorded by the device.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NativeContext for SimulatedContext {
    fn can_evaluate(&self) -> Result<(), NativeError> {
        if self.invalidated.load(Ordering::SeqCst) {
            return Err(NativeError::new(
                NativeStatus::InvalidContext,
                "Context was invalidated.",
            ));
        }
        self.device.state().policy.clone()
    }

    fn set_fallback_title(&self, title: &str) {
        *lock(&self.fallback_title) = Some(title.to_owned());
    }

    fn set_cancel_title(&self, title: &str) {
        *lock(&self.cancel_title) = Some(title.to_owned());
    }

    fn evaluate(&self, reason: &str) -> EvaluationReply {
        let (sender, receiver) = oneshot::channel();
        let mut state = self.device.state();

        let reused = self.used.swap(true, Ordering::SeqCst);
        if reused || self.invalidated.load(Ordering::SeqCst) {
            state.reuse_attempts += 1;
            let _ = sender.send(Err(NativeError::new(
                NativeStatus::InvalidContext,
                "Context has already been used or invalidated.",
            )));
            return receiver;
        }

        state.evaluations.push(Evaluation {
            context: self.id,
            reason: reason.to_owned(),
            fallback_title: lock(&self.fallback_title).clone(),
            cancel_title: lock(&self.cancel_title).clone(),
        });

        if let Err(error) = &state.policy {
            let _ = sender.send(Err(error.clone()));
            return receiver;
        }

        match state.replies.pop_front().unwrap_or(Reply::Succeed) {
            Reply::Succeed => {
                let _ = sender.send(Ok(()));
            }
            Reply::Fail(error) => {
                let _ = sender.send(Err(error));
            }
            Reply::Hold => *lock(&self.held) = Some(sender),
            Reply::Abandon => drop(sender),
        }
        receiver
    }

    fn biometry_type(&self) -> Option<BiometricType> {
        self.device.state().biometry
    }

    fn invalidate(&self) {
        self.invalidated.store(true, Ordering::SeqCst);
        self.device.state().invalidated.push(self.id);
        if let Some(sender) = lock(&self.held).take() {
            let _ = sender.send(Err(NativeError::new(
                NativeStatus::AppCancel,
                "Authentication was canceled by application.",
            )));
        }
    }
}

impl Drop for SimulatedContext {
    fn drop(&mut self) {
        self.device.state().disposed.push(self.id);
    }
}
