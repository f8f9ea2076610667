//! Fallback for platforms without a `LocalAuthentication` service.

use crate::{
    BiometricType, Capabilities, ContextFactory, EvaluationReply, NativeContext, NativeError,
};

/// A backend that never provides a context.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFactory;

/// Uninhabited: no context exists on this platform.
#[derive(Debug)]
pub enum UnsupportedContext {}

impl ContextFactory for UnsupportedFactory {
    type Context = UnsupportedContext;

    fn capabilities(&self) -> Capabilities {
        Capabilities::none()
    }

    fn create(&self) -> Option<UnsupportedContext> {
        None
    }
}

impl NativeContext for UnsupportedContext {
    fn can_evaluate(&self) -> Result<(), NativeError> {
        match *self {}
    }

    fn set_fallback_title(&self, _title: &str) {
        match *self {}
    }

    fn set_cancel_title(&self, _title: &str) {
        match *self {}
    }

    fn evaluate(&self, _reason: &str) -> EvaluationReply {
        match *self {}
    }

    fn biometry_type(&self) -> Option<BiometricType> {
        match *self {}
    }

    fn invalidate(&self) {
        match *self {}
    }
}
