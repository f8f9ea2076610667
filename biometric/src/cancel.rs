//! Cooperative cancellation for authentication attempts.
//!
//! Cancellation is signalled by closing a channel, so any number of tokens observe it without
//! polling a flag.

use async_channel::{Receiver, Sender};

/// Owns the right to cancel an authentication attempt.
///
/// When this source is dropped or [`cancel()`](Self::cancel) is called, every
/// [`CancellationToken`] it handed out observes the cancellation.
///
/// # Example
///
/// ```ignore
/// let source = CancellationSource::new();
/// let token = source.token();
///
/// let attempt = authenticator.authenticate(&request, Some(&token));
/// // From elsewhere, e.g. when the screen is dismissed:
/// source.cancel();
/// ```
#[derive(Debug)]
pub struct CancellationSource {
    sender: Sender<()>,
    receiver: Receiver<()>,
}

impl CancellationSource {
    /// Create a source that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::bounded(1);
        Self { sender, receiver }
    }

    /// A token observing this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            receiver: self.receiver.clone(),
        }
    }

    /// Signal cancellation.
    ///
    /// This is automatically called on drop.
    pub fn cancel(&self) {
        self.sender.close();
    }

    /// Check if cancellation was signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.sender.is_closed()
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancellationSource {
    fn drop(&mut self) {
        self.sender.close();
    }
}

/// Observes a [`CancellationSource`].
#[derive(Debug, Clone)]
pub struct CancellationToken {
    receiver: Receiver<()>,
}

impl CancellationToken {
    /// Check if cancellation was signalled (non-blocking).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_closed()
    }

    /// Wait until cancellation is signalled.
    pub async fn cancelled(&self) {
        // Nothing is ever sent, so this only returns once the channel is closed.
        let _ = self.receiver.recv().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_source_is_not_cancelled() {
        let source = CancellationSource::new();
        assert!(!source.is_cancelled());
        assert!(!source.token().is_cancelled());
    }

    #[test]
    fn cancel_reaches_every_token() {
        let source = CancellationSource::new();
        let first = source.token();
        let second = first.clone();
        source.cancel();
        assert!(source.is_cancelled());
        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[test]
    fn dropping_the_source_cancels() {
        let source = CancellationSource::new();
        let token = source.token();
        drop(source);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_after_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        tokio::join!(token.cancelled(), async { source.cancel() });
        assert!(token.is_cancelled());
    }
}
