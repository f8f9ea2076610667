use crate::BiometricError;

/// What to show the user for one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    reason: String,
    fallback_title: Option<String>,
    cancel_title: Option<String>,
}

impl AuthenticationRequest {
    /// Create a request with the reason shown in the system prompt.
    ///
    /// # Errors
    /// Returns [`BiometricError::InvalidRequest`] if `reason` is empty or whitespace.
    pub fn new(reason: impl Into<String>) -> Result<Self, BiometricError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(BiometricError::InvalidRequest("reason cannot be empty".into()));
        }
        Ok(Self {
            reason,
            fallback_title: None,
            cancel_title: None,
        })
    }

    /// Set the label of the fallback button. An empty title hides the button.
    #[must_use]
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = Some(title.into());
        self
    }

    /// Set the label of the cancel button.
    #[must_use]
    pub fn with_cancel_title(mut self, title: impl Into<String>) -> Self {
        self.cancel_title = Some(title.into());
        self
    }

    /// The reason shown to the user.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The fallback button label override.
    #[must_use]
    pub fn fallback_title(&self) -> Option<&str> {
        self.fallback_title.as_deref()
    }

    /// The cancel button label override.
    #[must_use]
    pub fn cancel_title(&self) -> Option<&str> {
        self.cancel_title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reason_is_rejected() {
        assert!(matches!(
            AuthenticationRequest::new("   "),
            Err(BiometricError::InvalidRequest(_))
        ));
        assert!(AuthenticationRequest::new("").is_err());
    }

    #[test]
    fn labels_default_to_platform() {
        let request = AuthenticationRequest::new("Unlock").unwrap();
        assert_eq!(request.reason(), "Unlock");
        assert_eq!(request.fallback_title(), None);
        assert_eq!(request.cancel_title(), None);
    }

    #[test]
    fn empty_fallback_title_is_kept() {
        let request = AuthenticationRequest::new("Unlock")
            .unwrap()
            .with_fallback_title("")
            .with_cancel_title("Not now");
        assert_eq!(request.fallback_title(), Some(""));
        assert_eq!(request.cancel_title(), Some("Not now"));
    }
}
