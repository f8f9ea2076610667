use touchkit_biometric::sim::{Reply, SimulatedDevice};
use touchkit_biometric::{
    AuthenticationRequest, Availability, BiometricAuthenticator, BiometricError, BiometricType,
    Capabilities, NativeError, NativeStatus, Status,
};

fn request() -> AuthenticationRequest {
    AuthenticationRequest::new("Unlock your vault").unwrap()
}

fn fail(status: NativeStatus, description: &str) -> Reply {
    Reply::Fail(NativeError::new(status, description))
}

#[tokio::test]
async fn success_has_no_message() {
    let device = SimulatedDevice::new();
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    let result = authenticator.authenticate(&request(), None).await;

    assert_eq!(result.status(), Status::Succeeded);
    assert_eq!(result.error_message(), None);
    assert!(result.is_authenticated());
    assert_eq!(device.evaluations()[0].reason, "Unlock your vault");
}

#[tokio::test]
async fn native_failures_are_mapped() {
    let cases = [
        (NativeStatus::AuthenticationFailed, "Retry limit exceeded.", Status::Failed),
        (NativeStatus::UserCancel, "Canceled by user.", Status::Canceled),
        (NativeStatus::UserFallback, "Fallback selected.", Status::FallbackRequested),
        (NativeStatus::BiometryLockout, "Biometry is locked out.", Status::TooManyAttempts),
        (NativeStatus::SystemCancel, "Canceled by system.", Status::UnknownError),
        (NativeStatus::Other(-4242), "Something new.", Status::UnknownError),
    ];

    let device = SimulatedDevice::new();
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    for (native, description, expected) in cases {
        device.push_reply(fail(native, description));
        let result = authenticator.authenticate(&request(), None).await;
        assert_eq!(result.status(), expected, "{native:?}");
        assert_eq!(result.error_message(), Some(description));
    }
}

#[tokio::test]
async fn every_attempt_gets_a_fresh_context() {
    let device = SimulatedDevice::new();
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    device.push_reply(fail(NativeStatus::AuthenticationFailed, "No match."));
    let first = authenticator.authenticate(&request(), None).await;
    let second = authenticator.authenticate(&request(), None).await;
    let third = authenticator.authenticate(&request(), None).await;

    assert_eq!(first.status(), Status::Failed);
    assert_eq!(second.status(), Status::Succeeded);
    assert_eq!(third.status(), Status::Succeeded);
    assert_eq!(device.reuse_attempts(), 0);

    let contexts: Vec<u64> = device.evaluations().iter().map(|e| e.context).collect();
    assert_eq!(contexts, vec![1, 2, 3]);
    assert_eq!(device.invalidated(), vec![1, 2, 3]);
    assert_eq!(device.disposed(), vec![1, 2, 3]);
    assert_eq!(device.created(), vec![1, 2, 3, 4]);
    assert_eq!(device.live(), 1);
}

#[tokio::test]
async fn contexts_are_disposed_without_invalidate_support() {
    let device = SimulatedDevice::new();
    let capabilities = Capabilities {
        invalidate: false,
        ..Capabilities::all()
    };
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory_with(capabilities));

    authenticator.authenticate(&request(), None).await;

    assert!(device.invalidated().is_empty());
    assert_eq!(device.disposed(), vec![1]);
    assert_eq!(device.live(), 1);
}

#[tokio::test]
async fn labels_follow_capabilities() {
    let device = SimulatedDevice::new();
    let request = request().with_fallback_title("Use Passcode").with_cancel_title("Not Now");

    let mut modern = BiometricAuthenticator::with_factory(device.factory());
    modern.authenticate(&request, None).await;

    let legacy_caps = Capabilities {
        cancel_title: false,
        ..Capabilities::all()
    };
    let mut legacy = BiometricAuthenticator::with_factory(device.factory_with(legacy_caps));
    legacy.authenticate(&request, None).await;

    let evaluations = device.evaluations();
    assert_eq!(evaluations[0].fallback_title.as_deref(), Some("Use Passcode"));
    assert_eq!(evaluations[0].cancel_title.as_deref(), Some("Not Now"));
    assert_eq!(evaluations[1].fallback_title.as_deref(), Some("Use Passcode"));
    assert_eq!(evaluations[1].cancel_title, None);
}

#[tokio::test]
async fn fallback_label_needs_capability() {
    let device = SimulatedDevice::new();
    let request = request().with_fallback_title("Use Passcode").with_cancel_title("Not Now");
    let capabilities = Capabilities {
        fallback_title: false,
        ..Capabilities::all()
    };
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory_with(capabilities));

    authenticator.authenticate(&request, None).await;

    let evaluation = &device.evaluations()[0];
    assert_eq!(evaluation.fallback_title, None);
    assert_eq!(evaluation.cancel_title.as_deref(), Some("Not Now"));
}

#[tokio::test]
async fn empty_fallback_label_reaches_the_context() {
    let device = SimulatedDevice::new();
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    authenticator
        .authenticate(&request().with_fallback_title(""), None)
        .await;

    assert_eq!(device.evaluations()[0].fallback_title.as_deref(), Some(""));
}

#[tokio::test]
async fn labels_are_left_alone_when_not_requested() {
    let device = SimulatedDevice::new();
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    authenticator.authenticate(&request(), None).await;

    let evaluation = &device.evaluations()[0];
    assert_eq!(evaluation.fallback_title, None);
    assert_eq!(evaluation.cancel_title, None);
}

#[tokio::test]
async fn dropped_reply_is_unknown_error() {
    let device = SimulatedDevice::new();
    device.push_reply(Reply::Abandon);
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    let result = authenticator.authenticate(&request(), None).await;

    assert_eq!(result.status(), Status::UnknownError);
    assert!(result.error_message().is_some());
    assert_eq!(
        authenticator.authenticate(&request(), None).await.status(),
        Status::Succeeded
    );
}

#[test]
fn availability_reports_native_reason() {
    let cases = [
        (NativeStatus::BiometryNotAvailable, Availability::NoSensor),
        (NativeStatus::BiometryNotEnrolled, Availability::NoFingerprint),
        (NativeStatus::PasscodeNotSet, Availability::NoFingerprint),
        (NativeStatus::BiometryLockout, Availability::Unknown),
        (NativeStatus::Other(-99), Availability::Unknown),
    ];

    let device = SimulatedDevice::new();
    let authenticator = BiometricAuthenticator::with_factory(device.factory());
    assert_eq!(authenticator.availability(), Availability::Available);
    assert!(authenticator.is_available());

    for (native, expected) in cases {
        device.set_unavailable(native, "unavailable");
        assert_eq!(authenticator.availability(), expected, "{native:?}");
        assert!(!authenticator.is_available());
    }

    device.set_available();
    assert_eq!(authenticator.availability(), Availability::Available);
    assert!(device.evaluations().is_empty());
}

#[test]
fn no_api_without_capability() {
    let device = SimulatedDevice::new();
    let authenticator =
        BiometricAuthenticator::with_factory(device.factory_with(Capabilities::none()));

    assert!(!authenticator.is_supported());
    assert_eq!(authenticator.availability(), Availability::NoApi);
    assert!(device.created().is_empty());
}

#[tokio::test]
async fn no_api_when_context_cannot_be_built() {
    let device = SimulatedDevice::new();
    device.refuse_contexts(true);
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    assert_eq!(authenticator.availability(), Availability::NoApi);

    let result = authenticator.authenticate(&request(), None).await;
    assert_eq!(result.status(), Status::NotAvailable);
    assert!(device.evaluations().is_empty());

    device.refuse_contexts(false);
    authenticator.authenticate(&request(), None).await;
    assert_eq!(authenticator.availability(), Availability::Available);
}

#[tokio::test]
async fn checked_attempt_skips_prompt_when_unavailable() {
    let device = SimulatedDevice::new();
    device.set_unavailable(NativeStatus::BiometryNotEnrolled, "No identities are enrolled.");
    let mut authenticator = BiometricAuthenticator::with_factory(device.factory());

    let result = authenticator.authenticate_if_available(&request(), None).await;

    assert_eq!(result.status(), Status::NotAvailable);
    assert!(device.evaluations().is_empty());
    assert!(matches!(result.into_result(), Err(BiometricError::NotAvailable)));

    device.set_available();
    let result = authenticator.authenticate_if_available(&request(), None).await;
    assert!(result.into_result().is_ok());
}

#[test]
fn biometric_type_requires_capability() {
    let device = SimulatedDevice::new();
    let modern = BiometricAuthenticator::with_factory(device.factory());
    assert_eq!(modern.biometric_type(), Some(BiometricType::Face));

    device.set_biometry(Some(BiometricType::Fingerprint));
    assert_eq!(modern.biometric_type(), Some(BiometricType::Fingerprint));

    device.set_biometry(None);
    assert_eq!(modern.biometric_type(), None);

    device.set_biometry(Some(BiometricType::Face));
    let legacy = BiometricAuthenticator::with_factory(device.factory_with(Capabilities {
        biometry_type: false,
        ..Capabilities::all()
    }));
    assert_eq!(legacy.biometric_type(), None);
}
