use touchkit_biometric::{
    self as biometric, AuthenticationRequest, Availability, BiometricAuthenticator,
};

#[tokio::main]
async fn main() {
    let mut authenticator = BiometricAuthenticator::new();
    println!("Capabilities: {:?}", authenticator.capabilities());

    let availability = authenticator.availability();
    println!("Availability: {availability:?}");

    if availability != Availability::Available {
        println!("Biometrics not available on this machine.");
        return;
    }

    if let Some(bio_type) = authenticator.biometric_type() {
        println!("Biometric type: {bio_type:?}");
    }

    let request = AuthenticationRequest::new("Test authentication from Rust")
        .expect("reason is not empty")
        .with_fallback_title("")
        .with_cancel_title("Skip");

    for attempt in 1..=2 {
        println!("Requesting authentication (attempt {attempt})...");
        let result = authenticator.authenticate(&request, None).await;
        match result.error_message() {
            None => println!("✅ {:?}", result.status()),
            Some(message) => println!("❌ {:?}: {message}", result.status()),
        }
    }

    println!("Requesting authentication through the shared authenticator...");
    match biometric::authenticate("Test shared authenticator from Rust").await {
        Ok(()) => println!("✅ Authentication SUCCESS!"),
        Err(e) => println!("❌ Authentication FAILED: {e}"),
    }
}
