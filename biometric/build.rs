//! Build script for touchkit-biometric.

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap();

    if target_os == "ios" || target_os == "macos" {
        use touchkit_build::AppleSwiftConfig;

        let config = AppleSwiftConfig::new("touchkit-biometric", "LocalAuthHelper")
            .swift_source("src/sys/apple/LocalAuth.swift")
            .framework("LocalAuthentication");

        touchkit_build::compile_swift("src/sys/apple/mod.rs", &config);
    }
}
