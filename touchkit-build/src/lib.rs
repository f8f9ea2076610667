//! Shared build utilities for touchkit crates.
//!
//! Generates swift-bridge glue for a bridge module, compiles the crate's Swift helpers against it
//! and links the result together with the requested Apple frameworks.
//!
//! # Usage
//!
//! In your `build.rs`:
//!
//! ```ignore
//! use touchkit_build::{compile_swift, AppleSwiftConfig};
//!
//! fn main() {
//!     let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap();
//!
//!     if target_os == "ios" || target_os == "macos" {
//!         let config = AppleSwiftConfig::new("touchkit-biometric", "LocalAuthHelper")
//!             .swift_source("src/sys/apple/LocalAuth.swift")
//!             .framework("LocalAuthentication");
//!         compile_swift("src/sys/apple/mod.rs", &config);
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod apple;

pub use apple::{AppleSwiftConfig, compile_swift};
