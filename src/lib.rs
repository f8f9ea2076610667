//! # Touchkit
//!
//! Native device authentication for Rust applications.
//!
//! Touchkit wraps the operating system's biometric authentication service behind a small,
//! portable API: probe availability, prompt the user, and get back a normalized result.
//!
//! ## Features
//!
//! - `biometric`: Biometric authentication (`TouchID`, `FaceID`, `OpticID`). Enabled by default.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! touchkit = { version = "0.1", features = ["biometric"] }
//! ```
//!
//! ```ignore
//! use touchkit::biometric;
//!
//! async fn unlock() -> Result<(), biometric::BiometricError> {
//!     if biometric::is_available().await {
//!         biometric::authenticate("Unlock your notes").await?;
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "biometric")]
pub use touchkit_biometric as biometric;
