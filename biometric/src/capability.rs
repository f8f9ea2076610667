//! Platform capability descriptor, resolved once from the OS version.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An operating system version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OsVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
}

impl OsVersion {
    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Apple operating systems that ship `LocalAuthentication`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplePlatform {
    /// iOS and iPadOS.
    Ios,
    /// macOS.
    MacOs,
}

/// Which parts of the native authentication API the running platform provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// An authentication context can be constructed at all.
    pub context: bool,
    /// The fallback button label can be overridden.
    pub fallback_title: bool,
    /// The cancel button label can be overridden.
    pub cancel_title: bool,
    /// A context can be explicitly invalidated.
    pub invalidate: bool,
    /// The kind of biometry can be queried.
    pub biometry_type: bool,
}

impl Capabilities {
    /// No authentication support.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            context: false,
            fallback_title: false,
            cancel_title: false,
            invalidate: false,
            biometry_type: false,
        }
    }

    /// Every capability present.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            context: true,
            fallback_title: true,
            cancel_title: true,
            invalidate: true,
            biometry_type: true,
        }
    }

    /// Resolve capabilities for an Apple platform release.
    ///
    /// The Swift helper is built for iOS 14 and macOS 12.3, where every capability is present.
    /// Rows for older releases apply to custom backends that run there.
    #[must_use]
    pub fn for_platform(platform: ApplePlatform, version: OsVersion) -> Self {
        let since = |major, minor, patch| version >= OsVersion::new(major, minor, patch);

        match platform {
            ApplePlatform::Ios => Self {
                context: since(8, 0, 0),
                fallback_title: since(8, 0, 0),
                cancel_title: since(10, 0, 0),
                invalidate: since(9, 0, 0),
                biometry_type: since(11, 0, 0),
            },
            ApplePlatform::MacOs => Self {
                context: since(10, 10, 0),
                fallback_title: since(10, 10, 0),
                cancel_title: since(10, 12, 0),
                invalidate: since(10, 11, 0),
                biometry_type: since(10, 13, 2),
            },
        }
    }
}
