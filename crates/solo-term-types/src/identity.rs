//! User identity and channel name derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed prefix for the shared region name.
pub const SHARED_REGION_PREFIX: &str = "SoloTermSharedMem";

/// Fixed prefix for the guard mutex name.
pub const GUARD_MUTEX_PREFIX: &str = "SoloTermSharedMemMutex";

/// A sanitized per-user identity string.
///
/// Derived from the OS account name: alphanumeric characters are kept,
/// every other character is replaced with `_`, so the result is always
/// safe to embed in named OS objects. Computed once, immutable for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Sanitize a raw OS account name into an identity.
    ///
    /// Total: every input maps to exactly one identity, and the same
    /// input always maps to the same identity.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let sanitized = raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Self(sanitized)
    }

    /// The sanitized identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The name pair for one identity's coordination channel.
///
/// Two processes running under the same identity always compute the same
/// pair, which is what lets them find each other's region and mutex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelNames {
    /// Name of the shared memory region.
    pub region: String,
    /// Name of the paired guard mutex.
    pub mutex: String,
}

impl ChannelNames {
    /// Derive the region and mutex names for an identity.
    #[must_use]
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            region: format!("{SHARED_REGION_PREFIX}_{identity}"),
            mutex: format!("{GUARD_MUTEX_PREFIX}_{identity}"),
        }
    }
}
