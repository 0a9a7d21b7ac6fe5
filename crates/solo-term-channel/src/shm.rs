//! Shared region and guard mutex.

use named_lock::NamedLock;
use shared_memory::{Shmem, ShmemConf, ShmemError};
use solo_term_types::{ChannelNames, Role};
use tracing::{debug, trace};

use crate::error::ChannelError;

/// Default size of the shared region in bytes.
///
/// Only byte 0 (the signal flag) is currently used; the rest is reserved.
pub const DEFAULT_REGION_SIZE: usize = 4096;

/// A coordination channel shared by every process under one identity.
///
/// Owns one OS mapping of the region and one handle to the guard mutex.
/// Both are released on drop: the region mapping is unmapped and its handle
/// closed before the mutex handle (field order). The underlying region is
/// destroyed by the OS once the last process holding it open exits; nothing
/// persists.
pub struct SharedChannel {
    // Declared before `mutex` so the mapping is torn down first on drop.
    region: Shmem,
    mutex: NamedLock,
    role: Role,
}

impl SharedChannel {
    /// Create or open the channel for the given names.
    ///
    /// Attempts to atomically create the named region of `size` bytes. If
    /// the region already existed, this process opens it instead and is a
    /// [`Role::Follower`]; otherwise it is the [`Role::Leader`] and the
    /// region is zero-filled. The guard mutex is created or opened
    /// idempotently; it plays no part in the role decision.
    ///
    /// Any failure here is fatal for the caller: there is no degraded mode
    /// in which the process can run without the channel.
    pub fn open(names: &ChannelNames, size: usize) -> Result<Self, ChannelError> {
        let mutex = NamedLock::create(&names.mutex).map_err(|source| ChannelError::Mutex {
            name: names.mutex.clone(),
            source,
        })?;

        let (region, role) = match ShmemConf::new().size(size).os_id(&names.region).create() {
            Ok(region) => (region, Role::Leader),
            Err(ShmemError::MappingIdExists) => {
                let region = ShmemConf::new().os_id(&names.region).open().map_err(|source| {
                    ChannelError::Region {
                        name: names.region.clone(),
                        source,
                    }
                })?;
                (region, Role::Follower)
            }
            Err(source) => {
                return Err(ChannelError::Region {
                    name: names.region.clone(),
                    source,
                })
            }
        };

        if region.len() == 0 {
            return Err(ChannelError::RegionTooSmall {
                name: names.region.clone(),
                size: region.len(),
            });
        }

        let channel = Self {
            region,
            mutex,
            role,
        };

        if role.is_leader() {
            // First opener: the mutex has not been released to anyone and
            // no other process can have written meaningful data yet.
            channel.zero_fill();
        }

        debug!(role = %role, region = %names.region, "opened coordination channel");
        Ok(channel)
    }

    /// The role assigned to this process by the create-vs-open outcome.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Size of the mapped region in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.region.len()
    }

    /// Unsynchronized, non-blocking read of the signal flag.
    ///
    /// May race with a concurrent raise and observe a stale 0; the flag is
    /// monotonic between a follower's set and the leader's clear, so the
    /// next poll observes it. Callers must treat a nonzero result as a hint
    /// and confirm with [`Self::try_clear_signal`].
    #[must_use]
    pub fn peek_signal(&self) -> u8 {
        // SAFETY: the mapping is valid for the lifetime of `self` and at
        // least one byte long (checked in `open`).
        unsafe { std::ptr::read_volatile(self.region.as_ptr()) }
    }

    /// Clear the signal flag if it is set, waiting on the mutex as long as
    /// it takes.
    ///
    /// Leader-only path, called after a nonzero peek, so contention is
    /// expected to be brief. Returns `true` if this call cleared a set
    /// flag, `false` if the flag was already 0 (cleared by an earlier
    /// acquisition; a no-op, not an error).
    pub fn try_clear_signal(&self) -> Result<bool, ChannelError> {
        let _guard = self.mutex.lock().map_err(ChannelError::Lock)?;
        let ptr = self.region.as_ptr();
        // SAFETY: as in `peek_signal`; writes are serialized by the guard.
        unsafe {
            if std::ptr::read_volatile(ptr) == 0 {
                trace!("signal already cleared");
                return Ok(false);
            }
            std::ptr::write_volatile(ptr, 0);
        }
        Ok(true)
    }

    /// Raise the signal flag without blocking.
    ///
    /// Follower-only path. Acquires the mutex with a zero timeout: if it is
    /// immediately available the flag is set and `true` returned; if it is
    /// held by anyone else, returns `false` at once, without retry. A
    /// `false` result means the request was dropped, by design.
    pub fn try_raise_signal(&self) -> Result<bool, ChannelError> {
        let guard = match self.mutex.try_lock() {
            Ok(guard) => guard,
            Err(named_lock::Error::WouldBlock) => {
                trace!("guard mutex busy, signal dropped");
                return Ok(false);
            }
            Err(source) => return Err(ChannelError::Lock(source)),
        };
        // SAFETY: as in `peek_signal`; writes are serialized by the guard.
        unsafe { std::ptr::write_volatile(self.region.as_ptr(), 1) };
        drop(guard);
        Ok(true)
    }

    fn zero_fill(&self) {
        // SAFETY: the mapping is valid and `len` is its exact size.
        unsafe { std::ptr::write_bytes(self.region.as_ptr(), 0, self.region.len()) };
    }
}

impl std::fmt::Debug for SharedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedChannel")
            .field("role", &self.role)
            .field("size", &self.region.len())
            .finish_non_exhaustive()
    }
}
