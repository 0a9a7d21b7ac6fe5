//! Cross-process coordination channel for solo-term.
//!
//! One [`SharedChannel`] pairs a fixed-size named shared memory region with
//! a named guard mutex. The create-vs-open outcome of the region is the sole,
//! race-free arbiter of the process [`Role`](solo_term_types::Role): the OS
//! guarantees named-object creation is atomic across processes, so the first
//! opener becomes the leader and every later opener a follower.
//!
//! Byte 0 of the region is the signal flag (0 idle, 1 pending). Followers
//! raise it with a zero-timeout mutex attempt; the leader polls it and clears
//! it under the mutex before dispatching.

pub mod error;
mod shm;

pub use error::ChannelError;
pub use shm::{SharedChannel, DEFAULT_REGION_SIZE};
