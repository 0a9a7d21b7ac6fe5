//! Shared types for solo-term.
//!
//! This crate contains the types shared across the solo-term workspace:
//! the sanitized user [`Identity`], the [`ChannelNames`] derived from it,
//! and the process [`Role`] assigned at startup.

pub mod identity;
pub mod role;

pub use identity::{ChannelNames, Identity, GUARD_MUTEX_PREFIX, SHARED_REGION_PREFIX};
pub use role::Role;
