//! Core broker for solo-term.
//!
//! Implements single-instance coordination: identity resolution, role
//! arbitration over the shared channel, the leader's recurring dispatch
//! loop, and the follower's one-shot hand-off.

pub mod arbiter;
pub mod config;
pub mod error;
pub mod follower;
pub mod leader;

pub use arbiter::{claim_role, resolve_identity};
pub use config::{load_config, Config};
pub use error::BrokerError;
pub use follower::{notify_leader, HandOff};
pub use leader::LeaderLoop;
