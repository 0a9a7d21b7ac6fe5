//! Process role.

use serde::{Deserialize, Serialize};

/// The role a process holds for its identity's coordination channel.
///
/// Assigned exactly once at startup from the create-vs-open outcome of the
/// shared region, never reassigned. At most one process per identity holds
/// `Leader` at any time; the OS guarantee that named-object creation is
/// atomic across processes is the sole arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// First opener of the region; owns the interactive session and
    /// services hand-off requests.
    Leader,
    /// Any later opener; forwards its request and exits.
    Follower,
}

impl Role {
    /// Whether this process is the leader.
    #[must_use]
    pub fn is_leader(self) -> bool {
        matches!(self, Role::Leader)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Leader => f.write_str("leader"),
            Role::Follower => f.write_str("follower"),
        }
    }
}
