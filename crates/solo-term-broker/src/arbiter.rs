//! Identity resolution and role arbitration at startup.

use solo_term_channel::SharedChannel;
use solo_term_types::{ChannelNames, Identity};
use tracing::info;

use crate::config::Config;
use crate::error::BrokerError;

/// Resolve the identity this process coordinates under.
///
/// Uses the configured override when present, otherwise the OS account
/// name. There is no identity-less fallback: without an identity no valid
/// channel names exist, so failure here is fatal for the caller.
pub fn resolve_identity(config: &Config) -> Result<Identity, BrokerError> {
    let raw = match &config.identity.user {
        Some(user) => user.clone(),
        None => whoami::fallible::username().map_err(|e| BrokerError::Identity(e.to_string()))?,
    };
    Ok(Identity::from_raw(&raw))
}

/// Open the coordination channel for `identity` and thereby claim a role.
///
/// The role decision is delegated entirely to the OS-atomic create-vs-open
/// outcome inside [`SharedChannel::open`]; there is deliberately no further
/// arbitration logic here, and the role is never reassigned.
pub fn claim_role(identity: &Identity, region_size: usize) -> Result<SharedChannel, BrokerError> {
    let names = ChannelNames::for_identity(identity);
    let channel = SharedChannel::open(&names, region_size)?;
    info!(identity = %identity, role = %channel.role(), "role claimed");
    Ok(channel)
}
