//! Follower hand-off.

use solo_term_channel::SharedChannel;
use solo_term_window::WindowActivator;
use tracing::{debug, info};

use crate::error::BrokerError;

/// Outcome of a follower's single hand-off attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOff {
    /// The leader's window was found and raised; the channel was not
    /// touched.
    WindowRaised,
    /// The signal flag was raised for the leader's next poll.
    SignalRaised,
    /// The guard mutex was momentarily busy; the request was dropped.
    Dropped,
}

/// Hand this launch over to the leader. Runs exactly once; the caller
/// exits afterwards regardless of the outcome.
///
/// Window activation takes precedence over the signal mechanism: it gives
/// immediate visible feedback and skips the leader's poll interval. Only
/// when no window is found is the flag raised, and only with a
/// zero-timeout mutex attempt. [`HandOff::Dropped`] is a best-effort miss,
/// not an error, and is never retried.
pub fn notify_leader(
    channel: &SharedChannel,
    activator: &dyn WindowActivator,
    window_key: &str,
) -> Result<HandOff, BrokerError> {
    if activator.activate_existing(window_key)? {
        info!(key = window_key, "raised existing leader window");
        return Ok(HandOff::WindowRaised);
    }

    if channel.try_raise_signal()? {
        info!("hand-off signal raised");
        Ok(HandOff::SignalRaised)
    } else {
        debug!("guard mutex busy, hand-off dropped");
        Ok(HandOff::Dropped)
    }
}
