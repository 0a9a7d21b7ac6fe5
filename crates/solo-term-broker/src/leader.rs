//! Leader dispatch loop.

use std::time::Duration;

use solo_term_channel::SharedChannel;
use solo_term_window::SessionFactory;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::BrokerError;

/// The leader's recurring, non-blocking dispatch task.
///
/// Polls the signal flag at a fixed interval on the interactive scheduling
/// thread. Each tick is synchronous and bounded: the only wait it may
/// perform is the guard-mutex acquisition inside
/// [`SharedChannel::try_clear_signal`], taken only after an unsynchronized
/// peek indicated pending work.
pub struct LeaderLoop {
    channel: SharedChannel,
    sessions: Box<dyn SessionFactory>,
    interval: Duration,
}

impl LeaderLoop {
    /// Create the loop over an owned channel. The channel must have been
    /// opened with [`Role::Leader`](solo_term_types::Role::Leader).
    pub fn new(
        channel: SharedChannel,
        sessions: Box<dyn SessionFactory>,
        interval: Duration,
    ) -> Self {
        debug_assert!(channel.role().is_leader());
        Self {
            channel,
            sessions,
            interval,
        }
    }

    /// The channel this loop dispatches for.
    #[must_use]
    pub fn channel(&self) -> &SharedChannel {
        &self.channel
    }

    /// Create the leader's own first session, before the loop starts.
    pub fn create_initial_session(&mut self) -> Result<(), BrokerError> {
        self.sessions.create_session()?;
        Ok(())
    }

    /// One poll step. Returns `true` iff a session was dispatched.
    ///
    /// Cheap common case first: an unsynchronized peek of the flag, and an
    /// immediate return when nothing is pending. On a nonzero peek the flag
    /// is re-read and cleared under the mutex; if another acquisition got
    /// there first the tick is a no-op. A cleared flag dispatches exactly
    /// one session.
    pub fn tick(&mut self) -> Result<bool, BrokerError> {
        if self.channel.peek_signal() == 0 {
            return Ok(false);
        }
        if !self.channel.try_clear_signal()? {
            debug!("signal gone before clear, nothing to dispatch");
            return Ok(false);
        }
        info!("hand-off signal received, creating session");
        self.sessions.create_session()?;
        Ok(true)
    }

    /// Run the recurring task until `shutdown` fires.
    ///
    /// Stopping through `shutdown` is part of normal process teardown and
    /// happens before the channel handles are released (the channel is
    /// owned by `self` and dropped after the loop returns). Dispatch is
    /// synchronous, so no in-flight dispatch survives the stop.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), BrokerError> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval = ?self.interval, "dispatch loop running");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // A failed dispatch must not kill the leader; the flag
                    // was already consumed, so log and keep polling.
                    if let Err(e) = self.tick() {
                        warn!(error = %e, "dispatch tick failed");
                    }
                }
                _ = shutdown.changed() => {
                    info!("dispatch loop stopping");
                    break;
                }
            }
        }
        Ok(())
    }
}
