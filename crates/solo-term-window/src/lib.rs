//! Window and session boundaries for solo-term.
//!
//! This crate defines the [`WindowActivator`] and [`SessionFactory`] traits
//! that platform-specific backends must implement. The native backends
//! (X11/Wayland, Win32 `FindWindow`/`SetForegroundWindow`) will be added in
//! later phases; the [`mock`] module provides in-process test backends.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::WindowError;

/// Well-known lookup key for the leader's primary interactive window.
pub const DEFAULT_WINDOW_KEY: &str = "SoloTerm_MainWindow";

/// Locates and raises an existing top-level window.
///
/// Used by a follower to hand focus to the leader's window directly, which
/// gives immediate visible feedback and skips the leader's poll interval.
pub trait WindowActivator: Send {
    /// Look up a top-level window by its well-known key and, if found,
    /// bring it to the foreground. Returns `true` iff a window was found
    /// and raised.
    fn activate_existing(&self, key: &str) -> Result<bool, WindowError>;
}

/// Creates a new interactive session in the leader process.
///
/// Invoked once per observed hand-off signal, and once at leader startup
/// for the leader's own launch request.
pub trait SessionFactory: Send {
    /// Open one new session. Must be synchronous and bounded: it runs on
    /// the leader's interactive scheduling thread.
    fn create_session(&mut self) -> Result<(), WindowError>;
}
