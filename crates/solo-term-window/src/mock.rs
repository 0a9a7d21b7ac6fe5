//! Mock window and session backends for testing.

use std::sync::{Arc, Mutex};

use crate::error::WindowError;
use crate::{SessionFactory, WindowActivator};

// ---------------------------------------------------------------------------
// MockWindows
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockWindowsState {
    /// Keys of windows that currently "exist".
    windows: Vec<String>,
    /// Keys that were raised, in order.
    raised: Vec<String>,
}

/// Mock window registry for testing.
///
/// Tests register window keys up front; `activate_existing` reports a hit
/// for registered keys and records every raise for later observation.
pub struct MockWindows {
    state: Arc<Mutex<MockWindowsState>>,
}

impl Default for MockWindows {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWindows {
    /// Create an empty mock registry (no windows exist).
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockWindowsState::default())),
        }
    }

    /// Get a clonable handle for driving and observing the registry.
    pub fn handle(&self) -> MockWindowsHandle {
        MockWindowsHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockWindows`].
#[derive(Clone)]
pub struct MockWindowsHandle {
    state: Arc<Mutex<MockWindowsState>>,
}

impl MockWindowsHandle {
    /// Register a window key as existing.
    pub fn add_window(&self, key: &str) {
        self.state.lock().unwrap().windows.push(key.to_string());
    }

    /// Remove a window key.
    pub fn remove_window(&self, key: &str) {
        self.state.lock().unwrap().windows.retain(|w| w != key);
    }

    /// Get a snapshot of all raised window keys, in raise order.
    pub fn raised(&self) -> Vec<String> {
        self.state.lock().unwrap().raised.clone()
    }
}

impl WindowActivator for MockWindows {
    fn activate_existing(&self, key: &str) -> Result<bool, WindowError> {
        let mut state = self.state.lock().unwrap();
        if state.windows.iter().any(|w| w == key) {
            state.raised.push(key.to_string());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

// ---------------------------------------------------------------------------
// MockSessions
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MockSessionsState {
    created: usize,
    fail_next: bool,
}

/// Mock session factory for testing.
///
/// Counts how many sessions were created and can be told to fail the next
/// creation attempt.
pub struct MockSessions {
    state: Arc<Mutex<MockSessionsState>>,
}

impl Default for MockSessions {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSessions {
    /// Create a new mock session factory.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockSessionsState::default())),
        }
    }

    /// Get a clonable handle for observing the factory from tests.
    pub fn handle(&self) -> MockSessionsHandle {
        MockSessionsHandle {
            state: Arc::clone(&self.state),
        }
    }
}

/// Clonable observer handle for [`MockSessions`].
#[derive(Clone)]
pub struct MockSessionsHandle {
    state: Arc<Mutex<MockSessionsState>>,
}

impl MockSessionsHandle {
    /// How many sessions have been created.
    pub fn created(&self) -> usize {
        self.state.lock().unwrap().created
    }

    /// Make the next `create_session` call fail.
    pub fn fail_next(&self) {
        self.state.lock().unwrap().fail_next = true;
    }
}

impl SessionFactory for MockSessions {
    fn create_session(&mut self) -> Result<(), WindowError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next {
            state.fail_next = false;
            return Err(WindowError::SessionCreate("mock failure".to_string()));
        }
        state.created += 1;
        Ok(())
    }
}
