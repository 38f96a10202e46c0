//! State Store
//!
//! Persistent per-element value bags keyed by (window name, element
//! identity). Entries outlive the retained widgets they describe: a widget
//! deleted by a sweep and later recreated under the same identity finds its
//! previous values here. Entries go away only when their window is reclaimed.

use crate::foundation::value::Value;
use std::collections::HashMap;

/// Key of the cached bound value
pub const VALUE_KEY: &str = "value";

/// Key of a button's last observed pressed state
pub const PRESSED_KEY: &str = "pressed";

/// Persistent value bag for one element identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    values: HashMap<String, Value>,
    changed: bool,
}

impl ElementState {
    /// Stored value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store a value under a key
    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Whether the user changed the bound value since it was last reported
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Flag a user edit
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Read and clear the changed flag
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

/// All element states, grouped by window
#[derive(Debug, Default)]
pub struct StateStore {
    windows: HashMap<String, HashMap<String, ElementState>>,
}

impl StateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// State for an identity, created on first access
    pub fn entry(&mut self, window: &str, identity: &str) -> &mut ElementState {
        self.windows
            .entry(window.to_string())
            .or_default()
            .entry(identity.to_string())
            .or_default()
    }

    /// State for an identity, if it was ever accessed
    pub fn get(&self, window: &str, identity: &str) -> Option<&ElementState> {
        self.windows.get(window).and_then(|states| states.get(identity))
    }

    /// Drop every state owned by a window, returning how many were removed
    pub fn remove_window(&mut self, window: &str) -> usize {
        self.windows.remove(window).map_or(0, |states| states.len())
    }

    /// Keep only the windows for which `keep` returns true
    pub fn retain_windows(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.windows.retain(|name, _| keep(name));
    }

    /// Number of windows with at least one state entry
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of identities stored for a window
    pub fn state_count(&self, window: &str) -> usize {
        self.windows.get(window).map_or(0, HashMap::len)
    }
}
