//! Frame Context Manager
//!
//! A frame context is one independent declaration pass per engine tick, for
//! example a variable-rate update followed by a fixed-rate update. Contexts
//! never nest: exactly one may be open at a time.
//!
//! Ordinal counters live per (context, window) so two passes redeclaring the
//! same window do not disturb each other's identities, while the windows and
//! their widgets are shared by all contexts.

use super::error::UiError;
use crate::tree::WidgetId;
use std::collections::{HashMap, HashSet};

/// Counter table of one window: scope key -> next ordinal
type OrdinalTable = HashMap<String, u32>;

/// One declaration cycle's bookkeeping
#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    name: String,
    active_windows: HashSet<String>,
    counters: HashMap<String, OrdinalTable>,
    scene: Option<WidgetId>,
}

impl FrameContext {
    /// Create an empty context
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Context name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host scene new windows are attached to
    pub fn scene(&self) -> Option<WidgetId> {
        self.scene
    }

    /// Windows declared during the current (or last) cycle
    pub fn active_windows(&self) -> &HashSet<String> {
        &self.active_windows
    }

    /// Whether a window was declared during the current cycle
    pub fn is_active(&self, window: &str) -> bool {
        self.active_windows.contains(window)
    }

    /// Record a window as declared this cycle
    pub fn mark_active(&mut self, window: &str) {
        if !self.active_windows.contains(window) {
            self.active_windows.insert(window.to_string());
        }
    }

    /// Reset the ordinal counters of a window (called on every `begin`)
    pub fn reset_window_counters(&mut self, window: &str) {
        self.counters.entry(window.to_string()).or_default().clear();
    }

    /// Read then increment the ordinal for a scope key inside a window
    pub fn next_ordinal(&mut self, window: &str, scope_key: &str) -> u32 {
        let table = self.counters.entry(window.to_string()).or_default();
        let counter = table.entry(scope_key.to_string()).or_insert(0);
        let ordinal = *counter;
        *counter += 1;
        ordinal
    }

    /// Next ordinal for a scope key without consuming it
    pub fn peek_ordinal(&self, window: &str, scope_key: &str) -> u32 {
        self.counters
            .get(window)
            .and_then(|table| table.get(scope_key))
            .copied()
            .unwrap_or(0)
    }

    /// Drop everything this context knows about a window
    pub fn forget_window(&mut self, window: &str) {
        self.active_windows.remove(window);
        self.counters.remove(window);
    }

    fn begin_cycle(&mut self, scene: Option<WidgetId>) {
        self.active_windows.clear();
        self.scene = scene;
    }
}

/// Tracks all known contexts and which one is current
#[derive(Debug, Default)]
pub struct ContextManager {
    contexts: HashMap<String, FrameContext>,
    current: Option<String>,
}

impl ContextManager {
    /// Create a manager with no contexts
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a context for a new declaration cycle
    ///
    /// Clears the context's active-window set and remembers the host scene.
    pub fn open(&mut self, name: &str, scene: Option<WidgetId>) -> Result<(), UiError> {
        if name.is_empty() {
            return Err(UiError::EmptyContextName);
        }
        if let Some(open) = &self.current {
            return Err(UiError::ContextAlreadyOpen {
                open: open.clone(),
                requested: name.to_string(),
            });
        }

        self.contexts
            .entry(name.to_string())
            .or_insert_with(|| FrameContext::new(name))
            .begin_cycle(scene);
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Close the current context
    ///
    /// Closing when nothing is open is accepted; closing under the wrong
    /// name is rejected and leaves the open context in place.
    pub fn close(&mut self, name: &str) -> Result<(), UiError> {
        match &self.current {
            None => {
                log::debug!("close of frame context \"{}\" with none open", name);
                Ok(())
            }
            Some(open) if open != name => Err(UiError::ContextMismatch {
                expected: open.clone(),
                found: name.to_string(),
            }),
            Some(_) => {
                self.current = None;
                Ok(())
            }
        }
    }

    /// Name of the open context
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The open context
    pub fn current(&self) -> Option<&FrameContext> {
        self.current.as_ref().and_then(|name| self.contexts.get(name))
    }

    /// The open context, mutably
    pub fn current_mut(&mut self) -> Option<&mut FrameContext> {
        let name = self.current.as_ref()?;
        self.contexts.get_mut(name)
    }

    /// A known context by name
    pub fn get(&self, name: &str) -> Option<&FrameContext> {
        self.contexts.get(name)
    }

    /// Union of the active-window sets of every known context
    pub fn active_union(&self) -> HashSet<String> {
        self.contexts
            .values()
            .flat_map(|context| context.active_windows.iter().cloned())
            .collect()
    }

    /// Forget a reclaimed window in every context
    pub fn forget_window(&mut self, window: &str) {
        for context in self.contexts.values_mut() {
            context.forget_window(window);
        }
    }
}
