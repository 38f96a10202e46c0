//! Immediate-mode session
//!
//! Owns the retained tree and every registry the reconciliation core needs.
//! One session per application, driven from a single thread: contexts are
//! opened and closed in sequence, windows are begun and ended inside them,
//! and controls are declared between `begin` and `end`.

use super::context::ContextManager;
use super::error::UiError;
use super::identity::{self, IdStack};
use super::state::{ElementState, StateStore};
use super::stats::SessionStats;
use super::window::{Window, WindowFlags, WindowRegistry};
use crate::config::SessionConfig;
use crate::foundation::value::Value;
use crate::tree::{WidgetId, WidgetKind, WidgetProperty, WidgetTree};

/// Window currently being declared
#[derive(Debug, Clone)]
pub(crate) struct CurrentWindow {
    pub(crate) name: String,
    pub(crate) content: WidgetId,
}

/// Immediate-mode session over a retained widget tree
pub struct Session<T: WidgetTree> {
    pub(crate) tree: T,
    pub(crate) config: SessionConfig,
    pub(crate) contexts: ContextManager,
    pub(crate) windows: WindowRegistry,
    pub(crate) states: StateStore,
    pub(crate) current_window: Option<CurrentWindow>,
    pub(crate) id_stack: IdStack,
    pub(crate) stats: SessionStats,
}

impl<T: WidgetTree> Session<T> {
    /// Create a session with the default configuration
    pub fn new(tree: T) -> Self {
        Self::with_config(tree, SessionConfig::default())
    }

    /// Create a session with a custom configuration
    pub fn with_config(tree: T, config: SessionConfig) -> Self {
        Self {
            tree,
            config,
            contexts: ContextManager::new(),
            windows: WindowRegistry::new(),
            states: StateStore::new(),
            current_window: None,
            id_stack: IdStack::default(),
            stats: SessionStats::default(),
        }
    }

    /// The retained tree
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// The retained tree, mutably (hosts feed input through this)
    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    /// Consume the session, returning the tree
    pub fn into_tree(self) -> T {
        self.tree
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Bookkeeping counters
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    // ---------------------------------------------------------------------
    // Frame contexts
    // ---------------------------------------------------------------------

    /// Open a frame context; logs and does nothing on misuse
    pub fn open_frame(&mut self, context: &str, scene: Option<WidgetId>) {
        if let Err(e) = self.try_open_frame(context, scene) {
            log::error!("open_frame: {}", e);
        }
    }

    /// Open a frame context
    pub fn try_open_frame(
        &mut self,
        context: &str,
        scene: Option<WidgetId>,
    ) -> Result<(), UiError> {
        self.contexts.open(context, scene)?;
        if let Some(stale) = self.current_window.take() {
            log::warn!("Window \"{}\" was never ended; dropping it", stale.name);
        }
        self.id_stack.clear();
        log::trace!("Opened frame context \"{}\"", context);
        Ok(())
    }

    /// Close a frame context; logs and does nothing on misuse
    pub fn close_frame(&mut self, context: &str) {
        if let Err(e) = self.try_close_frame(context) {
            log::error!("close_frame: {}", e);
        }
    }

    /// Close a frame context
    pub fn try_close_frame(&mut self, context: &str) -> Result<(), UiError> {
        self.contexts.close(context)?;
        if let Some(stale) = self.current_window.take() {
            log::warn!(
                "Frame context \"{}\" closed while window \"{}\" is still open",
                context,
                stale.name
            );
        }
        self.id_stack.clear();
        Ok(())
    }

    /// Name of the open frame context
    pub fn current_context(&self) -> Option<&str> {
        self.contexts.current_name()
    }

    // ---------------------------------------------------------------------
    // Windows
    // ---------------------------------------------------------------------

    /// Begin declaring a window
    ///
    /// Returns false when `open` is false, when the user closed the window
    /// (in which case `open` is cleared), or on a sequencing error. Controls
    /// must only be declared, and `end` only called, when this returns true.
    pub fn begin(&mut self, name: &str, open: &mut bool, flags: WindowFlags) -> bool {
        match self.try_begin(name, open, flags) {
            Ok(begun) => begun,
            Err(e) => {
                log::error!("begin(\"{}\"): {}", name, e);
                false
            }
        }
    }

    /// Begin declaring a window, reporting why it failed
    pub fn try_begin(
        &mut self,
        name: &str,
        open: &mut bool,
        flags: WindowFlags,
    ) -> Result<bool, UiError> {
        if !*open {
            return Ok(false);
        }
        if self.contexts.current().is_none() {
            return Err(UiError::NoOpenContext);
        }
        if let Some(stale) = self.current_window.take() {
            log::warn!(
                "begin(\"{}\") while window \"{}\" is still open; dropping it without a sweep",
                name,
                stale.name
            );
        }

        self.windows.purge_invalid(name, &mut self.tree);

        if let Some(window) = self.windows.get(name) {
            if self.tree.value(window.widget) == Some(Value::Bool(false)) {
                log::debug!("Window \"{}\" was closed by the user", name);
                let widget = window.widget;
                self.tree.set_value(widget, Value::Bool(true))?;
                self.tree.set_visible(widget, false)?;
                *open = false;
                return Ok(false);
            }
        }

        if let Some(context) = self.contexts.current_mut() {
            context.mark_active(name);
        }

        let content = match self.windows.get(name) {
            Some(_) => self.reuse_window(name)?,
            None => self.create_window(name, flags)?,
        };

        if let Some(context) = self.contexts.current_mut() {
            context.reset_window_counters(name);
        }
        self.id_stack.reset(name);
        self.current_window = Some(CurrentWindow {
            name: name.to_string(),
            content,
        });
        Ok(true)
    }

    fn reuse_window(&mut self, name: &str) -> Result<WidgetId, UiError> {
        let widget = self
            .windows
            .get(name)
            .map(|window| window.widget)
            .ok_or(UiError::NoOpenWindow)?;
        let Some(content) = self.tree.find_child_by_tag(widget, &self.config.content_tag) else {
            // Drop the broken window so the next begin starts fresh
            self.windows.remove(name);
            self.tree.delete(widget);
            return Err(UiError::MissingContentContainer(name.to_string()));
        };

        self.tree.set_visible(widget, true)?;
        if let Some(window) = self.windows.get_mut(name) {
            window.content = content;
            window.hide_elements(&mut self.tree);
        }
        Ok(content)
    }

    fn create_window(&mut self, name: &str, flags: WindowFlags) -> Result<WidgetId, UiError> {
        let scene = self
            .contexts
            .current()
            .and_then(|context| context.scene())
            .filter(|scene| self.tree.is_valid(*scene));

        let widget = self.tree.create(WidgetKind::Window, scene)?;
        match self.build_window(widget, name, flags) {
            Ok(content) => {
                log::debug!("Created window \"{}\"", name);
                self.windows.insert(Window::new(name, widget, content));
                self.stats.window_count = self.windows.len();
                Ok(content)
            }
            Err(e) => {
                self.tree.delete(widget);
                Err(e)
            }
        }
    }

    fn build_window(
        &mut self,
        widget: WidgetId,
        name: &str,
        flags: WindowFlags,
    ) -> Result<WidgetId, UiError> {
        self.tree.set_tag(widget, name)?;
        self.tree.set_property(widget, WidgetProperty::Text(name.to_string()))?;
        for property in flags.properties() {
            self.tree.set_property(widget, property)?;
        }
        let (width, height) = self.config.default_window_size;
        self.tree.set_property(widget, WidgetProperty::Size(width, height))?;

        let content = self.tree.create(WidgetKind::Content, Some(widget))?;
        self.tree.set_tag(content, &self.config.content_tag)?;

        if self.config.focus_new_windows {
            self.tree.focus(widget)?;
        }
        Ok(content)
    }

    /// Finish declaring the current window; logs on misuse
    pub fn end(&mut self) {
        if let Err(e) = self.try_end() {
            log::error!("end: {}", e);
        }
    }

    /// Finish declaring the current window, sweeping untouched elements
    pub fn try_end(&mut self) -> Result<(), UiError> {
        let current = self.current_window.take().ok_or(UiError::NoOpenWindow)?;
        self.id_stack.clear();
        self.sweep_window(&current.name);
        Ok(())
    }

    /// Name of the window currently being declared
    pub fn current_window(&self) -> Option<&str> {
        self.current_window.as_ref().map(|current| current.name.as_str())
    }

    // ---------------------------------------------------------------------
    // Identity
    // ---------------------------------------------------------------------

    /// Open a nested identity scope
    pub fn push_id(&mut self, segment: impl Into<String>) {
        self.id_stack.push(segment);
    }

    /// Close the innermost identity scope; harmless when none is open
    pub fn pop_id(&mut self) {
        if self.id_stack.pop().is_none() {
            log::trace!("pop_id with no pushed scope");
        }
    }

    /// Identity the next control of `kind` would receive, consuming its ordinal
    ///
    /// `label` only shows up in trace output. Returns `None` (after logging)
    /// when no context or window is open; callers must then skip the
    /// declaration.
    pub fn generate_id(&mut self, kind: WidgetKind, label: &str) -> Option<String> {
        match self.try_generate_id(kind, label) {
            Ok(identity) => Some(identity),
            Err(e) => {
                log::error!("generate_id({}, \"{}\"): {}", kind.name(), label, e);
                None
            }
        }
    }

    /// Identity the next control of `kind` would receive
    pub fn try_generate_id(&mut self, kind: WidgetKind, label: &str) -> Result<String, UiError> {
        let window = self
            .current_window
            .as_ref()
            .map(|current| current.name.as_str())
            .ok_or(UiError::NoOpenWindow)?;
        let context = self.contexts.current_mut().ok_or(UiError::NoOpenContext)?;

        let separator = self.config.id_separator;
        let scope = self.id_stack.path(separator);
        let key = identity::scope_key(&scope, kind, separator);
        let ordinal = context.next_ordinal(window, &key);
        let identity = identity::compose(&scope, kind, ordinal, separator);
        log::trace!("{} \"{}\" -> {}", kind.name(), label, identity);
        Ok(identity)
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Names of all registered windows, sorted
    pub fn window_names(&self) -> Vec<String> {
        self.windows.names()
    }

    /// Whether a window is registered
    pub fn has_window(&self, name: &str) -> bool {
        self.windows.contains(name)
    }

    /// Retained widget of a registered window
    pub fn window_widget(&self, name: &str) -> Option<WidgetId> {
        self.windows.get(name).map(|window| window.widget)
    }

    /// Number of elements tracked for a window
    pub fn element_count(&self, window: &str) -> usize {
        self.windows.get(window).map_or(0, |window| window.elements.len())
    }

    /// Retained widget tracked under an identity
    pub fn element_widget(&self, window: &str, identity: &str) -> Option<WidgetId> {
        let window = self.windows.get(window)?;
        window
            .find_element(identity)
            .map(|index| window.elements[index].widget)
    }

    /// Persisted state of an element
    pub fn element_state(&self, window: &str, identity: &str) -> Option<&ElementState> {
        self.states.get(window, identity)
    }

    pub(crate) fn refresh_counts(&mut self) {
        self.stats.window_count = self.windows.len();
        self.stats.element_count = self.windows.element_count();
    }
}
