//! Window Registry
//!
//! Global table of named windows. Each window owns its retained widget, a
//! content sub-container and the list of elements declared inside it.

use crate::tree::{WidgetId, WidgetKind, WidgetProperty, WidgetTree};
use bitflags::bitflags;
use std::collections::HashMap;

bitflags! {
    /// Presentation toggles applied when a window's retained widget is created
    ///
    /// Each flag maps to exactly one [`WidgetProperty`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u32 {
        /// Hide the title bar
        const NO_TITLE_BAR = 1 << 0;
        /// Disable resizing
        const NO_RESIZE = 1 << 1;
        /// Disable dragging
        const NO_MOVE = 1 << 2;
        /// Swallow all input
        const NO_INPUTS = 1 << 3;
        /// Do not draw the background
        const NO_BACKGROUND = 1 << 4;
    }
}

impl WindowFlags {
    /// Retained-widget properties encoding these flags
    pub fn properties(self) -> [WidgetProperty; 5] {
        [
            WidgetProperty::TitleBar(!self.contains(Self::NO_TITLE_BAR)),
            WidgetProperty::Resizable(!self.contains(Self::NO_RESIZE)),
            WidgetProperty::Draggable(!self.contains(Self::NO_MOVE)),
            WidgetProperty::BlocksInput(self.contains(Self::NO_INPUTS)),
            WidgetProperty::Background(!self.contains(Self::NO_BACKGROUND)),
        ]
    }
}

/// One declared control's retained widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Identity assigned at declaration
    pub identity: String,
    /// Retained widget
    pub widget: WidgetId,
}

/// A named, long-lived retained container
#[derive(Debug, Clone)]
pub struct Window {
    /// Unique name (registry key)
    pub name: String,
    /// Retained window widget
    pub widget: WidgetId,
    /// Content sub-container controls are attached to
    pub content: WidgetId,
    /// Elements currently tracked for this window
    pub elements: Vec<Element>,
}

impl Window {
    /// Create a window entry for already constructed widgets
    pub fn new(name: impl Into<String>, widget: WidgetId, content: WidgetId) -> Self {
        Self {
            name: name.into(),
            widget,
            content,
            elements: Vec::new(),
        }
    }

    /// A window is usable while its widget exists and is still in the tree
    pub fn is_valid<T: WidgetTree + ?Sized>(&self, tree: &T) -> bool {
        tree.is_valid(self.widget) && tree.is_attached(self.widget)
    }

    /// Position of the element tracked under an identity
    pub fn find_element(&self, identity: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.identity == identity)
    }

    /// Hide every tracked element; they come back only if redeclared
    pub fn hide_elements<T: WidgetTree + ?Sized>(&self, tree: &mut T) {
        for element in &self.elements {
            // Stale widgets are pruned by the sweep in `end()`
            let _ = tree.set_visible(element.widget, false);
        }
    }
}

/// Table of live windows keyed by name
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: HashMap<String, Window>,
}

impl WindowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Window registered under a name
    pub fn get(&self, name: &str) -> Option<&Window> {
        self.windows.get(name)
    }

    /// Mutable window registered under a name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Window> {
        self.windows.get_mut(name)
    }

    /// Register a window, replacing any previous entry with the same name
    pub fn insert(&mut self, window: Window) -> Option<Window> {
        self.windows.insert(window.name.clone(), window)
    }

    /// Remove a window entry
    pub fn remove(&mut self, name: &str) -> Option<Window> {
        self.windows.remove(name)
    }

    /// Whether a window with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.windows.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.windows.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is registered
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Total number of tracked elements across all windows
    pub fn element_count(&self) -> usize {
        self.windows.values().map(|window| window.elements.len()).sum()
    }

    /// Remove the entry if its widget was deleted or detached
    ///
    /// A detached but still existing widget is deleted so it does not leak.
    /// Returns true when an entry was purged.
    pub fn purge_invalid<T: WidgetTree + ?Sized>(&mut self, name: &str, tree: &mut T) -> bool {
        let invalid = self.windows.get(name).is_some_and(|window| !window.is_valid(tree));
        if !invalid {
            return false;
        }
        if let Some(window) = self.windows.remove(name) {
            log::debug!("Purging invalid window \"{}\"", name);
            tree.delete(window.widget);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    #[test]
    fn test_default_flags_enable_everything() {
        let props = WindowFlags::empty().properties();
        assert!(props.contains(&WidgetProperty::TitleBar(true)));
        assert!(props.contains(&WidgetProperty::Resizable(true)));
        assert!(props.contains(&WidgetProperty::Draggable(true)));
        assert!(props.contains(&WidgetProperty::BlocksInput(false)));
        assert!(props.contains(&WidgetProperty::Background(true)));
    }

    #[test]
    fn test_each_flag_flips_one_property() {
        let base = WindowFlags::empty().properties();
        for flag in WindowFlags::all().iter() {
            let props = flag.properties();
            let differing = base.iter().zip(props.iter()).filter(|(a, b)| a != b).count();
            assert_eq!(differing, 1, "{flag:?}");
        }
    }

    #[test]
    fn test_purge_invalid_removes_deleted_window() {
        let mut tree = MemoryTree::new();
        let widget = tree.create(WidgetKind::Window, None).unwrap();
        let content = tree.create(WidgetKind::Content, Some(widget)).unwrap();
        let mut registry = WindowRegistry::new();
        registry.insert(Window::new("W", widget, content));

        assert!(!registry.purge_invalid("W", &mut tree));
        tree.delete(widget);
        assert!(registry.purge_invalid("W", &mut tree));
        assert!(!registry.contains("W"));
    }

    #[test]
    fn test_purge_invalid_deletes_detached_widget() {
        let mut tree = MemoryTree::new();
        let widget = tree.create(WidgetKind::Window, None).unwrap();
        let content = tree.create(WidgetKind::Content, Some(widget)).unwrap();
        let mut registry = WindowRegistry::new();
        registry.insert(Window::new("W", widget, content));

        tree.detach(widget);
        assert!(registry.purge_invalid("W", &mut tree));
        assert!(!tree.is_valid(widget));
    }
}
