//! Element Reconciler
//!
//! Find-reuse-or-create for each declared control. A hit reveals the
//! existing widget and re-applies `setup`; a miss builds a new widget under
//! the window's content container. `setup` runs every frame, so it must be
//! idempotent: that is how changed captions or ranges reach the widget.

use super::error::UiError;
use super::session::Session;
use super::window::Element;
use crate::tree::{TreeError, WidgetId, WidgetKind, WidgetTree};

/// Outcome of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Widget backing the declaration
    pub widget: WidgetId,
    /// Identity the declaration received
    pub identity: String,
    /// Whether the widget was built during this call
    pub created: bool,
}

impl<T: WidgetTree> Session<T> {
    /// Reuse or create the widget for the next declaration of `kind`
    ///
    /// Returns `None` (after logging) when no window is open or its content
    /// container is gone; the caller skips the declaration.
    pub fn get_or_create(
        &mut self,
        kind: WidgetKind,
        label: &str,
        setup: impl FnOnce(&mut T, WidgetId) -> Result<(), TreeError>,
    ) -> Option<Reconciled> {
        match self.try_get_or_create(kind, label, setup) {
            Ok(reconciled) => Some(reconciled),
            Err(e) => {
                log::error!("{} \"{}\": {}", kind.name(), label, e);
                None
            }
        }
    }

    /// Reuse or create the widget for the next declaration of `kind`
    pub fn try_get_or_create(
        &mut self,
        kind: WidgetKind,
        label: &str,
        setup: impl FnOnce(&mut T, WidgetId) -> Result<(), TreeError>,
    ) -> Result<Reconciled, UiError> {
        let current = self.current_window.as_ref().ok_or(UiError::NoOpenWindow)?;
        let (window_name, content) = (current.name.clone(), current.content);
        if !self.tree.is_valid(content) {
            return Err(UiError::MissingContentContainer(window_name));
        }

        let identity = self.try_generate_id(kind, label)?;
        let window = self
            .windows
            .get_mut(&window_name)
            .ok_or(UiError::NoOpenWindow)?;

        if let Some(index) = window.find_element(&identity) {
            let widget = window.elements[index].widget;
            if self.tree.kind(widget) == Some(kind) {
                self.tree.set_visible(widget, true)?;
                setup(&mut self.tree, widget)?;
                self.stats.elements_reused += 1;
                return Ok(Reconciled {
                    widget,
                    identity,
                    created: false,
                });
            }

            // Gone from the tree, or no longer the kind it was created as
            let stale = window.elements.remove(index);
            self.tree.delete(stale.widget);
        }

        // Externally deleted widgets are dropped before growing the list
        let tree = &self.tree;
        window.elements.retain(|element| tree.is_valid(element.widget));

        let widget = self.tree.create(kind, Some(content))?;
        self.tree.set_tag(widget, &identity)?;
        if let Err(e) = setup(&mut self.tree, widget) {
            self.tree.delete(widget);
            return Err(e.into());
        }
        window.elements.push(Element {
            identity: identity.clone(),
            widget,
        });
        self.stats.elements_created += 1;
        self.stats.element_count = self.windows.element_count();
        log::debug!("Created {} for {}", kind.name(), identity);

        Ok(Reconciled {
            widget,
            identity,
            created: true,
        })
    }
}
