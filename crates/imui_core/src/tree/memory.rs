//! In-memory retained tree
//!
//! Reference [`WidgetTree`] implementation backed by a slot map. Used by the
//! demo host and by tests, which simulate user interaction by writing widget
//! values directly.

use super::{PropertySlot, TreeError, WidgetId, WidgetKind, WidgetProperty, WidgetTree};
use crate::foundation::math::rgba;
use crate::foundation::value::Value;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Retained widget storage
#[derive(Debug, Clone)]
struct Node {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    tag: Option<String>,
    visible: bool,
    value: Option<Value>,
    properties: HashMap<PropertySlot, WidgetProperty>,
    /// Set when detached from the root without being deleted
    detached: bool,
}

impl Node {
    fn new(kind: WidgetKind, parent: Option<WidgetId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            tag: None,
            visible: true,
            value: default_value(kind),
            properties: HashMap::new(),
            detached: false,
        }
    }
}

/// Initial internal value of a freshly constructed widget
fn default_value(kind: WidgetKind) -> Option<Value> {
    match kind {
        WidgetKind::Window => Some(Value::Bool(true)),
        WidgetKind::Button | WidgetKind::Checkbox => Some(Value::Bool(false)),
        WidgetKind::SliderInt => Some(Value::Int(0)),
        WidgetKind::SliderFloat => Some(Value::Float(0.0)),
        WidgetKind::TextInput => Some(Value::Text(String::new())),
        WidgetKind::ColorPicker => Some(Value::Color(rgba(1.0, 1.0, 1.0, 1.0))),
        WidgetKind::Content | WidgetKind::Label | WidgetKind::Separator => None,
    }
}

/// Slot-map backed retained widget tree
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: SlotMap<WidgetId, Node>,
    focused: Option<WidgetId>,
}

impl MemoryTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live widgets
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no widgets
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of a widget, in attachment order
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        match self.nodes.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Parent of a widget (`None` for root-level or detached widgets)
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Current value of a presentation property
    pub fn property(&self, id: WidgetId, slot: PropertySlot) -> Option<&WidgetProperty> {
        self.nodes.get(id).and_then(|node| node.properties.get(&slot))
    }

    /// Caption text, if one was applied
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        match self.property(id, PropertySlot::Text) {
            Some(WidgetProperty::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Widget holding input focus
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused.filter(|id| self.nodes.contains_key(*id))
    }

    /// Count live widgets of a kind
    pub fn count_of_kind(&self, kind: WidgetKind) -> usize {
        self.nodes.values().filter(|node| node.kind == kind).count()
    }

    /// Disconnect a widget from its parent without deleting it
    pub fn detach(&mut self, id: WidgetId) {
        let Some(parent) = self.nodes.get(id).and_then(|node| node.parent) else {
            if let Some(node) = self.nodes.get_mut(id) {
                node.detached = true;
            }
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|child| *child != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
            node.detached = true;
        }
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::InvalidWidget(id))
    }
}

impl WidgetTree for MemoryTree {
    fn create(
        &mut self,
        kind: WidgetKind,
        parent: Option<WidgetId>,
    ) -> Result<WidgetId, TreeError> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) {
                return Err(TreeError::InvalidParent(parent));
            }
        }

        let id = self.nodes.insert(Node::new(kind, parent));
        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent_node.children.push(id);
        }
        log::trace!("Created {} widget {:?}", kind.name(), id);
        Ok(id)
    }

    fn delete(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let Some(parent_node) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent_node.children.retain(|child| *child != id);
        }

        // Children only reference their parent, so removing them in any order is fine
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(child_node) = self.nodes.remove(child) {
                pending.extend(child_node.children);
            }
        }
        log::trace!("Deleted {} widget {:?}", node.kind.name(), id);
    }

    fn is_valid(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    fn is_attached(&self, id: WidgetId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(current) else {
                return false;
            };
            if node.detached {
                return false;
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return true,
            }
        }
    }

    fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.nodes.get(id).map(|node| node.kind)
    }

    fn find_child_by_tag(&self, parent: WidgetId, tag: &str) -> Option<WidgetId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| self.tag(*child) == Some(tag))
    }

    fn tag(&self, id: WidgetId) -> Option<&str> {
        self.nodes.get(id).and_then(|node| node.tag.as_deref())
    }

    fn set_tag(&mut self, id: WidgetId, tag: &str) -> Result<(), TreeError> {
        self.node_mut(id)?.tag = Some(tag.to_string());
        Ok(())
    }

    fn is_visible(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.visible)
    }

    fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    fn value(&self, id: WidgetId) -> Option<Value> {
        self.nodes.get(id).and_then(|node| node.value.clone())
    }

    fn set_value(&mut self, id: WidgetId, value: Value) -> Result<(), TreeError> {
        self.node_mut(id)?.value = Some(value);
        Ok(())
    }

    fn set_property(&mut self, id: WidgetId, property: WidgetProperty) -> Result<(), TreeError> {
        self.node_mut(id)?.properties.insert(property.slot(), property);
        Ok(())
    }

    fn focus(&mut self, id: WidgetId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidWidget(id));
        }
        self.focused = Some(id);
        Ok(())
    }
}
