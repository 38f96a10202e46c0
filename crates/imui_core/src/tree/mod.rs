//! Retained Widget Tree Interface
//!
//! Defines the narrow capability surface the immediate-mode core needs from
//! a host's retained widget tree. Keeps the reconciliation logic independent
//! of any concrete widget hierarchy or rendering backend.

pub mod memory;

pub use memory::MemoryTree;

use crate::foundation::value::Value;
use thiserror::Error;

slotmap::new_key_type! {
    /// Handle to a retained widget
    ///
    /// Handles are generational: once a widget is deleted its handle never
    /// becomes valid again, even if the slot is reused.
    pub struct WidgetId;
}

/// Kind of a retained widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Top-level window
    Window,
    /// Content sub-container of a window
    Content,
    /// Static text
    Label,
    /// Horizontal rule
    Separator,
    /// Push button
    Button,
    /// Checkbox
    Checkbox,
    /// Integer slider
    SliderInt,
    /// Float slider
    SliderFloat,
    /// Single-line text entry
    TextInput,
    /// Color picker
    ColorPicker,
}

impl WidgetKind {
    /// Stable name used when generating identities
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Window => "Window",
            WidgetKind::Content => "Content",
            WidgetKind::Label => "Label",
            WidgetKind::Separator => "Separator",
            WidgetKind::Button => "Button",
            WidgetKind::Checkbox => "Checkbox",
            WidgetKind::SliderInt => "SliderInt",
            WidgetKind::SliderFloat => "SliderFloat",
            WidgetKind::TextInput => "TextInput",
            WidgetKind::ColorPicker => "ColorPicker",
        }
    }
}

/// Presentation property of a retained widget
///
/// Each window flag maps to exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetProperty {
    /// Whether the window shows its title bar
    TitleBar(bool),
    /// Whether the window can be resized
    Resizable(bool),
    /// Whether the window can be dragged
    Draggable(bool),
    /// Whether the widget swallows all input
    BlocksInput(bool),
    /// Whether the window draws its background
    Background(bool),
    /// Width and height in pixels
    Size(f32, f32),
    /// Caption or label text
    Text(String),
    /// Numeric range of a slider
    Range {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
        /// Step size (0 = continuous)
        step: f32,
    },
}

impl WidgetProperty {
    /// Discriminant used to key properties in a tree implementation
    pub fn slot(&self) -> PropertySlot {
        match self {
            WidgetProperty::TitleBar(_) => PropertySlot::TitleBar,
            WidgetProperty::Resizable(_) => PropertySlot::Resizable,
            WidgetProperty::Draggable(_) => PropertySlot::Draggable,
            WidgetProperty::BlocksInput(_) => PropertySlot::BlocksInput,
            WidgetProperty::Background(_) => PropertySlot::Background,
            WidgetProperty::Size(..) => PropertySlot::Size,
            WidgetProperty::Text(_) => PropertySlot::Text,
            WidgetProperty::Range { .. } => PropertySlot::Range,
        }
    }
}

/// Property key without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PropertySlot {
    TitleBar,
    Resizable,
    Draggable,
    BlocksInput,
    Background,
    Size,
    Text,
    Range,
}

/// Errors reported by a widget tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The widget handle is stale or was never issued
    #[error("invalid widget handle {0:?}")]
    InvalidWidget(WidgetId),

    /// The requested parent handle is stale or was never issued
    #[error("invalid parent handle {0:?}")]
    InvalidParent(WidgetId),
}

/// Capability interface of a retained widget tree
///
/// Implemented by the host. Every method taking a [`WidgetId`] must tolerate
/// stale handles: queries answer as if the widget does not exist and
/// mutations report [`TreeError::InvalidWidget`].
pub trait WidgetTree {
    /// Construct a widget of the given kind and attach it to `parent`
    /// (or to the tree root when `parent` is `None`)
    fn create(&mut self, kind: WidgetKind, parent: Option<WidgetId>) -> Result<WidgetId, TreeError>;

    /// Delete a widget and all its descendants
    fn delete(&mut self, id: WidgetId);

    /// Whether the widget still exists
    fn is_valid(&self, id: WidgetId) -> bool;

    /// Whether the widget is still connected to the tree root
    fn is_attached(&self, id: WidgetId) -> bool;

    /// Kind of the widget, if it exists
    fn kind(&self, id: WidgetId) -> Option<WidgetKind>;

    /// Direct child carrying the given identity tag
    fn find_child_by_tag(&self, parent: WidgetId, tag: &str) -> Option<WidgetId>;

    /// Identity tag of the widget
    fn tag(&self, id: WidgetId) -> Option<&str>;

    /// Set the identity tag used for later lookup
    fn set_tag(&mut self, id: WidgetId, tag: &str) -> Result<(), TreeError>;

    /// Visibility flag
    fn is_visible(&self, id: WidgetId) -> bool;

    /// Set the visibility flag
    fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError>;

    /// Widget-specific internal value (text, checked state, number, color)
    fn value(&self, id: WidgetId) -> Option<Value>;

    /// Set the widget-specific internal value
    fn set_value(&mut self, id: WidgetId, value: Value) -> Result<(), TreeError>;

    /// Apply a presentation property
    fn set_property(&mut self, id: WidgetId, property: WidgetProperty) -> Result<(), TreeError>;

    /// Give a widget input focus
    fn focus(&mut self, id: WidgetId) -> Result<(), TreeError>;
}
