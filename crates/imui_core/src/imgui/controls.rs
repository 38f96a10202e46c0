//! Leaf controls
//!
//! Each control is a thin declaration over the reconciler (display-only
//! controls) or the binder (data-bound controls). Captions and ranges are
//! re-applied every frame through the setup callback.

use super::binder::Accessors;
use super::session::Session;
use super::state::PRESSED_KEY;
use crate::foundation::math::{saturate, Color};
use crate::foundation::value::{StateValue, Value};
use crate::tree::{TreeError, WidgetId, WidgetKind, WidgetProperty, WidgetTree};

/// Setup applying a caption
fn caption<T: WidgetTree>(
    text: &str,
) -> impl FnOnce(&mut T, WidgetId) -> Result<(), TreeError> + '_ {
    move |tree, widget| tree.set_property(widget, WidgetProperty::Text(text.to_string()))
}

/// Setup applying a caption and a numeric range
fn ranged<T: WidgetTree>(
    text: &str,
    min: f32,
    max: f32,
    step: f32,
) -> impl FnOnce(&mut T, WidgetId) -> Result<(), TreeError> + '_ {
    move |tree, widget| {
        tree.set_property(widget, WidgetProperty::Text(text.to_string()))?;
        tree.set_property(widget, WidgetProperty::Range { min, max, step })
    }
}

fn read_int_text(value: &Value) -> Option<i32> {
    value.as_text().and_then(|text| text.trim().parse().ok())
}

fn write_int_text(value: &i32) -> Value {
    Value::Text(value.to_string())
}

fn read_float_text(value: &Value) -> Option<f32> {
    value.as_text().and_then(|text| text.trim().parse().ok())
}

fn write_float_text(value: &f32) -> Value {
    Value::Text(value.to_string())
}

impl<T: WidgetTree> Session<T> {
    /// Static text
    pub fn label(&mut self, text: &str) {
        self.get_or_create(WidgetKind::Label, text, caption(text));
    }

    /// Horizontal rule
    pub fn separator(&mut self) {
        self.get_or_create(WidgetKind::Separator, "", |_, _| Ok(()));
    }

    /// Push button
    ///
    /// Returns true on the declaration where the widget is first seen
    /// pressed; holding it down keeps returning false until it is released
    /// and pressed again.
    pub fn button(&mut self, label: &str) -> bool {
        let Some(reconciled) = self.get_or_create(WidgetKind::Button, label, caption(label)) else {
            return false;
        };
        let Some(window) = self.current_window.as_ref().map(|current| current.name.clone()) else {
            return false;
        };

        let pressed = self.tree.value(reconciled.widget) == Some(Value::Bool(true));
        let state = self.states.entry(&window, &reconciled.identity);
        let was_pressed = state.get(PRESSED_KEY) == Some(&Value::Bool(true));
        state.set(PRESSED_KEY, Value::Bool(pressed));
        pressed && !was_pressed
    }

    /// Checkbox bound to `checked`
    pub fn checkbox(&mut self, label: &str, checked: &mut bool) -> bool {
        self.bind_value(WidgetKind::Checkbox, label, checked, &Accessors::native(), caption(label))
    }

    /// Integer slider bound to `value`
    pub fn slider_int(
        &mut self,
        label: &str,
        value: &mut i32,
        min: i32,
        max: i32,
        step: i32,
    ) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let setup = ranged(label, min as f32, max as f32, step as f32);
        self.bind_value(WidgetKind::SliderInt, label, value, &Accessors::native(), setup)
    }

    /// Float slider bound to `value`
    pub fn slider_float(
        &mut self,
        label: &str,
        value: &mut f32,
        min: f32,
        max: f32,
        step: f32,
    ) -> bool {
        let setup = ranged(label, min, max, step);
        self.bind_value(WidgetKind::SliderFloat, label, value, &Accessors::native(), setup)
    }

    /// Single-line text entry bound to `text`
    pub fn input_text(&mut self, label: &str, text: &mut String) -> bool {
        self.bind_value(WidgetKind::TextInput, label, text, &Accessors::native(), caption(label))
    }

    /// Text entry parsed as an integer
    ///
    /// Text that does not parse is left in the control and ignored.
    pub fn input_int(&mut self, label: &str, value: &mut i32) -> bool {
        let accessors = Accessors {
            read: read_int_text,
            write: write_int_text,
        };
        self.bind_value(WidgetKind::TextInput, label, value, &accessors, caption(label))
    }

    /// Text entry parsed as a float
    pub fn input_float(&mut self, label: &str, value: &mut f32) -> bool {
        let accessors = Accessors {
            read: read_float_text,
            write: write_float_text,
        };
        self.bind_value(WidgetKind::TextInput, label, value, &accessors, caption(label))
    }

    /// Color picker bound to `color`; picked colors are clamped to `0.0..=1.0`
    pub fn color_picker(&mut self, label: &str, color: &mut Color) -> bool {
        let accessors = Accessors {
            read: |value: &Value| <Color as StateValue>::from_value(value).map(saturate),
            write: |color: &Color| Value::Color(*color),
        };
        self.bind_value(WidgetKind::ColorPicker, label, color, &accessors, caption(label))
    }
}
