//! Value Control Binder
//!
//! Two-way synchronisation between a caller-owned value and a retained
//! control's internal value, shared by every data-bound control.
//!
//! The element state caches the value last pushed to or read from the
//! control. Each declaration then resolves:
//! 1. control differs from cache: the user edited it, so adopt the control
//!    value and flag a change;
//! 2. otherwise, cache differs from the caller's value: the caller changed it
//!    programmatically, so push it into cache and control.
//!
//! Rule 1 wins within a frame. A flagged change is written back through the
//! caller's reference and reported as `true` exactly once. Values are
//! compared with [`StateValue::same`], so a NaN is never mistaken for an
//! edit. If the accessors adjust what the user entered (clamping, parsing),
//! the adjusted value is pushed back so the control shows what was adopted.

use super::session::Session;
use super::state::VALUE_KEY;
use crate::foundation::value::{StateValue, Value};
use crate::tree::{TreeError, WidgetId, WidgetKind, WidgetTree};

/// Accessors translating between a bound type and a control's internal value
///
/// Coercion (for example parsing a text field as an integer) lives here, not
/// in the binder.
pub struct Accessors<V> {
    /// Interpret the control's value; `None` means "no usable value"
    pub read: fn(&Value) -> Option<V>,
    /// Encode a bound value for the control
    pub write: fn(&V) -> Value,
}

impl<V: StateValue> Accessors<V> {
    /// Accessors for controls that store `V` natively
    pub fn native() -> Self {
        Self {
            read: V::from_value,
            write: |v| v.clone().into_value(),
        }
    }
}

impl<T: WidgetTree> Session<T> {
    /// Declare a data-bound control and reconcile `value` with it
    ///
    /// Returns true when the user changed the control since the previous
    /// declaration; `value` then holds the new value.
    pub fn bind_value<V: StateValue>(
        &mut self,
        kind: WidgetKind,
        label: &str,
        value: &mut V,
        accessors: &Accessors<V>,
        setup: impl FnOnce(&mut T, WidgetId) -> Result<(), TreeError>,
    ) -> bool {
        let Some(reconciled) = self.get_or_create(kind, label, setup) else {
            return false;
        };
        let Some(window) = self.current_window.as_ref().map(|current| current.name.clone()) else {
            return false;
        };

        let widget = reconciled.widget;
        let state = self.states.entry(&window, &reconciled.identity);
        let stored = state.get(VALUE_KEY);
        let cached = stored.and_then(V::from_value);

        let push = match cached {
            None => {
                // First declaration, or the slot previously held another type
                if let Some(stored) = stored {
                    log::debug!(
                        "{}: stored {} value does not fit, reseeding",
                        reconciled.identity,
                        stored.kind_name()
                    );
                }
                state.set(VALUE_KEY, value.clone().into_value());
                Some(value.clone())
            }
            Some(cached) => {
                let raw = if reconciled.created {
                    None
                } else {
                    self.tree.value(widget)
                };
                let control = if reconciled.created {
                    // Fresh widget: restore what was persisted
                    Some(cached.clone())
                } else {
                    raw.as_ref().and_then(accessors.read)
                };

                match control {
                    Some(control) if !control.same(&cached) => {
                        // Write back when the accessor normalised what the user entered
                        let encoded = (accessors.write)(&control);
                        let normalised = raw.as_ref() != Some(&encoded);
                        state.set(VALUE_KEY, control.clone().into_value());
                        state.mark_changed();
                        normalised.then_some(control)
                    }
                    _ if !cached.same(value) => {
                        state.set(VALUE_KEY, value.clone().into_value());
                        Some(value.clone())
                    }
                    _ if reconciled.created => Some(cached),
                    _ => None,
                }
            }
        };

        let changed = state.take_changed();
        if changed {
            if let Some(current) = state.get(VALUE_KEY).and_then(V::from_value) {
                *value = current;
            }
        }

        if let Some(pushed) = push {
            if let Err(e) = self.tree.set_value(widget, (accessors.write)(&pushed)) {
                log::error!("{}: cannot push value: {}", reconciled.identity, e);
            }
        }
        changed
    }
}
