//! Identity Generator
//!
//! Identities are derived from declaration order, not from explicit keys:
//! `"{window}/{scope...}/{Kind}_{ordinal}"`. The ordinal counts how many
//! controls of that kind were declared earlier in the same scope during the
//! current `begin`/`end` block of the current context.
//!
//! Identities are therefore stable only while the set and order of declared
//! controls is stable. Declaring a control conditionally shifts the ordinal
//! of every later control of the same kind in the same scope. Wrap
//! conditional sections in `push_id`/`pop_id` with an explicit discriminator
//! to keep the surrounding identities put.

use crate::tree::WidgetKind;

/// Transient scope path rebuilt on every `begin`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdStack {
    root: String,
    segments: Vec<String>,
}

impl IdStack {
    /// Reset the stack to a window root
    pub fn reset(&mut self, root: &str) {
        self.root.clear();
        self.root.push_str(root);
        self.segments.clear();
    }

    /// Empty the stack completely
    pub fn clear(&mut self) {
        self.root.clear();
        self.segments.clear();
    }

    /// Append a scope segment
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Remove the innermost scope segment; a no-op when only the root is left
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// Number of explicit segments above the root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Root followed by every segment, joined by `separator`
    pub fn path(&self, separator: char) -> String {
        let mut path = self.root.clone();
        for segment in &self.segments {
            path.push(separator);
            path.push_str(segment);
        }
        path
    }
}

/// Key under which ordinals of one kind in one scope are counted
pub fn scope_key(scope: &str, kind: WidgetKind, separator: char) -> String {
    format!("{scope}{separator}{}", kind.name())
}

/// Final identity string for an ordinal
pub fn compose(scope: &str, kind: WidgetKind, ordinal: u32, separator: char) -> String {
    format!("{scope}{separator}{}_{ordinal}", kind.name())
}
