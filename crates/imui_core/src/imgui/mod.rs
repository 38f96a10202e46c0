//! Immediate-Mode Reconciliation Core
//!
//! Lets calling code declare UI every frame as if no state existed, while
//! retained widgets are created, reused, hidden and destroyed behind it.
//!
//! Architecture:
//! - context: frame contexts (independent update loops) and their counters
//! - window: window registry and window flags
//! - identity: call-order identities and the id stack
//! - reconciler: find-reuse-or-create for each declaration
//! - binder: two-way value binding for data-bound controls
//! - state: per-element persistent values
//! - gc: window-close and cycle sweeps
//! - controls: the leaf controls built on top
//!
//! Control flow per tick: `open_frame` -> `begin` -> controls -> `end` ->
//! `close_frame`, repeated for each update loop, then
//! `perform_global_cleanup` once.

pub mod binder;
pub mod context;
pub mod controls;
pub mod error;
pub mod gc;
pub mod identity;
pub mod reconciler;
pub mod session;
pub mod state;
pub mod stats;
pub mod window;

#[cfg(test)]
mod tests;

pub use binder::Accessors;
pub use context::{ContextManager, FrameContext};
pub use error::UiError;
pub use identity::IdStack;
pub use reconciler::Reconciled;
pub use session::Session;
pub use state::{ElementState, StateStore};
pub use stats::SessionStats;
pub use window::{Element, Window, WindowFlags, WindowRegistry};
