//! # imui_core
//!
//! Immediate-mode UI on top of a retained widget tree.
//!
//! ## Features
//!
//! - **Call-order identity**: controls are matched across frames by the
//!   order they are declared in, with `push_id` scopes for conditional blocks
//! - **Two-way binding**: caller values and widget values stay in sync, and
//!   user edits are reported exactly once
//! - **Multiple update loops**: variable and fixed-step passes declare into
//!   the same windows without disturbing each other's ordinals
//! - **Automatic reclamation**: widgets and windows nobody declares any more
//!   are destroyed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imui_core::prelude::*;
//!
//! let mut ui = Session::new(MemoryTree::new());
//! let mut volume = 0.5_f32;
//! let mut open = true;
//!
//! ui.open_frame("update", None);
//! if ui.begin("Settings", &mut open, WindowFlags::empty()) {
//!     ui.label("Audio");
//!     if ui.slider_float("Volume", &mut volume, 0.0, 1.0, 0.05) {
//!         println!("volume is now {}", volume);
//!     }
//!     ui.end();
//! }
//! ui.close_frame("update");
//! ui.perform_global_cleanup();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod config;
pub mod foundation;
pub mod host;
pub mod imgui;
pub mod tree;

/// Common imports for session users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, DriverConfig, SessionConfig},
        foundation::{
            math::{rgba, Color, Vec2},
            value::{StateValue, Value},
        },
        host::{HostError, ImmediateApp, TickDriver, TickReport},
        imgui::{Session, SessionStats, UiError, WindowFlags},
        tree::{MemoryTree, TreeError, WidgetId, WidgetKind, WidgetProperty, WidgetTree},
    };
}
