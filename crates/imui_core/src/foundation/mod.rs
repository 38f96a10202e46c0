//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the toolkit:
//! - Color and vector types
//! - The closed value type shared by widgets and persisted element state
//! - Logging utilities

pub mod math;
pub mod value;
pub mod logging;
