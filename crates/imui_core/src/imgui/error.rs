//! Errors raised by the immediate-mode core
//!
//! None of these are fatal. The infallible API logs them and degrades to a
//! safe default; the `try_*` entry points hand them to the caller.

use crate::tree::TreeError;
use thiserror::Error;

/// Immediate-mode sequencing and structural errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A frame context was opened with an empty name
    #[error("frame context name cannot be empty")]
    EmptyContextName,

    /// A frame context was opened while another is still open
    #[error("cannot open frame context \"{requested}\": \"{open}\" is still open")]
    ContextAlreadyOpen {
        /// Context currently open
        open: String,
        /// Context the caller tried to open
        requested: String,
    },

    /// A frame context was closed under the wrong name
    #[error("cannot close frame context \"{found}\": the open context is \"{expected}\"")]
    ContextMismatch {
        /// Context currently open
        expected: String,
        /// Name passed by the caller
        found: String,
    },

    /// A declaration was made with no frame context open
    #[error("no frame context is open")]
    NoOpenContext,

    /// A declaration or `end` was made with no window begun
    #[error("no window is open")]
    NoOpenWindow,

    /// A window exists but its content sub-container cannot be located
    #[error("window \"{0}\" has no content container")]
    MissingContentContainer(String),

    /// The retained tree rejected an operation
    #[error("widget tree error: {0}")]
    Tree(#[from] TreeError),
}
