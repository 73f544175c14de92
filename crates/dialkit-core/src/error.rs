//! Error types for dialkit.
//!
//! Only construction can fail. Rendering, parsing, range mapping and selector
//! updates are total and resolve bad input to a deterministic default.

use thiserror::Error;

/// Errors raised while building a curve or wiring a selector group.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// Range curve descriptor is inconsistent.
    #[error("Invalid range curve: {0}")]
    InvalidCurve(String),
    /// Quantization tiers are inconsistent.
    #[error("Invalid quantize steps: {0}")]
    InvalidQuantize(String),
    /// A selector group was given no widgets.
    #[error("Selector group has no widgets")]
    EmptyGroup,
    /// A widget handle no longer refers to a live control.
    #[error("Widget at position {index} is detached")]
    DetachedWidget {
        /// Position of the widget in the sequence passed to the group.
        index: usize,
    },
    /// Identifier mode needs a number in every widget label.
    #[error("Widget at position {index} has no numeric identifier in label {label:?}")]
    MissingIdentifier {
        /// Position of the widget in the sequence passed to the group.
        index: usize,
        /// The label that failed to parse.
        label: String,
    },
}

/// Result type for dialkit construction.
pub type ParameterResult<T> = Result<T, ParameterError>;
