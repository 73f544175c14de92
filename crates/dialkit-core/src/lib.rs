//! # dialkit-core
//!
//! Parameter presentation layer for audio plugin editors.
//!
//! This crate sits between a host-owned parameter value and the controls that
//! show it. It converts values to and from text, maps a physical range onto a
//! normalized control position, and keeps a group of exclusive toggle buttons
//! in step with one parameter.
//!
//! ## Main Types
//!
//! - [`ValueFormat`] - Text codecs for plain numbers, decibels, pan and frequency
//! - [`OffSentinel`] - Decorator that renders one value as an "off" label
//! - [`RangeCurve`] - Two-segment log/linear range mapping with tiered quantization
//! - [`SelectorGroup`] - Exclusive toggle group bound to one parameter
//! - [`UpdateFlag`] - Lock-free "values changed" signal from the audio thread
//! - [`ParameterError`] - Construction errors

pub mod error;
pub mod range_curve;
pub mod selector;
pub mod types;
pub mod update_flag;
pub mod value_format;

// Re-exports for convenience
pub use error::{ParameterError, ParameterResult};
pub use range_curve::{CurveConfig, LinearMapper, QuantizeSteps, RangeCurve, RangeMapper};
pub use selector::{
    AddressingMode, Gesture, ListenerId, Notification, ParameterHost, SelectorConfig,
    SelectorGroup, ToggleWidget,
};
pub use types::{NormalizedValue, PlainValue, RadioGroupId};
pub use update_flag::UpdateFlag;
pub use value_format::{
    FrequencyUnit, OffSentinel, PanScale, PanStyle, SuffixDisplay, ValueCodec, ValueFormat,
    DEFAULT_OFF_LABEL, PAN_LIMIT,
};
