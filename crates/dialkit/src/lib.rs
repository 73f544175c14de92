//! # Dialkit
//!
//! Parameter presentation for audio plugin editors.
//!
//! ## Architecture
//!
//! ```text
//! Host parameter (canonical value)
//!        ↓              ↑ propose_value
//! RangeCurve / ValueFormat   SelectorGroup
//!        ↓              ↑ clicks
//! Sliders, text boxes, toggle buttons
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dialkit::prelude::*;
//!
//! // A cutoff knob: 20 Hz .. 20 kHz, fine control in the low range.
//! let curve = RangeCurve::new(20.0, 1000.0, 20000.0)?;
//! let format = ValueFormat::frequency(FrequencyUnit::Hertz);
//!
//! let hz = curve.to_physical(knob_position);
//! label.set_text(&format.render(hz));
//!
//! // Filter type buttons bound to an index parameter.
//! let group = SelectorGroup::new(host, buttons, SelectorConfig::index().with_group_id(1))?;
//! ```

// Re-export sub-crates
pub use dialkit_core as core;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use dialkit::prelude::*;
/// ```
pub mod prelude {
    pub use dialkit_core::{
        // Text codecs
        FrequencyUnit, OffSentinel, PanScale, PanStyle, SuffixDisplay, ValueCodec, ValueFormat,
        // Range mapping
        CurveConfig, LinearMapper, QuantizeSteps, RangeCurve, RangeMapper,
        // Selector groups
        AddressingMode, Gesture, Notification, ParameterHost, SelectorConfig, SelectorGroup,
        ToggleWidget,
        // Threading
        UpdateFlag,
        // Types and errors
        NormalizedValue, ParameterError, ParameterResult, PlainValue, RadioGroupId,
    };
}
