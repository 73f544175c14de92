//! Common types used throughout dialkit.

/// A physical parameter value in natural units (dB, Hz, pan percent, ...).
///
/// The canonical value is owned by the parameter host. Components in this
/// crate only read it or propose a new one.
pub type PlainValue = f32;

/// A slider position (0.0 to 1.0).
pub type NormalizedValue = f32;

/// Radio group identifier handed to selector widgets.
///
/// Only positive ids are forwarded to widgets; zero or negative means the
/// widgets are not placed in a toolkit-level radio group.
pub type RadioGroupId = i32;
