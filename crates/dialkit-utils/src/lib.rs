//! Internal utilities for the dialkit parameter layer.
//!
//! This crate provides the low-level text scanning and float comparison
//! helpers used by `dialkit-core`. It has zero external dependencies.
//!
//! # Usage
//!
//! This crate is an internal implementation detail and is not intended for direct
//! use by plugin authors. Use the `dialkit` facade crate instead.
//!
//! # Contents
//!
//! - [`leading_float`] - Lenient number extraction from the start of a string
//! - [`exact_float`] - Strict whole-string number parsing
//! - [`strip_suffix_ignore_case`] / [`strip_prefix_ignore_case`] - ASCII case-insensitive affix removal
//! - [`approx_eq`] - Float comparison with a relative tolerance

pub mod float;
pub mod text;

pub use float::approx_eq;
pub use text::{exact_float, leading_float, strip_prefix_ignore_case, strip_suffix_ignore_case};
