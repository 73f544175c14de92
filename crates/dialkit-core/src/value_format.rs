//! Parameter value rendering and parsing.
//!
//! This module provides the [`ValueCodec`] trait and the [`ValueFormat`] enum
//! for converting between plain parameter values and the short strings shown
//! in text boxes. [`OffSentinel`] wraps any codec so that one designated value
//! displays as a label such as `"OFF"`.
//!
//! Parsing never fails. Text boxes hand over whatever the user typed so far,
//! so malformed or empty input resolves to a deterministic default (0, centre,
//! or the sentinel value) instead of an error.
//!
//! # Example
//!
//! ```ignore
//! use dialkit_core::value_format::{FrequencyUnit, ValueCodec, ValueFormat};
//!
//! let db = ValueFormat::decibel();
//! assert_eq!(db.render(-6.0), "-6.0 dB");
//! assert_eq!(db.parse("-12.5db"), -12.5);
//!
//! let cutoff = ValueFormat::frequency(FrequencyUnit::Hertz).with_off(20000.0);
//! assert_eq!(cutoff.render(1500.0), "1.50 kHz");
//! assert_eq!(cutoff.render(20000.0), "OFF");
//! assert_eq!(cutoff.parse("off"), 20000.0);
//! ```

use std::borrow::Cow;

use dialkit_utils::{approx_eq, exact_float, leading_float, strip_suffix_ignore_case};

use crate::range_curve::{LinearMapper, RangeMapper};
use crate::types::PlainValue;

/// Pan magnitude at hard left or hard right, in percent.
pub const PAN_LIMIT: PlainValue = 100.0;

/// Label rendered for the sentinel value unless another one is configured.
pub const DEFAULT_OFF_LABEL: &str = "OFF";

/// Accepted spellings of the pan centre, compared in lower case.
const PAN_CENTER_TOKENS: [&str; 5] = ["c", "center", "centre", "< c >", "<c>"];

/// A pair of pure functions between a plain value and its display text.
pub trait ValueCodec: Send + Sync {
    /// Render a plain value for display.
    fn render(&self, value: PlainValue) -> String;

    /// Parse user text back to a plain value.
    ///
    /// Total: unrecognised input yields the codec's default.
    fn parse(&self, text: &str) -> PlainValue;

    /// Unit label for this codec (e.g. "dB", "Hz"), empty if none.
    fn units(&self) -> &'static str {
        ""
    }
}

impl<C: ValueCodec + ?Sized> ValueCodec for Box<C> {
    fn render(&self, value: PlainValue) -> String {
        (**self).render(value)
    }

    fn parse(&self, text: &str) -> PlainValue {
        (**self).parse(text)
    }

    fn units(&self) -> &'static str {
        (**self).units()
    }
}

/// Unit assumed for a frequency typed without a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    /// Bare numbers are Hz ("20" means 20 Hz).
    #[default]
    Hertz,
    /// Bare numbers are kHz ("20" means 20000 Hz).
    Kilohertz,
}

impl FrequencyUnit {
    /// Multiplier from this unit to Hz.
    pub const fn scale(self) -> PlainValue {
        match self {
            FrequencyUnit::Hertz => 1.0,
            FrequencyUnit::Kilohertz => 1000.0,
        }
    }
}

/// Text convention for pan positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanStyle {
    /// "L 30", "30 R", centre "< C >".
    #[default]
    Spaced,
    /// "30%L", "30%R", centre "C".
    Percent,
}

impl PanStyle {
    /// Token rendered for the centre position.
    pub const fn center_token(self) -> &'static str {
        match self {
            PanStyle::Spaced => "< C >",
            PanStyle::Percent => "C",
        }
    }
}

/// Numeric domain of a pan parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanScale {
    /// -100 (hard left) to +100 (hard right), centre 0.
    #[default]
    Percent,
    /// 0.0 (hard left) to 1.0 (hard right), centre 0.5.
    Unit,
}

impl PanScale {
    fn value_to_percent(self, value: PlainValue) -> PlainValue {
        match self {
            PanScale::Percent => value,
            PanScale::Unit => pan_mapper().denormalize(value),
        }
    }

    fn percent_to_value(self, percent: PlainValue) -> PlainValue {
        match self {
            PanScale::Percent => percent,
            PanScale::Unit => pan_mapper().normalize(percent),
        }
    }
}

fn pan_mapper() -> LinearMapper {
    LinearMapper::new(-PAN_LIMIT..=PAN_LIMIT)
}

/// Semantic kind of a parameter, selecting how it renders and parses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueFormat {
    /// Bare number with fixed precision (e.g., "1.5").
    Plain {
        /// Number of decimal places.
        precision: usize,
    },

    /// Level in dB, value already in dB.
    ///
    /// Display: "-6.0 dB". Parsing accepts an optional, case-insensitive "dB".
    Decibel {
        /// Number of decimal places.
        precision: usize,
    },

    /// Stereo position.
    ///
    /// Display: "L 30" / "30 R" or "30%L" / "30%R", with a centre token.
    Pan {
        /// Text convention.
        style: PanStyle,
        /// Numeric domain of the value.
        scale: PanScale,
    },

    /// Frequency in Hz with automatic kHz display from 1000 Hz up.
    ///
    /// Display: "440.0 Hz", "1.50 kHz".
    Frequency {
        /// Unit assumed when the text carries no suffix.
        default_unit: FrequencyUnit,
        /// Decimal places below 1 kHz.
        hz_precision: usize,
        /// Decimal places from 1 kHz up.
        khz_precision: usize,
    },
}

impl ValueFormat {
    /// Plain number with one decimal place.
    pub const fn plain() -> Self {
        ValueFormat::Plain { precision: 1 }
    }

    /// Decibel value with one decimal place.
    pub const fn decibel() -> Self {
        ValueFormat::Decibel { precision: 1 }
    }

    /// Pan position in percent with the spaced convention.
    pub const fn pan() -> Self {
        ValueFormat::Pan {
            style: PanStyle::Spaced,
            scale: PanScale::Percent,
        }
    }

    /// Frequency with one decimal in Hz and two in kHz.
    pub const fn frequency(default_unit: FrequencyUnit) -> Self {
        ValueFormat::Frequency {
            default_unit,
            hz_precision: 1,
            khz_precision: 2,
        }
    }

    /// Display `off_value` as [`DEFAULT_OFF_LABEL`] instead of a number.
    pub fn with_off(self, off_value: PlainValue) -> OffSentinel<Self> {
        OffSentinel::new(self, off_value)
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        ValueFormat::plain()
    }
}

impl ValueCodec for ValueFormat {
    fn render(&self, value: PlainValue) -> String {
        match *self {
            ValueFormat::Plain { precision } => {
                format!("{:.prec$}", value, prec = precision)
            }

            ValueFormat::Decibel { precision } => {
                format!("{:.prec$} dB", value, prec = precision)
            }

            ValueFormat::Pan { style, scale } => render_pan(scale.value_to_percent(value), style),

            ValueFormat::Frequency {
                hz_precision,
                khz_precision,
                ..
            } => {
                if value >= 1000.0 {
                    format!("{:.prec$} kHz", value / 1000.0, prec = khz_precision)
                } else {
                    format!("{:.prec$} Hz", value, prec = hz_precision)
                }
            }
        }
    }

    fn parse(&self, text: &str) -> PlainValue {
        match *self {
            ValueFormat::Plain { .. } => leading_float(text).unwrap_or(0.0),

            ValueFormat::Decibel { .. } => {
                let trimmed = text.trim();
                let number = strip_suffix_ignore_case(trimmed, "db").unwrap_or(trimmed);
                leading_float(number).unwrap_or(0.0)
            }

            ValueFormat::Pan { scale, .. } => scale.percent_to_value(parse_pan(text)),

            ValueFormat::Frequency { default_unit, .. } => parse_frequency(text, default_unit),
        }
    }

    fn units(&self) -> &'static str {
        match self {
            ValueFormat::Plain { .. } => "",
            ValueFormat::Decibel { .. } => "dB",
            ValueFormat::Pan { .. } => "%",
            ValueFormat::Frequency { .. } => "Hz",
        }
    }
}

fn render_pan(percent: PlainValue, style: PanStyle) -> String {
    let percent = percent.clamp(-PAN_LIMIT, PAN_LIMIT);
    let magnitude = percent.abs().round();
    if percent.is_nan() || magnitude == 0.0 {
        return style.center_token().to_string();
    }

    let magnitude = magnitude as i32;
    match (style, percent < 0.0) {
        (PanStyle::Spaced, true) => format!("L {}", magnitude),
        (PanStyle::Spaced, false) => format!("{} R", magnitude),
        (PanStyle::Percent, true) => format!("{}%L", magnitude),
        (PanStyle::Percent, false) => format!("{}%R", magnitude),
    }
}

/// Parse pan text to a percentage in [-100, 100].
fn parse_pan(text: &str) -> PlainValue {
    let lower = text.trim().to_ascii_lowercase();

    if PAN_CENTER_TOKENS.contains(&lower.as_str()) {
        return 0.0;
    }

    match lower.as_str() {
        "l" => return -PAN_LIMIT,
        "r" => return PAN_LIMIT,
        _ => {}
    }

    if let Some(rest) = lower.strip_prefix('l').or_else(|| lower.strip_suffix('l')) {
        return signed(pan_magnitude(rest), true);
    }

    if let Some(rest) = lower.strip_prefix('r').or_else(|| lower.strip_suffix('r')) {
        return signed(pan_magnitude(rest), false);
    }

    let number = lower.strip_suffix('%').unwrap_or(&lower);
    match exact_float(number) {
        Some(value) => signed(value.abs().min(PAN_LIMIT), value < 0.0),
        None => 0.0,
    }
}

/// Magnitude next to a direction letter, e.g. "30", " 30", "30%".
fn pan_magnitude(rest: &str) -> PlainValue {
    let rest = rest.trim();
    let rest = rest.strip_suffix('%').unwrap_or(rest);
    exact_float(rest)
        .map(|value| value.abs().min(PAN_LIMIT))
        .unwrap_or(0.0)
}

fn signed(magnitude: PlainValue, negative: bool) -> PlainValue {
    if negative && magnitude != 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

fn parse_frequency(text: &str, default_unit: FrequencyUnit) -> PlainValue {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    // Suffix first; the default unit only applies when none is recognised.
    let (number, scale) = if let Some(number) = compact.strip_suffix("khz") {
        (number, 1000.0)
    } else if let Some(number) = compact.strip_suffix("hz") {
        (number, 1.0)
    } else if let Some(number) = compact.strip_suffix('k') {
        (number, 1000.0)
    } else {
        (compact.as_str(), default_unit.scale())
    };

    let value = leading_float(number).unwrap_or(0.0) * scale;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// =============================================================================
// OffSentinel
// =============================================================================

/// Decorator that renders one designated value as a label.
///
/// Rendering emits the label when the value equals the sentinel within float
/// tolerance. Parsing returns the sentinel when the trimmed text matches the
/// label case-insensitively. Everything else goes to the wrapped codec.
#[derive(Debug, Clone, PartialEq)]
pub struct OffSentinel<C> {
    inner: C,
    value: PlainValue,
    label: Cow<'static, str>,
}

impl<C: ValueCodec> OffSentinel<C> {
    /// Wrap `inner`, labelling `value` with [`DEFAULT_OFF_LABEL`].
    pub fn new(inner: C, value: PlainValue) -> Self {
        Self {
            inner,
            value,
            label: Cow::Borrowed(DEFAULT_OFF_LABEL),
        }
    }

    /// Use a different label for the sentinel.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// The wrapped codec.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The sentinel value.
    pub fn value(&self) -> PlainValue {
        self.value
    }

    /// The label shown for the sentinel value.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<C: ValueCodec> ValueCodec for OffSentinel<C> {
    fn render(&self, value: PlainValue) -> String {
        if approx_eq(value, self.value) {
            self.label.to_string()
        } else {
            self.inner.render(value)
        }
    }

    fn parse(&self, text: &str) -> PlainValue {
        if text.trim().eq_ignore_ascii_case(self.label.trim()) {
            self.value
        } else {
            self.inner.parse(text)
        }
    }

    fn units(&self) -> &'static str {
        self.inner.units()
    }
}

// =============================================================================
// SuffixDisplay
// =============================================================================

/// When a text box shows the unit suffix next to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixDisplay {
    /// Hide the suffix at the range minimum (where the value reads as "off").
    OffOnMinimum,
    /// Hide the suffix at the range maximum.
    OffOnMaximum,
    /// Always show the suffix.
    #[default]
    Always,
    /// Never show the suffix.
    Never,
    /// Hide the suffix when the value is zero.
    Zero,
}

impl SuffixDisplay {
    /// Whether the suffix is shown for `value` in `min..=max`.
    pub fn shows_suffix(self, value: PlainValue, min: PlainValue, max: PlainValue) -> bool {
        match self {
            SuffixDisplay::OffOnMinimum => !approx_eq(value, min),
            SuffixDisplay::OffOnMaximum => !approx_eq(value, max),
            SuffixDisplay::Always => true,
            SuffixDisplay::Never => false,
            SuffixDisplay::Zero => !approx_eq(value, 0.0),
        }
    }

    /// Suffix text (" dB", " Hz", ...) for `value`, or an empty string.
    pub fn text_suffix(
        self,
        value: PlainValue,
        min: PlainValue,
        max: PlainValue,
        units: &str,
    ) -> String {
        if units.is_empty() || !self.shows_suffix(value, min, max) {
            String::new()
        } else {
            format!(" {}", units)
        }
    }
}
