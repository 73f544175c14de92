//! Range mapping between slider positions and physical values.
//!
//! This module provides the [`RangeMapper`] trait plus two implementations:
//!
//! - [`LinearMapper`] - Straight interpolation (pan positions, simple knobs)
//! - [`RangeCurve`] - Two-segment curve with fine control around a zero point
//!
//! A [`RangeCurve`] splits normalized space at a breakpoint. Below it, a power
//! curve runs from `start` up to `zero_point`, flattening out as it approaches
//! the zero point. Above it, a straight line runs from `zero_point` to `end`.
//! With a gain range of -60..=12 dB and a zero point of 0 dB, most of the
//! slider travel sits close to unity gain while the extremes stay reachable.
//!
//! # Example
//!
//! ```ignore
//! use dialkit_core::range_curve::{RangeCurve, RangeMapper};
//!
//! let gain = RangeCurve::new(-60.0, 0.0, 12.0)?;
//! assert_eq!(gain.to_physical(0.7), 0.0); // breakpoint lands on the zero point
//! assert_eq!(gain.quantize(-35.4), -35.0); // whole dB far below unity
//! assert!((gain.quantize(-3.14) - (-3.1)).abs() < 1e-6); // tenths near unity
//! ```

use std::ops::RangeInclusive;

use crate::error::{ParameterError, ParameterResult};
use crate::types::{NormalizedValue, PlainValue};

/// Trait for mapping between plain values and normalized values.
///
/// Implementations must be thread-safe (`Send + Sync`) so a mapper can live
/// next to the parameter it describes.
pub trait RangeMapper: Send + Sync {
    /// Convert a plain value to normalized (0.0-1.0).
    ///
    /// Values outside the range are clamped.
    fn normalize(&self, plain: PlainValue) -> NormalizedValue;

    /// Convert a normalized value (0.0-1.0) to plain.
    ///
    /// Values outside 0.0-1.0 are clamped.
    fn denormalize(&self, normalized: NormalizedValue) -> PlainValue;

    /// Get the plain value range as (min, max).
    fn range(&self) -> (PlainValue, PlainValue);
}

/// Linear range mapping.
///
/// # Example
///
/// ```ignore
/// let mapper = LinearMapper::new(-100.0..=100.0);
/// assert_eq!(mapper.denormalize(0.5), 0.0);
/// assert_eq!(mapper.normalize(-100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapper {
    min: PlainValue,
    max: PlainValue,
}

impl LinearMapper {
    /// Create a new linear mapper with the given range.
    pub fn new(range: RangeInclusive<PlainValue>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }
}

impl RangeMapper for LinearMapper {
    fn normalize(&self, plain: PlainValue) -> NormalizedValue {
        if (self.max - self.min).abs() < f32::EPSILON {
            return 0.5;
        }
        ((plain - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn denormalize(&self, normalized: NormalizedValue) -> PlainValue {
        let normalized = normalized.clamp(0.0, 1.0);
        self.min + normalized * (self.max - self.min)
    }

    fn range(&self) -> (PlainValue, PlainValue) {
        (self.min, self.max)
    }
}

// =============================================================================
// QuantizeSteps
// =============================================================================

/// Value-dependent snapping tiers for display and stepping.
///
/// Values below `low_threshold` snap to `1 / coarse_divisions`, values in
/// `[low_threshold, high_threshold)` snap to `1 / medium_divisions`, and
/// everything from `high_threshold` up snaps to `1 / fine_divisions`.
///
/// Steps are stored as divisions per unit so that snapping is computed as
/// `round(v * d) / d`. Together with the grid constraints checked at
/// construction, this keeps [`RangeCurve::quantize`] idempotent even when a
/// snapped value lands exactly on a tier boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeSteps {
    /// Upper bound (exclusive) of the coarse tier.
    pub low_threshold: PlainValue,
    /// Upper bound (exclusive) of the medium tier.
    pub high_threshold: PlainValue,
    /// Divisions per unit in the coarse tier (1 = whole units).
    pub coarse_divisions: u32,
    /// Divisions per unit in the medium tier (2 = half units).
    pub medium_divisions: u32,
    /// Divisions per unit in the fine tier (10 = tenths).
    pub fine_divisions: u32,
}

impl QuantizeSteps {
    /// Whole, half and tenth units split at the given thresholds.
    pub const fn new(low_threshold: PlainValue, high_threshold: PlainValue) -> Self {
        Self {
            low_threshold,
            high_threshold,
            coarse_divisions: 1,
            medium_divisions: 2,
            fine_divisions: 10,
        }
    }

    /// Set the divisions per unit for each tier.
    pub const fn with_divisions(mut self, coarse: u32, medium: u32, fine: u32) -> Self {
        self.coarse_divisions = coarse;
        self.medium_divisions = medium;
        self.fine_divisions = fine;
        self
    }

    /// Step size applied to `value`.
    pub fn step_for(&self, value: PlainValue) -> PlainValue {
        1.0 / self.divisions_for(value) as PlainValue
    }

    /// Snap `value` to the grid of its tier. No range clamping.
    pub fn snap(&self, value: PlainValue) -> PlainValue {
        let divisions = self.divisions_for(value) as PlainValue;
        (value * divisions).round() / divisions
    }

    fn divisions_for(&self, value: PlainValue) -> u32 {
        if value < self.low_threshold {
            self.coarse_divisions
        } else if value < self.high_threshold {
            self.medium_divisions
        } else {
            self.fine_divisions
        }
    }

    fn validate(&self) -> ParameterResult<()> {
        if !self.low_threshold.is_finite() || !self.high_threshold.is_finite() {
            return Err(ParameterError::InvalidQuantize(
                "thresholds must be finite".to_string(),
            ));
        }
        if self.low_threshold > self.high_threshold {
            return Err(ParameterError::InvalidQuantize(format!(
                "low threshold {} is above high threshold {}",
                self.low_threshold, self.high_threshold
            )));
        }
        if self.coarse_divisions == 0 || self.medium_divisions == 0 || self.fine_divisions == 0 {
            return Err(ParameterError::InvalidQuantize(
                "divisions must be positive".to_string(),
            ));
        }
        if self.medium_divisions % self.coarse_divisions != 0
            || self.fine_divisions % self.medium_divisions != 0
        {
            return Err(ParameterError::InvalidQuantize(format!(
                "each tier must refine the one below it, got {}/{}/{}",
                self.coarse_divisions, self.medium_divisions, self.fine_divisions
            )));
        }
        // A threshold off its tier's grid would let snapped values fall back
        // into the coarser tier.
        if !on_grid(self.low_threshold, self.medium_divisions)
            || !on_grid(self.high_threshold, self.fine_divisions)
        {
            return Err(ParameterError::InvalidQuantize(format!(
                "thresholds {} and {} must lie on the grid of the tier above them",
                self.low_threshold, self.high_threshold
            )));
        }
        Ok(())
    }
}

impl Default for QuantizeSteps {
    fn default() -> Self {
        Self::new(-20.0, -6.0)
    }
}

fn on_grid(value: PlainValue, divisions: u32) -> bool {
    (value * divisions as PlainValue).fract() == 0.0
}

// =============================================================================
// CurveConfig
// =============================================================================

/// Descriptor for a [`RangeCurve`].
///
/// # Example
///
/// ```ignore
/// pub const GAIN_CURVE: CurveConfig = CurveConfig::new(-60.0, 0.0, 12.0)
///     .with_breakpoint(0.75)
///     .with_exponent(3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConfig {
    /// Lowest physical value.
    pub start: PlainValue,
    /// Physical value at the breakpoint (e.g. unity gain).
    pub zero_point: PlainValue,
    /// Highest physical value.
    pub end: PlainValue,
    /// Normalized position where the power segment hands over to the linear one.
    pub breakpoint: NormalizedValue,
    /// Shape of the power segment.
    pub exponent: f32,
    /// Slider step in physical units (0 disables interval snapping).
    pub interval: PlainValue,
    /// Display snapping tiers.
    pub quantize: QuantizeSteps,
}

impl CurveConfig {
    /// Default breakpoint fraction.
    pub const DEFAULT_BREAKPOINT: NormalizedValue = 0.7;
    /// Default power segment exponent.
    pub const DEFAULT_EXPONENT: f32 = 2.5;
    /// Default slider interval.
    pub const DEFAULT_INTERVAL: PlainValue = 0.001;

    /// Create a descriptor with default shape and snapping.
    pub const fn new(start: PlainValue, zero_point: PlainValue, end: PlainValue) -> Self {
        Self {
            start,
            zero_point,
            end,
            breakpoint: Self::DEFAULT_BREAKPOINT,
            exponent: Self::DEFAULT_EXPONENT,
            interval: Self::DEFAULT_INTERVAL,
            quantize: QuantizeSteps::new(-20.0, -6.0),
        }
    }

    /// Set the breakpoint fraction.
    pub const fn with_breakpoint(mut self, breakpoint: NormalizedValue) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Set the power segment exponent.
    pub const fn with_exponent(mut self, exponent: f32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Set the slider interval.
    pub const fn with_interval(mut self, interval: PlainValue) -> Self {
        self.interval = interval;
        self
    }

    /// Set the display snapping tiers.
    pub const fn with_quantize(mut self, quantize: QuantizeSteps) -> Self {
        self.quantize = quantize;
        self
    }

    fn validate(&self) -> ParameterResult<()> {
        let values = [
            self.start,
            self.zero_point,
            self.end,
            self.breakpoint,
            self.exponent,
            self.interval,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ParameterError::InvalidCurve(
                "all curve parameters must be finite".to_string(),
            ));
        }
        if self.start >= self.end {
            return Err(ParameterError::InvalidCurve(format!(
                "start {} must be below end {}",
                self.start, self.end
            )));
        }
        if self.zero_point < self.start || self.zero_point > self.end {
            return Err(ParameterError::InvalidCurve(format!(
                "zero point {} outside {}..={}",
                self.zero_point, self.start, self.end
            )));
        }
        if self.breakpoint <= 0.0 || self.breakpoint >= 1.0 {
            return Err(ParameterError::InvalidCurve(format!(
                "breakpoint {} must be strictly between 0 and 1",
                self.breakpoint
            )));
        }
        if self.exponent <= 0.0 {
            return Err(ParameterError::InvalidCurve(format!(
                "exponent {} must be positive",
                self.exponent
            )));
        }
        if self.interval < 0.0 {
            return Err(ParameterError::InvalidCurve(format!(
                "interval {} must not be negative",
                self.interval
            )));
        }
        self.quantize.validate()
    }
}

// =============================================================================
// RangeCurve
// =============================================================================

/// Two-segment curve between a slider position and a physical range.
///
/// Construction validates the descriptor once; every mapping call afterwards
/// is total and clamps its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeCurve {
    config: CurveConfig,
}

impl RangeCurve {
    /// Create a curve with default shape over `start..=end`.
    pub fn new(start: PlainValue, zero_point: PlainValue, end: PlainValue) -> ParameterResult<Self> {
        Self::from_config(CurveConfig::new(start, zero_point, end))
    }

    /// Create a curve from a full descriptor.
    pub fn from_config(config: CurveConfig) -> ParameterResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The descriptor this curve was built from.
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Lowest physical value.
    pub fn start(&self) -> PlainValue {
        self.config.start
    }

    /// Highest physical value.
    pub fn end(&self) -> PlainValue {
        self.config.end
    }

    /// Physical value at the breakpoint.
    pub fn zero_point(&self) -> PlainValue {
        self.config.zero_point
    }

    /// Map a slider position to a physical value.
    pub fn to_physical(&self, normalized: NormalizedValue) -> PlainValue {
        let c = &self.config;
        let n = if normalized.is_nan() {
            0.0
        } else {
            f64::from(normalized.clamp(0.0, 1.0))
        };
        let breakpoint = f64::from(c.breakpoint);
        let (start, zero, end) = (f64::from(c.start), f64::from(c.zero_point), f64::from(c.end));

        let plain = if n < breakpoint {
            let t = (n / breakpoint).powf(1.0 / f64::from(c.exponent));
            start + t * (zero - start)
        } else {
            let t = (n - breakpoint) / (1.0 - breakpoint);
            zero + t * (end - zero)
        };

        (plain as PlainValue).clamp(c.start, c.end)
    }

    /// Map a physical value to a slider position.
    pub fn to_normalized(&self, physical: PlainValue) -> NormalizedValue {
        let c = &self.config;
        if physical.is_nan() {
            return 0.0;
        }
        let v = f64::from(physical.clamp(c.start, c.end));
        let breakpoint = f64::from(c.breakpoint);
        let (start, zero, end) = (f64::from(c.start), f64::from(c.zero_point), f64::from(c.end));

        let normalized = if v < zero {
            let proportion = (v - start) / (zero - start);
            proportion.powf(f64::from(c.exponent)) * breakpoint
        } else if end > zero {
            breakpoint + (v - zero) / (end - zero) * (1.0 - breakpoint)
        } else {
            1.0
        };

        (normalized as NormalizedValue).clamp(0.0, 1.0)
    }

    /// Snap a physical value to its display tier, then clamp into range.
    pub fn quantize(&self, physical: PlainValue) -> PlainValue {
        let c = &self.config;
        if physical.is_nan() {
            return c.start;
        }
        let clamped = physical.clamp(c.start, c.end);
        c.quantize.snap(clamped).clamp(c.start, c.end)
    }

    /// Snap a physical value to the slider interval, measured from `start`.
    pub fn snap_to_interval(&self, physical: PlainValue) -> PlainValue {
        let c = &self.config;
        if physical.is_nan() {
            return c.start;
        }
        let clamped = physical.clamp(c.start, c.end);
        if c.interval <= 0.0 {
            return clamped;
        }
        let start = f64::from(c.start);
        let interval = f64::from(c.interval);
        let steps = ((f64::from(clamped) - start) / interval).round();
        ((start + steps * interval) as PlainValue).clamp(c.start, c.end)
    }
}

impl RangeMapper for RangeCurve {
    fn normalize(&self, plain: PlainValue) -> NormalizedValue {
        self.to_normalized(plain)
    }

    fn denormalize(&self, normalized: NormalizedValue) -> PlainValue {
        self.to_physical(normalized)
    }

    fn range(&self) -> (PlainValue, PlainValue) {
        (self.config.start, self.config.end)
    }
}
