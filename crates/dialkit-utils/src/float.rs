//! Float comparison helpers.

/// Compare two floats with a tolerance scaled to their magnitude.
///
/// The tolerance is one `f32::EPSILON` relative to the larger operand, and
/// never smaller than `f32::EPSILON` in absolute terms, so values near zero
/// still compare equal when they differ only by rounding noise.
///
/// # Examples
///
/// ```
/// use dialkit_utils::approx_eq;
///
/// assert!(approx_eq(0.1 + 0.2, 0.3));
/// assert!(!approx_eq(1.0, 1.001));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= f32::EPSILON * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_rounding_noise() {
        assert!(approx_eq(-60.0, -60.0));
        assert!(approx_eq(0.1 + 0.2, 0.3));
        let next_up = f32::from_bits(1000.0f32.to_bits() + 1);
        assert!(approx_eq(1000.0, next_up));
    }

    #[test]
    fn test_distinct_values() {
        assert!(!approx_eq(0.0, 0.001));
        assert!(!approx_eq(3.0, 2.9));
        assert!(!approx_eq(f32::NAN, f32::NAN));
    }

    #[test]
    fn test_infinities() {
        assert!(approx_eq(f32::NEG_INFINITY, f32::NEG_INFINITY));
        assert!(!approx_eq(f32::INFINITY, f32::NEG_INFINITY));
    }
}
