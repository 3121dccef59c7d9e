//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Ratio of two counters as a f64, returning 0.0 when the denominator is zero.
#[must_use]
pub fn ratio_f64(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    f64::from(numerator) / f64::from(denominator)
}

/// Convert a `[0, 1]` fraction into a whole percentage, clamped to `0..=100`.
///
/// Non-finite input maps to 0.
#[must_use]
pub fn fraction_to_percent(fraction: f64) -> u8 {
    if !fraction.is_finite() {
        return 0;
    }
    let scaled = (fraction.clamp(0.0, 1.0) * 100.0).round();
    cast::<f64, u8>(scaled).unwrap_or(0)
}
