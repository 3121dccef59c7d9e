//! Experience curves mapping accumulated xp to levels.

use crate::numbers::ratio_f64;

/// Item greatness stops growing at this level.
pub const MAX_ITEM_LEVEL: u16 = 20;

/// A deterministic xp to level curve.
///
/// Implementations must keep `level` at least 1 and non-decreasing in xp, and
/// `next_level_xp(level(xp))` above `xp` for every level below the cap.
pub trait LevelCurve {
    fn level(&self, xp: u32) -> u16;

    /// Total xp at which `level + 1` is reached.
    fn next_level_xp(&self, level: u16) -> u32;

    /// Fraction of the current level completed, within `[0, 1]`.
    fn progress(&self, xp: u32) -> f64;
}

/// Quadratic curve: level `n` starts at `n * n` xp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareRootCurve {
    pub max_level: u16,
}

impl SquareRootCurve {
    /// The curve items follow, capped at greatness 20.
    pub const ITEMS: Self = Self::capped(MAX_ITEM_LEVEL);

    #[must_use]
    pub const fn capped(max_level: u16) -> Self {
        let max_level = if max_level == 0 { 1 } else { max_level };
        Self { max_level }
    }

    fn floor_xp(level: u16) -> u32 {
        let level = u32::from(level);
        level.saturating_mul(level)
    }
}

impl Default for SquareRootCurve {
    fn default() -> Self {
        Self::ITEMS
    }
}

impl LevelCurve for SquareRootCurve {
    fn level(&self, xp: u32) -> u16 {
        let raw = xp.isqrt().max(1);
        u16::try_from(raw)
            .unwrap_or(u16::MAX)
            .min(self.max_level)
    }

    fn next_level_xp(&self, level: u16) -> u32 {
        let next = Self::floor_xp(level.saturating_add(1));
        next.min(Self::floor_xp(self.max_level))
    }

    fn progress(&self, xp: u32) -> f64 {
        let level = self.level(xp);
        if level >= self.max_level {
            return 1.0;
        }
        let floor = Self::floor_xp(level);
        let next = self.next_level_xp(level);
        ratio_f64(xp.saturating_sub(floor), next.saturating_sub(floor)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: SquareRootCurve = SquareRootCurve::ITEMS;

    #[test]
    fn level_floors_square_root_with_minimum_one() {
        assert_eq!(ITEMS.level(0), 1);
        assert_eq!(ITEMS.level(3), 1);
        assert_eq!(ITEMS.level(4), 2);
        assert_eq!(ITEMS.level(15), 3);
        assert_eq!(ITEMS.level(16), 4);
    }

    #[test]
    fn item_level_is_capped() {
        assert_eq!(ITEMS.level(399), 19);
        assert_eq!(ITEMS.level(400), 20);
        assert_eq!(ITEMS.level(1_000), 20);
        assert_eq!(ITEMS.next_level_xp(20), 400);
        assert!((ITEMS.progress(400) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn next_level_is_above_current_xp_below_cap() {
        for xp in 0..400 {
            let level = ITEMS.level(xp);
            assert!(ITEMS.next_level_xp(level) > xp, "xp {xp} level {level}");
        }
        assert_eq!(ITEMS.next_level_xp(3), 16);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = ITEMS.level(0);
        for xp in 1..2_000 {
            let level = ITEMS.level(xp);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn progress_is_fraction_of_current_band() {
        assert!((ITEMS.progress(12) - 3.0 / 7.0).abs() < 1e-9);
        assert!((ITEMS.progress(9) - 0.0).abs() < f64::EPSILON);
        for xp in 0..399 {
            let p = ITEMS.progress(xp);
            assert!((0.0..1.0).contains(&p), "xp {xp} progress {p}");
        }
    }

    #[test]
    fn uncapped_curve_keeps_growing() {
        let curve = SquareRootCurve::capped(u16::MAX);
        assert_eq!(curve.level(10_000), 100);
        assert_eq!(curve.next_level_xp(100), 10_201);
    }
}
