// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scroll state: the single horizontal offset driving the strip.

use crate::config::Geometry;

/// Tolerance used when comparing an accumulated offset against a wrap boundary
pub const WRAP_EPSILON: f64 = 1e-6;

/// The render-driving offset.
///
/// Every change bumps a revision so the presentation layer can tell when a
/// redraw is needed without diffing floats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: f64,
    revision: u64,
}

impl ScrollState {
    /// Create a scroll state at offset zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset; negative values move content leftward
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Revision counter, bumped on every change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set the offset directly
    pub fn set(&mut self, offset: f64) {
        if offset != self.offset {
            self.offset = offset;
            self.revision += 1;
        }
    }

    /// Advance leftward by `speed` and wrap into `(-total_width, 0]`.
    ///
    /// Wrapping keeps the remainder past the boundary instead of resetting
    /// to zero, so the offset stays congruent to the total distance moved.
    /// Returns `false` without touching the offset when the geometry does
    /// not wrap (no items or zero width).
    pub fn advance(&mut self, speed: f64, geometry: &Geometry) -> bool {
        if !geometry.wraps() {
            return false;
        }

        let mut next = self.offset - speed;
        let total = geometry.total_width;
        if next <= -total + WRAP_EPSILON {
            // Whole loops in one step; `rem_euclid` is exact for any finite value
            next = next.rem_euclid(total) - total;
            if next <= -total + WRAP_EPSILON {
                next += total;
            }
        }
        if next.abs() < WRAP_EPSILON {
            next = 0.0;
        }

        self.set(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;

    fn five_items() -> Geometry {
        Geometry::new(&CarouselConfig::default(), 5)
    }

    #[test]
    fn test_advance_without_wrap() {
        let mut scroll = ScrollState::new();
        assert!(scroll.advance(0.8, &five_items()));
        assert!((scroll.offset() + 0.8).abs() < 1e-12);
        assert_eq!(scroll.revision(), 1);
    }

    #[test]
    fn test_full_loop_lands_on_zero() {
        let geometry = five_items();
        let mut scroll = ScrollState::new();
        for _ in 0..2149 {
            scroll.advance(0.8, &geometry);
        }
        assert!(scroll.offset() < -1719.0);

        scroll.advance(0.8, &geometry);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_wrap_keeps_remainder() {
        let geometry = five_items();
        let mut scroll = ScrollState::new();
        scroll.set(-1719.5);
        scroll.advance(1.0, &geometry);
        assert!((scroll.offset() + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_advance_from_far_left() {
        let geometry = five_items();
        let mut scroll = ScrollState::new();
        scroll.set(-2000.0);
        scroll.advance(1.0, &geometry);
        assert!((scroll.offset() + 281.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_beyond_total_width() {
        let geometry = five_items();
        let mut scroll = ScrollState::new();
        scroll.advance(3.0 * 1720.0 + 10.0, &geometry);
        assert!((scroll.offset() + 10.0).abs() < 1e-9);

        scroll.set(0.0);
        assert!(scroll.advance(1e20, &geometry));
        assert!(scroll.offset().is_finite());
        assert!(scroll.offset() > -geometry.total_width);
        assert!(scroll.offset() <= 0.0);
    }

    #[test]
    fn test_no_wrap_geometry_is_static() {
        let empty = Geometry::new(&CarouselConfig::default(), 0);
        let mut scroll = ScrollState::new();
        assert!(!scroll.advance(1.0, &empty));
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.revision(), 0);
    }

    #[test]
    fn test_set_same_value_keeps_revision() {
        let mut scroll = ScrollState::new();
        scroll.set(0.0);
        assert_eq!(scroll.revision(), 0);
        scroll.set(-3.0);
        scroll.set(-3.0);
        assert_eq!(scroll.revision(), 1);
    }
}
