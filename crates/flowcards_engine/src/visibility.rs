// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visibility gate: whether the widget is on screen.

/// Fraction of the widget that must intersect the viewport to count as visible
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Axis-aligned region in the host's layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    /// Left edge
    pub min_x: f64,
    /// Top edge
    pub min_y: f64,
    /// Right edge
    pub max_x: f64,
    /// Bottom edge
    pub max_y: f64,
}

impl Region {
    /// Region from its top-left corner and size
    pub fn from_min_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    /// Width, zero when inverted
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0)
    }

    /// Height, zero when inverted
    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).max(0.0)
    }

    /// Covered area
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Grown by `margin` on every side
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Overlap of both regions; inverted when they are disjoint
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Whether the regions touch or overlap
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// Tracks whether the widget region intersects the viewport.
///
/// The viewport is grown by a look-ahead margin first so animation can warm
/// up just before the widget scrolls into view. Starts hidden until the
/// first intersection signal arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityGate {
    visible: bool,
    margin: f64,
    threshold: f64,
}

impl VisibilityGate {
    /// Create a hidden gate with the given look-ahead margin
    pub fn new(margin: f64) -> Self {
        Self {
            visible: false,
            margin,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the intersection ratio threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Current visibility flag
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Share of `widget` inside the margin-expanded `viewport`
    pub fn intersection_ratio(&self, widget: Region, viewport: Region) -> f64 {
        let root = viewport.expand(self.margin);
        let area = widget.area();
        if area <= 0.0 {
            return if root.intersects(&widget) { 1.0 } else { 0.0 };
        }

        widget.intersect(&root).area() / area
    }

    /// Feed an intersection signal; returns the new flag if it changed
    pub fn observe(&mut self, widget: Region, viewport: Region) -> Option<bool> {
        let visible = self.intersection_ratio(widget, viewport) >= self.threshold;
        self.set(visible)
    }

    /// Set the flag directly; returns the new flag if it changed
    pub fn set(&mut self, visible: bool) -> Option<bool> {
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_VISIBILITY_MARGIN)
    }
}
