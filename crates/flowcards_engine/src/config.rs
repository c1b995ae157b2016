// SPDX-License-Identifier: MIT OR Apache-2.0
//! Carousel configuration and derived strip geometry.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Default width of one item
pub const DEFAULT_ITEM_WIDTH: f64 = 320.0;
/// Default gap between items
pub const DEFAULT_GAP: f64 = 24.0;
/// Default autoplay speed (units per frame)
pub const DEFAULT_SPEED: f64 = 1.0;
/// Default gesture delta multiplier
pub const DEFAULT_DRAG_SENSITIVITY: f64 = 1.0;
/// Default look-ahead margin around the widget for visibility checks
pub const DEFAULT_VISIBILITY_MARGIN: f64 = 50.0;

/// Carousel configuration, fixed for the mounted lifetime of a widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Width of one item
    pub item_width: f64,
    /// Gap between adjacent items
    pub gap: f64,
    /// Offset units subtracted per frame while autoplay runs
    pub speed: f64,
    /// Whether the autoplay driver runs at all
    pub auto_play: bool,
    /// Multiplier applied to raw gesture deltas
    pub drag_sensitivity: f64,
    /// Margin added around the widget region before intersecting it with the viewport
    pub visibility_margin: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_width: DEFAULT_ITEM_WIDTH,
            gap: DEFAULT_GAP,
            speed: DEFAULT_SPEED,
            auto_play: true,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            visibility_margin: DEFAULT_VISIBILITY_MARGIN,
        }
    }
}

impl CarouselConfig {
    /// Set the item width
    pub fn with_item_width(mut self, item_width: f64) -> Self {
        self.item_width = item_width;
        self
    }

    /// Set the gap between items
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the autoplay speed
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Enable or disable autoplay
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Set the drag sensitivity
    pub fn with_drag_sensitivity(mut self, drag_sensitivity: f64) -> Self {
        self.drag_sensitivity = drag_sensitivity;
        self
    }

    /// Distance from one item's start to the next one's start
    pub fn stride(&self) -> f64 {
        self.item_width + self.gap
    }

    /// Check every numeric option
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.stride() <= 0.0 {
            return Err(ConfigError::ZeroStride);
        }

        Ok(())
    }

    /// Replace every invalid option with its default.
    ///
    /// The engine never fails on configuration; it degrades to defaults
    /// and logs what it replaced.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let fix = |field: &'static str, value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                tracing::warn!(field, value, fallback, "invalid carousel option replaced");
                fallback
            }
        };

        let mut config = Self {
            item_width: fix("item_width", self.item_width, defaults.item_width),
            gap: fix("gap", self.gap, defaults.gap),
            speed: fix("speed", self.speed, defaults.speed),
            auto_play: self.auto_play,
            drag_sensitivity: fix(
                "drag_sensitivity",
                self.drag_sensitivity,
                defaults.drag_sensitivity,
            ),
            visibility_margin: fix(
                "visibility_margin",
                self.visibility_margin,
                defaults.visibility_margin,
            ),
        };

        if config.stride() <= 0.0 {
            tracing::warn!("zero stride, falling back to default item width");
            config.item_width = defaults.item_width;
        }

        config
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("item_width", self.item_width),
            ("gap", self.gap),
            ("speed", self.speed),
            ("drag_sensitivity", self.drag_sensitivity),
            ("visibility_margin", self.visibility_margin),
        ]
    }
}

/// Strip geometry derived once from the configuration and the item count.
///
/// Reused by every tick and pointer move; only rebuilt when the item list
/// changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Item width plus gap
    pub stride: f64,
    /// `count * stride`, one full loop of unique content
    pub total_width: f64,
    /// Number of distinct items
    pub count: usize,
}

impl Geometry {
    /// Derive geometry for `count` distinct items
    pub fn new(config: &CarouselConfig, count: usize) -> Self {
        let stride = config.stride();
        Self {
            stride,
            total_width: count as f64 * stride,
            count,
        }
    }

    /// Whether offsets may be wrapped or rebased.
    ///
    /// A zero total width disables every modulo and rebase step.
    pub fn wraps(&self) -> bool {
        self.count > 0 && self.total_width > 0.0
    }
}
