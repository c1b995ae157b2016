// SPDX-License-Identifier: MIT OR Apache-2.0
//! Brand theme for the showcase page.

use egui::{Color32, Rounding, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemePreset {
    /// Light page (default)
    #[default]
    Light,
    /// Dark page
    Dark,
}

impl ThemePreset {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Light => "Light",
            ThemePreset::Dark => "Dark",
        }
    }
}

/// Resolved page colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowcaseTheme {
    /// Preset the colors came from
    pub preset: ThemePreset,
    /// Brand red
    pub primary: Color32,
    /// Brand blue, used for links
    pub secondary: Color32,
    /// Highlight color
    pub accent: Color32,
    /// Lighter highlight for text on dark covers
    pub accent_light: Color32,
    /// Page background
    pub background: Color32,
    /// Card body
    pub card: Color32,
    /// Card border
    pub border: Color32,
    /// Body text
    pub text: Color32,
    /// Secondary text
    pub text_muted: Color32,
}

impl ShowcaseTheme {
    /// Colors for `preset`
    pub fn from_preset(preset: ThemePreset) -> Self {
        let primary = Color32::from_rgb(0xe0, 0x25, 0x25);
        let secondary = Color32::from_rgb(0x0f, 0x56, 0xd7);
        match preset {
            ThemePreset::Light => Self {
                preset,
                primary,
                secondary,
                accent: secondary,
                accent_light: Color32::from_rgb(0xea, 0xf6, 0xfb),
                background: Color32::from_rgb(0xf5, 0xf5, 0xf5),
                card: Color32::WHITE,
                border: Color32::from_gray(220),
                text: Color32::from_gray(20),
                text_muted: Color32::from_gray(110),
            },
            ThemePreset::Dark => Self {
                preset,
                primary,
                secondary: Color32::from_rgb(0x5a, 0x8d, 0xf0),
                accent: Color32::from_rgb(0x5a, 0x8d, 0xf0),
                accent_light: Color32::from_rgb(0xea, 0xf6, 0xfb),
                background: Color32::from_gray(18),
                card: Color32::from_gray(30),
                border: Color32::from_gray(55),
                text: Color32::from_gray(235),
                text_muted: Color32::from_gray(150),
            },
        }
    }

    /// Convert to egui Visuals
    pub fn to_egui_visuals(&self) -> Visuals {
        let mut visuals = match self.preset {
            ThemePreset::Light => Visuals::light(),
            ThemePreset::Dark => Visuals::dark(),
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.card;
        visuals.extreme_bg_color = self.card;
        visuals.faint_bg_color = self.border;
        visuals.hyperlink_color = self.secondary;
        visuals.selection.bg_fill = self.accent;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text);
        visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

        visuals
    }

    /// Apply to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.to_egui_visuals());
    }
}

impl Default for ShowcaseTheme {
    fn default() -> Self {
        Self::from_preset(ThemePreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_colors_shared_by_presets() {
        let light = ShowcaseTheme::from_preset(ThemePreset::Light);
        let dark = ShowcaseTheme::from_preset(ThemePreset::Dark);
        assert_eq!(light.primary, dark.primary);
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn test_visuals_follow_preset() {
        let visuals = ShowcaseTheme::from_preset(ThemePreset::Dark).to_egui_visuals();
        assert!(visuals.dark_mode);
        assert_eq!(visuals.panel_fill, Color32::from_gray(18));
    }
}
