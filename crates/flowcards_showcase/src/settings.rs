// SPDX-License-Identifier: MIT OR Apache-2.0
//! Showcase settings file.
//!
//! Holds everything the page is configured with:
//! - Carousel options (geometry, speed, autoplay, drag sensitivity)
//! - Card height
//! - Theme preset
//! - The featured issue deck

use crate::issues::{default_issues, FeaturedIssue};
use crate::theme::ThemePreset;
use flowcards_engine::{CarouselConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name looked up in the working directory
pub const SETTINGS_FILE_NAME: &str = "showcase.ron";

/// Autoplay speed used on the landing page
pub const LANDING_PAGE_SPEED: f64 = 0.8;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for the settings structure
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),

    /// The file was written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Carousel options are invalid
    #[error("Invalid carousel options: {0}")]
    Carousel(#[from] ConfigError),
}

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseSettings {
    /// Format version
    pub version: u32,
    /// Theme preset
    pub theme: ThemePreset,
    /// Carousel options
    pub carousel: CarouselConfig,
    /// Card height
    pub item_height: f32,
    /// Cards shown in the carousel
    pub issues: Vec<FeaturedIssue>,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            theme: ThemePreset::default(),
            carousel: CarouselConfig::default().with_speed(LANDING_PAGE_SPEED),
            item_height: 500.0,
            issues: default_issues(),
        }
    }
}

impl ShowcaseSettings {
    /// Parse settings from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        let settings: ShowcaseSettings = ron::from_str(text)?;

        // Version check
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }
        settings.carousel.validate()?;

        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Load settings from `path`, or the defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::info!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let settings = Self::load(path)?;
        tracing::info!(
            "Loaded settings from {:?} ({} issues)",
            path,
            settings.issues.len()
        );
        Ok(settings)
    }

    /// Serialize settings to pretty RON
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
