// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flowcards Showcase - featured issues landing page
//!
//! A desktop page hosting the flowing-card carousel:
//! - Featured magazine issues scrolling in an endless strip
//! - Drag to scrub, hover to pause and focus a card
//! - Autoplay stops while the strip is scrolled out of view
//!
//! ## Usage
//!
//! `flowcards_showcase [SETTINGS.ron]`. Without an argument the page reads
//! `showcase.ron` from the working directory and falls back to built-in
//! defaults when that file does not exist. `--write-defaults` writes the
//! built-in defaults to `showcase.ron` and exits.

mod app;
mod issues;
mod page;
mod settings;
mod theme;

use app::ShowcaseApp;
use settings::{ShowcaseSettings, SETTINGS_FILE_NAME};
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "flowcards_showcase=debug,flowcards_engine=debug,wgpu=warn,naga=warn";

fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Flowcards Showcase v{}", env!("CARGO_PKG_VERSION"));

    let arg = std::env::args_os().nth(1);
    if arg.as_deref() == Some(OsStr::new("--write-defaults")) {
        let path = PathBuf::from(SETTINGS_FILE_NAME);
        if let Err(e) = ShowcaseSettings::default().save(&path) {
            tracing::error!("Failed to write {:?}: {e}", path);
            std::process::exit(1);
        }
        tracing::info!("Wrote default settings to {:?}", path);
        return;
    }

    let path = arg.map_or_else(|| PathBuf::from(SETTINGS_FILE_NAME), PathBuf::from);

    let result = ShowcaseSettings::load_or_default(&path)
        .map_err(app::ShowcaseError::from)
        .and_then(ShowcaseApp::run);

    if let Err(e) = result {
        tracing::error!("Showcase failed: {e}");
        std::process::exit(1);
    }
}
