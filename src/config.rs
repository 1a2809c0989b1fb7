//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! We look for a folio.toml in the working directory and load settings from there, falling back
//! to defaults for anything missing. Command line flags override both.

use crate::viewport::{ObserverOptions, RootMargin, DEFAULT_MARGIN, DEFAULT_THRESHOLDS};
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File consulted by [`Config::load`].
pub const CONFIG_FILE: &str = "folio.toml";

/// Endpoint receiving contact form submissions unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/contact";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from folio.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum width of wrapped document text.
    pub wrap_width: usize,
    #[facet(default = 0)]
    /// Rows left above a section heading when navigating to it.
    pub header_offset: usize,
    #[facet(default = 450)]
    /// Duration of a smooth scroll.
    pub scroll_duration_ms: u64,
    #[facet(default = 400)]
    /// Delay before the compact navigation panel closes after a selection.
    pub panel_close_delay_ms: u64,
    #[facet(default = 5)]
    /// How long contact status messages stay on screen.
    pub status_dismiss_secs: u64,
    #[facet(default = 100)]
    /// Terminal widths below this collapse the sidebar into a toggleable panel.
    pub compact_width: u16,
    #[facet(default = 16)]
    /// Event loop tick.
    pub tick_ms: u64,
    #[facet(default = DEFAULT_ENDPOINT.to_string())]
    /// URL the contact form posts to.
    pub endpoint: String,
    #[facet(default = DEFAULT_THRESHOLDS.to_vec())]
    /// Visibility ratios at which sections are re-measured.
    pub thresholds: Vec<f64>,
    #[facet(default = DEFAULT_MARGIN)]
    /// Fraction of the viewport ignored at the top when measuring visibility.
    pub root_margin_top: f64,
    #[facet(default = DEFAULT_MARGIN)]
    /// Fraction of the viewport ignored at the bottom when measuring visibility.
    pub root_margin_bottom: f64,
    #[facet(default)]
    /// `light` or `dark`; detected from the terminal when unset.
    pub theme: Option<String>,
    #[facet(default)]
    /// Portfolio markdown file; the built-in page is shown when unset.
    pub content: Option<String>,
    #[facet(default)]
    /// CV file offered by the download button.
    pub resume_path: Option<String>,
    #[facet(default = ".".to_string())]
    /// Directory the CV is copied into.
    pub download_dir: String,
    #[facet(default)]
    /// File receiving tracing output; logging is off when unset.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            header_offset: 0,
            scroll_duration_ms: 450,
            panel_close_delay_ms: 400,
            status_dismiss_secs: 5,
            compact_width: 100,
            tick_ms: 16,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            root_margin_top: DEFAULT_MARGIN,
            root_margin_bottom: DEFAULT_MARGIN,
            theme: None,
            content: None,
            resume_path: None,
            download_dir: ".".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from folio.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| Self::parse(&contents))
            .unwrap_or_default()
    }

    #[must_use]
    /// Parses TOML, returning `None` if it does not describe a valid configuration.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    #[must_use]
    /// Observation settings for the visibility tracker.
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::new(
            self.thresholds.clone(),
            RootMargin {
                top: self.root_margin_top.clamp(0.0, 0.5),
                bottom: self.root_margin_bottom.clamp(0.0, 0.5),
            },
        )
    }

    #[must_use]
    /// Smooth scroll duration.
    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    #[must_use]
    /// Compact panel close delay.
    pub fn panel_close_delay(&self) -> Duration {
        Duration::from_millis(self.panel_close_delay_ms)
    }

    #[must_use]
    /// Contact status lifetime.
    pub fn status_dismiss(&self) -> Duration {
        Duration::from_secs(self.status_dismiss_secs)
    }

    #[must_use]
    /// Event loop tick.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
