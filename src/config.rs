//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to `portfolio.toml` and is sparse: stock defaults are
//! overridden key by key with whatever the user sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [assets]
//! image_path_template = "projects/{id}/{file}"   # Published screenshot URLs
//! runtime_script = "pkg/devfolio.js"             # wasm-bindgen module
//!
//! [carousel]
//! scroll_step = 0.5          # Pixels advanced per animation frame
//! drag_sensitivity = 2.0     # Drag multiplier
//! click_slop = 5.0           # Max pointer travel for a press to count as a click
//!
//! [slideshow]
//! load_timeout_ms = 10000    # Wait before a slide is marked failed
//! preload_neighbors = true
//! retry_failed_on_revisit = false
//! close_on_backdrop = true
//!
//! [timeline]
//! enter_ratio = 0.1
//! exit_ratio = 0.05
//! thresholds = [0.0, 0.05, 0.1, 0.5]
//! root_margin = "50px 0px -50px 0px"
//! start_visible = true
//! observe_delay_ms = 100
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f5f5f7"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#2563eb"
//!
//! [colors.dark]
//! background = "#0b0d12"
//! surface = "#151922"
//! text = "#eeeeee"
//! text_muted = "#9aa0aa"
//! border = "#2a2f3a"
//! accent = "#60a5fa"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::widgets::{CarouselSettings, SlideshowSettings, VisibilitySettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where screenshots and the browser runtime are published.
    pub assets: AssetsConfig,
    /// Project carousel tuning.
    pub carousel: CarouselSettings,
    /// Slideshow viewer tuning.
    pub slideshow: SlideshowSettings,
    /// Timeline entrance tuning.
    pub timeline: VisibilitySettings,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.into()));

        let carousel = &self.carousel;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(carousel.scroll_step) {
            return invalid("carousel.scroll_step must be greater than 0");
        }
        if !positive(carousel.drag_sensitivity) {
            return invalid("carousel.drag_sensitivity must be greater than 0");
        }
        if carousel.click_slop.is_nan() || carousel.click_slop < 0.0 {
            return invalid("carousel.click_slop must not be negative");
        }

        if self.slideshow.load_timeout_ms == 0 {
            return invalid("slideshow.load_timeout_ms must be greater than 0");
        }

        let timeline = &self.timeline;
        let in_unit = |r: f64| (0.0..=1.0).contains(&r);
        if !in_unit(timeline.exit_ratio) || !in_unit(timeline.enter_ratio) {
            return invalid("timeline ratios must be within 0-1");
        }
        if timeline.exit_ratio > timeline.enter_ratio {
            return invalid("timeline.exit_ratio must not exceed timeline.enter_ratio");
        }
        if !timeline.thresholds.iter().copied().all(in_unit) {
            return invalid("timeline.thresholds must be within 0-1");
        }

        if !self.assets.image_path_template.contains("{file}") {
            return invalid("assets.image_path_template must contain {file}");
        }
        if self.assets.runtime_script.trim().is_empty() {
            return invalid("assets.runtime_script must not be empty");
        }
        Ok(())
    }
}

/// Publishing locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// URL template for screenshots. `{id}` is the project id and `{file}`
    /// the screenshot filename; both are percent-encoded.
    pub image_path_template: String,
    /// Path of the wasm-bindgen JS module, relative to the output root.
    pub runtime_script: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_path_template: "projects/{id}/{file}".to_string(),
            runtime_script: "pkg/devfolio.js".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Worker count for the process stage: every core unless `max_processes`
/// asks for fewer, and never zero.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Cards, timeline entries and the slideshow frame.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Subtitles, periods, captions.
    pub text_muted: String,
    pub border: String,
    /// Links, progress bar, focus rings.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f5f5f7".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0d12".to_string(),
            surface: "#151922".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#9aa0aa".to_string(),
            border: "#2a2f3a".to_string(),
            accent: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base` section by section.
///
/// Only tables merge. Any other overlay value replaces the base value, so
/// `timeline.thresholds = [0.25]` is the whole list afterwards.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// The content root's `config.toml` as raw TOML, or `None` when the site
/// runs on stock settings.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Devfolio Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to portfolio.toml in the content directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Published URL of each screenshot. {id} is the project id, {file} the
# screenshot filename. Local paths are copied into the output directory;
# http(s) templates point at an external host and nothing is copied.
# Relative URLs keep working when the site is served from a subpath.
image_path_template = "projects/{id}/{file}"

# wasm-bindgen module that drives the carousel, slideshow and timeline,
# relative to the output directory.
runtime_script = "pkg/devfolio.js"

# ---------------------------------------------------------------------------
# Project carousel
# ---------------------------------------------------------------------------
[carousel]
# Pixels advanced per animation frame while auto-scrolling.
scroll_step = 0.5

# Scroll distance per pixel of pointer drag.
drag_sensitivity = 2.0

# A press that travels further than this (px) is a drag, not a click.
click_slop = 5.0

# ---------------------------------------------------------------------------
# Slideshow viewer
# ---------------------------------------------------------------------------
[slideshow]
# Milliseconds to wait for a screenshot before showing the failure placeholder.
load_timeout_ms = 10000

# Also preload the previous and next screenshots.
preload_neighbors = true

# Re-request a failed screenshot when navigating back to it.
# When false, a failed slide stays failed until the viewer is reopened.
retry_failed_on_revisit = false

# Clicking outside the frame closes the viewer.
close_on_backdrop = true

# ---------------------------------------------------------------------------
# Timeline entrance animation
# ---------------------------------------------------------------------------
[timeline]
# An entry appears once more than this share of it is on screen...
enter_ratio = 0.1

# ...and disappears again below this share. Equal values give one cutoff.
exit_ratio = 0.05

# Ratios at which the browser reports intersection changes.
thresholds = [0.0, 0.05, 0.1, 0.5]

# Observer root margin (CSS margin syntax).
root_margin = "50px 0px -50px 0px"

# Render every entry visible until the first observation arrives.
start_visible = true

# Milliseconds to wait after load before observing.
observe_delay_ms = 100

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f5f5f7"       # Cards, timeline entries, slideshow frame
text = "#111111"
text_muted = "#666666"    # Subtitles, periods, captions
border = "#e0e0e0"
accent = "#2563eb"        # Links, progress bar

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0d12"
surface = "#151922"
text = "#eeeeee"
text_muted = "#9aa0aa"
border = "#2a2f3a"
accent = "#60a5fa"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for probing and copying screenshots.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-surface", &scheme.surface),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-accent", &scheme.accent),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
