//! # Devfolio
//!
//! A single-page developer portfolio: hero, project carousel, screenshot
//! slideshow, skills grid and an experience timeline. Content lives in one
//! `portfolio.toml` plus a directory of screenshots per project; the native
//! binary turns it into `index.html`, and a small wasm module drives the
//! interactive widgets in the browser.
//!
//! # Architecture: Build Pipeline + Browser Runtime
//!
//! The native side processes content through three independent stages, each
//! producing a JSON manifest that the next stage consumes:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json            (portfolio.toml + screenshots → structured data)
//! 2. Process   manifest  →  dist/projects/, manifest (publish screenshots, read dimensions)
//! 3. Generate  manifest  →  dist/index.html          (final page)
//! ```
//!
//! The page embeds a JSON payload ([`payload`]) with widget settings and
//! gallery URLs. On `wasm32` the [`runtime`] module reads it and binds the
//! widgets to the DOM.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`widgets`] | DOM-free state machines: carousel, slideshow viewer, timeline visibility, scroll progress |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Portfolio content types shared between stages |
//! | [`naming`] | `NNN-name` screenshot ordering and alt text |
//! | [`assets`] | Image path template and runtime module URLs |
//! | [`payload`] | Page → runtime data handoff |
//! | `content` | `portfolio.toml` parsing and validation (native) |
//! | `scan` | Stage 1: reads content, produces the scan manifest (native) |
//! | `process` | Stage 2: publishes screenshots with a copy cache (native) |
//! | `generate` | Stage 3: renders `index.html` with Maud (native) |
//! | `cache` | Content-hash copy cache and file fingerprints (native) |
//! | `output` | CLI output formatting (native) |
//! | `runtime` | wasm-bindgen entry point and DOM bindings (wasm32) |
//!
//! # Design Decisions
//!
//! ## Sans-IO Widgets
//!
//! Each widget is a plain struct fed discrete inputs (frame ticks, pointer
//! events, key presses, image load results, intersection samples). Anything
//! that has to happen outside the state (preloading an image, arming a
//! timer, subscribing to the keyboard) comes back as a value for the caller
//! to perform. The same code is unit-tested natively and driven by the
//! browser runtime unchanged.
//!
//! ## Timer Tokens
//!
//! The slideshow races an image load against a timeout. Every armed timeout
//! carries a fresh [`widgets::TimerToken`]; a load result or timeout for a
//! token that is no longer current is ignored, so whichever fires second is
//! inert.
//!
//! ## Works Without the Runtime
//!
//! The generated page is complete HTML. Without wasm the carousel is a native
//! horizontal scroller and timeline entries render already visible.

pub mod assets;
pub mod config;
pub mod naming;
pub mod payload;
pub mod types;
pub mod widgets;

#[cfg(not(target_arch = "wasm32"))]
pub mod cache;
#[cfg(not(target_arch = "wasm32"))]
pub mod content;
#[cfg(not(target_arch = "wasm32"))]
pub mod generate;
#[cfg(not(target_arch = "wasm32"))]
pub mod output;
#[cfg(not(target_arch = "wasm32"))]
pub mod process;
#[cfg(not(target_arch = "wasm32"))]
pub mod scan;

#[cfg(target_arch = "wasm32")]
pub mod runtime;

#[cfg(test)]
pub(crate) mod test_helpers;
