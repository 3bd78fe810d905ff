//! Data handed from the generated page to the browser runtime.
//!
//! The generate stage serializes a [`RuntimePayload`] into
//! `<script type="application/json" id="devfolio-data">`; the wasm runtime
//! reads it back on start. It carries the widget settings from `config.toml`
//! and, per project, the ordered slideshow images with their published URLs.

use crate::widgets::{CarouselSettings, SlideshowSettings, VisibilitySettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `id` of the script element holding the payload.
pub const PAYLOAD_ELEMENT_ID: &str = "devfolio-data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimePayload {
    pub carousel: CarouselSettings,
    pub slideshow: SlideshowSettings,
    pub timeline: VisibilitySettings,
    /// Carousel item ids in display order.
    pub projects: Vec<String>,
    /// Slideshow content keyed by project id.
    pub galleries: BTreeMap<String, GalleryPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPayload {
    pub title: String,
    pub images: Vec<SlidePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlidePayload {
    pub url: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl RuntimePayload {
    /// JSON safe to inline in a `<script>` element: every `<` is escaped so
    /// no string value can close the element early.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace('<', "\\u003c"))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn gallery(&self, project_id: &str) -> Option<&GalleryPayload> {
        self.galleries.get(project_id)
    }
}
