//! Project carousel controller.
//!
//! The strip renders every project twice, end to end. Auto-scroll advances the
//! offset a fixed step per animation frame and snaps back to zero once the
//! first copy has scrolled out of view; because the second copy is literally
//! the same content, the snap is invisible and the strip appears to loop.
//!
//! ```text
//! [ A B C D | A B C D ]
//!   ^ offset 0
//!             ^ reset point (single-copy width)
//! ```
//!
//! Hovering or dragging freezes auto-scroll. A drag maps pointer travel to
//! offset at `drag_sensitivity`×, and a press that travelled further than
//! `click_slop` pixels does not count as a click on the card underneath.

use serde::{Deserialize, Serialize};

/// Carousel tuning, loaded from the `[carousel]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselSettings {
    /// Offset advanced per animation frame while auto-scrolling.
    pub scroll_step: f64,
    /// Multiplier applied to pointer travel while dragging.
    pub drag_sensitivity: f64,
    /// Maximum pointer travel (px) for a press to still select a card.
    pub click_slop: f64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            scroll_step: 0.5,
            drag_sensitivity: 2.0,
            click_slop: 5.0,
        }
    }
}

/// Scroll geometry of the carousel viewport, sampled by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Total scrollable width of the doubled strip.
    pub content_width: f64,
    /// Visible width of the viewport.
    pub client_width: f64,
}

impl Viewport {
    pub fn new(content_width: f64, client_width: f64) -> Self {
        Self {
            content_width,
            client_width,
        }
    }

    /// Largest offset the viewport can scroll to.
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.client_width).max(0.0)
    }

    /// Width of a single copy of the strip.
    pub fn loop_width(&self) -> f64 {
        (self.content_width / 2.0).max(0.0)
    }

    /// Offset at which auto-scroll snaps back to zero.
    ///
    /// Capped at [`max_offset`](Self::max_offset): a strip narrower than one
    /// and a half viewports never reaches the single-copy width, and the
    /// browser would clamp the offset there forever.
    pub fn reset_point(&self) -> f64 {
        self.loop_width().min(self.max_offset())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer_x: f64,
    origin_offset: f64,
}

/// Carousel state over an ordered list of project ids.
#[derive(Debug, Clone)]
pub struct Carousel {
    ids: Vec<String>,
    settings: CarouselSettings,
    offset: f64,
    hovered: bool,
    drag: Option<DragAnchor>,
    /// Furthest the pointer got from the anchor during the last press.
    travelled: f64,
}

impl Carousel {
    pub fn new(ids: Vec<String>, settings: CarouselSettings) -> Self {
        Self {
            ids,
            settings,
            offset: 0.0,
            hovered: false,
            drag: None,
            travelled: 0.0,
        }
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// Number of distinct items.
    pub fn item_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of rendered cards: every item twice.
    pub fn card_count(&self) -> usize {
        self.ids.len() * 2
    }

    /// Item id behind a rendered card. Both copies map to the same id.
    pub fn card_id(&self, card: usize) -> Option<&str> {
        if card >= self.card_count() {
            return None;
        }
        Some(self.ids[card % self.ids.len()].as_str())
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the animation-frame loop should be running.
    pub fn is_auto_scrolling(&self) -> bool {
        !self.ids.is_empty() && !self.hovered && self.drag.is_none()
    }

    /// Replace the offset with the viewport's actual position.
    ///
    /// The viewport can also be scrolled natively (wheel, trackpad) while
    /// auto-scroll is paused; the host resyncs before resuming.
    pub fn sync_offset(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
    }

    /// Advance one animation frame. Returns the new offset.
    pub fn tick(&mut self, viewport: Viewport) -> f64 {
        if !self.is_auto_scrolling() {
            return self.offset;
        }
        let reset_point = viewport.reset_point();
        if reset_point <= 0.0 || self.offset >= reset_point {
            self.offset = 0.0;
        } else {
            self.offset += self.settings.scroll_step;
        }
        self.offset
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    /// Pointer left the carousel: ends any drag and clears hover.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.drag = None;
    }

    /// Press (mouse down or touch start) at page x-coordinate `x`.
    pub fn pointer_down(&mut self, x: f64) {
        self.drag = Some(DragAnchor {
            pointer_x: x,
            origin_offset: self.offset,
        });
        self.travelled = 0.0;
    }

    /// Pointer moved to `x`. Returns the new offset while dragging.
    pub fn pointer_move(&mut self, x: f64, viewport: Viewport) -> Option<f64> {
        let anchor = self.drag?;
        let delta = x - anchor.pointer_x;
        self.travelled = self.travelled.max(delta.abs());
        let offset = anchor.origin_offset - delta * self.settings.drag_sensitivity;
        self.offset = offset.clamp(0.0, viewport.max_offset());
        Some(self.offset)
    }

    /// Release (mouse up or touch end).
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Click on a rendered card. Returns the id to open, if the click counts.
    ///
    /// Clicks that land mid-drag or that finish a press which travelled past
    /// `click_slop` are swallowed.
    pub fn select(&self, card: usize) -> Option<&str> {
        if self.drag.is_some() || self.travelled > self.settings.click_slop {
            return None;
        }
        self.card_id(card)
    }
}
