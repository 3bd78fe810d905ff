//! Browser runtime: binds the widget state machines to the generated page.
//!
//! Built only for `wasm32`. The page imports the wasm-bindgen module and
//! calls its default export, which runs [`start`]. Everything it needs comes
//! from the JSON payload the generate stage embedded in the page.
//!
//! Each binding owns its listeners, timers and animation-frame handles as
//! gloo RAII values; dropping a handle unsubscribes it. The mounted bindings
//! are parked in a thread-local for the life of the page.

mod carousel;
mod dom;
mod progress;
mod slideshow;
mod timeline;

use crate::payload::{PAYLOAD_ELEMENT_ID, RuntimePayload};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;

pub use carousel::CarouselView;
pub use progress::ProgressView;
pub use slideshow::SlideshowView;
pub use timeline::TimelineView;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("no window or document")]
    NoDocument,
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for RuntimeError {
    fn from(value: JsValue) -> Self {
        RuntimeError::Dom(format!("{value:?}"))
    }
}

/// Everything mounted on the page.
struct Page {
    _progress: Rc<ProgressView>,
    _carousel: Option<Rc<CarouselView>>,
    _slideshow: Rc<SlideshowView>,
    _timeline: Option<TimelineView>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Warn).ok();

    match mount() {
        Ok(page) => PAGE.with(|slot| *slot.borrow_mut() = Some(page)),
        Err(e) => log::error!("devfolio runtime failed to start: {e}"),
    }
}

fn mount() -> Result<Page, RuntimeError> {
    let document = dom::document()?;
    let payload_text = document
        .get_element_by_id(PAYLOAD_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .ok_or(RuntimeError::MissingElement("#devfolio-data"))?;
    let payload = RuntimePayload::from_json(&payload_text)?;

    let progress = ProgressView::mount(&document)?;
    let slideshow = SlideshowView::mount(&document, payload.slideshow, payload.galleries)?;

    // Pages without projects or experience simply lack these sections.
    let carousel = match CarouselView::mount(
        &document,
        payload.projects,
        payload.carousel,
        Rc::clone(&slideshow),
    ) {
        Ok(view) => Some(view),
        Err(RuntimeError::MissingElement(what)) => {
            log::debug!("no carousel on page ({what})");
            None
        }
        Err(e) => return Err(e),
    };
    let timeline = match TimelineView::mount(&document, &payload.timeline) {
        Ok(view) => Some(view),
        Err(e) => {
            // Entries keep whatever class the page rendered them with.
            log::warn!("timeline animations disabled: {e}");
            None
        }
    };

    Ok(Page {
        _progress: progress,
        _carousel: carousel,
        _slideshow: slideshow,
        _timeline: timeline,
    })
}
