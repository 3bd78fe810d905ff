//! Scroll-progress bar, updated at most once per animation frame.

use super::{RuntimeError, dom};
use crate::widgets::scroll_progress;
use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, HtmlElement, Window};

pub struct ProgressView {
    window: Window,
    document: Document,
    bar: HtmlElement,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ProgressView {
    pub fn mount(document: &Document) -> Result<Rc<Self>, RuntimeError> {
        let view = Rc::new(Self {
            window: dom::window()?,
            document: document.clone(),
            bar: dom::query(document, ".scroll-progress-bar")?,
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        let mut listeners = Vec::new();
        for name in ["scroll", "resize"] {
            let handler = Rc::clone(&view);
            listeners.push(EventListener::new(&view.window, name, move |_| {
                handler.schedule();
            }));
        }
        *view.listeners.borrow_mut() = listeners;
        view.update();
        Ok(view)
    }

    fn schedule(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            view.frame.borrow_mut().take();
            view.update();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn update(&self) {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .document_element()
            .map_or(0.0, |el| f64::from(el.scroll_height()));

        let percent = scroll_progress(scroll_y, document_height, viewport_height);
        if let Err(e) = self
            .bar
            .style()
            .set_property("width", &format!("{percent:.2}%"))
        {
            log::debug!("progress bar update failed: {e:?}");
        }
    }
}
