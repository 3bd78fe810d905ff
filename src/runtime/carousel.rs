//! Carousel binding: animation-frame auto-scroll plus mouse and touch drag.

use super::slideshow::SlideshowView;
use super::{RuntimeError, dom};
use crate::widgets::{Carousel, CarouselSettings, Viewport};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

pub struct CarouselView {
    state: RefCell<Carousel>,
    scroller: HtmlElement,
    viewer: Rc<SlideshowView>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl CarouselView {
    pub fn mount(
        document: &Document,
        projects: Vec<String>,
        settings: CarouselSettings,
        viewer: Rc<SlideshowView>,
    ) -> Result<Rc<Self>, RuntimeError> {
        let scroller: HtmlElement = dom::query(document, "[data-carousel]")?;
        let view = Rc::new(Self {
            state: RefCell::new(Carousel::new(projects, settings)),
            scroller,
            viewer,
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        view.install_listeners();
        view.ensure_frame();
        Ok(view)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            f64::from(self.scroller.scroll_width()),
            f64::from(self.scroller.client_width()),
        )
    }

    fn apply_offset(&self, offset: f64) {
        self.scroller.set_scroll_left(offset.round() as i32);
    }

    /// Pick up native scrolling (wheel, trackpad) done while paused.
    fn resync(&self) {
        let actual = f64::from(self.scroller.scroll_left());
        self.state.borrow_mut().sync_offset(actual);
    }

    fn ensure_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() || !self.state.borrow().is_auto_scrolling() {
            return;
        }
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            view.frame.borrow_mut().take();
            view.on_frame();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn stop_frame(&self) {
        self.frame.borrow_mut().take();
    }

    fn on_frame(self: &Rc<Self>) {
        let viewport = self.viewport();
        let offset = self.state.borrow_mut().tick(viewport);
        self.apply_offset(offset);
        self.ensure_frame();
    }

    fn press(&self, x: f64) {
        self.stop_frame();
        self.resync();
        self.state.borrow_mut().pointer_down(x);
        dom::set_class(&self.scroller, "is-dragging", true);
    }

    fn drag(&self, x: f64) {
        let viewport = self.viewport();
        let moved = self.state.borrow_mut().pointer_move(x, viewport);
        if let Some(offset) = moved {
            self.apply_offset(offset);
        }
    }

    fn release(&self) {
        self.state.borrow_mut().pointer_up();
        dom::set_class(&self.scroller, "is-dragging", false);
    }

    fn leave(self: &Rc<Self>) {
        self.state.borrow_mut().pointer_leave();
        dom::set_class(&self.scroller, "is-dragging", false);
        self.resync();
        self.ensure_frame();
    }

    /// Open the slideshow for the card containing `target`, unless the
    /// press that produced the click was a drag.
    fn activate(&self, target: Option<&Element>) {
        let Some(card) = target.and_then(|t| t.closest(".project-card").ok().flatten()) else {
            return;
        };
        let Some(index) = dom::data_index(&card, "data-card-index") else {
            return;
        };
        let selected = self.state.borrow().select(index).map(str::to_owned);
        if let Some(project_id) = selected {
            self.viewer.open(&project_id);
        }
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        let target = self.scroller.clone();

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "mouseenter", move |_| {
            view.state.borrow_mut().pointer_enter();
            view.stop_frame();
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "mouseleave", move |_| {
            view.leave();
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &target,
            "mousedown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if event.button() != 0 {
                    return;
                }
                // Keeps the browser from starting an image drag.
                event.prevent_default();
                view.press(f64::from(event.page_x()));
            },
        ));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "mousemove", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                view.drag(f64::from(event.page_x()));
            }
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "mouseup", move |_| {
            view.release();
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "touchstart", move |event: &Event| {
            if let Some(x) = first_touch_x(event) {
                view.state.borrow_mut().pointer_enter();
                view.press(x);
            }
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "touchmove", move |event: &Event| {
            if let Some(x) = first_touch_x(event) {
                view.drag(x);
            }
        }));

        // Touch has no hover: lifting the finger also resumes auto-scroll.
        for name in ["touchend", "touchcancel"] {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&target, name, move |_| {
                view.release();
                view.leave();
            }));
        }

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&target, "click", move |event: &Event| {
            let element = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            view.activate(element.as_ref());
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &target,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if matches!(key_event.key().as_str(), "Enter" | " ") {
                    key_event.prevent_default();
                    let element = event.target().and_then(|t| t.dyn_into::<Element>().ok());
                    view.activate(element.as_ref());
                }
            },
        ));

        *self.listeners.borrow_mut() = listeners;
    }
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.page_x()))
}
