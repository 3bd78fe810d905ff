//! Slideshow binding: performs the viewer's effects and renders its state
//! into the dialog shell.

use super::{RuntimeError, dom};
use crate::payload::{GalleryPayload, SlidePayload};
use crate::widgets::{Effect, Input, Key, SlideState, SlideshowSettings, TimerToken, Viewer};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent};

/// An off-screen image request and its load/error subscriptions.
struct Preload {
    _image: HtmlImageElement,
    _listeners: [EventListener; 2],
}

pub struct SlideshowView {
    viewer: RefCell<Viewer>,
    galleries: BTreeMap<String, GalleryPayload>,
    document: Document,
    root: HtmlElement,
    title: Element,
    image: HtmlImageElement,
    spinner: HtmlElement,
    error: HtmlElement,
    counter: Element,
    keyboard: RefCell<Option<EventListener>>,
    timers: RefCell<BTreeMap<TimerToken, Timeout>>,
    preloads: RefCell<BTreeMap<usize, Preload>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl SlideshowView {
    pub fn mount(
        document: &Document,
        settings: SlideshowSettings,
        galleries: BTreeMap<String, GalleryPayload>,
    ) -> Result<Rc<Self>, RuntimeError> {
        let view = Rc::new(Self {
            viewer: RefCell::new(Viewer::new(settings)),
            galleries,
            document: document.clone(),
            root: dom::query(document, "#slideshow")?,
            title: dom::query(document, "#slideshow-title")?,
            image: dom::query(document, ".slideshow-image")?,
            spinner: dom::query(document, ".slideshow-spinner")?,
            error: dom::query(document, ".slideshow-error")?,
            counter: dom::query(document, ".slideshow-counter")?,
            keyboard: RefCell::new(None),
            timers: RefCell::new(BTreeMap::new()),
            preloads: RefCell::new(BTreeMap::new()),
            listeners: RefCell::new(Vec::new()),
        });
        view.install_listeners(document)?;
        Ok(view)
    }

    /// Open on a project's first screenshot.
    pub fn open(self: &Rc<Self>, project_id: &str) {
        let count = self
            .galleries
            .get(project_id)
            .map_or(0, |g| g.images.len());
        self.preloads.borrow_mut().clear();
        let effects = self.viewer.borrow_mut().open(project_id, count);
        self.apply(effects);
        self.render();
    }

    fn dispatch(self: &Rc<Self>, input: Input) {
        let effects = self.viewer.borrow_mut().handle(input);
        self.apply(effects);
        if !self.viewer.borrow().is_open() {
            self.preloads.borrow_mut().clear();
        }
        self.render();
    }

    fn current_gallery(&self) -> Option<&GalleryPayload> {
        let viewer = self.viewer.borrow();
        let id = viewer.current()?.project_id().to_owned();
        self.galleries.get(&id)
    }

    fn slide(&self, index: usize) -> Option<&SlidePayload> {
        self.current_gallery()?.images.get(index)
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ListenKeyboard => {
                    let listener = self.keyboard_listener();
                    *self.keyboard.borrow_mut() = Some(listener);
                }
                Effect::UnlistenKeyboard => {
                    self.keyboard.borrow_mut().take();
                }
                Effect::Preload(index) => self.preload(index),
                Effect::StartTimer { token, after_ms } => {
                    let view = Rc::clone(self);
                    let timeout = Timeout::new(after_ms, move || {
                        view.timers.borrow_mut().remove(&token);
                        view.dispatch(Input::TimedOut(token));
                    });
                    self.timers.borrow_mut().insert(token, timeout);
                }
                Effect::CancelTimer(token) => {
                    self.timers.borrow_mut().remove(&token);
                }
            }
        }
    }

    fn keyboard_listener(self: &Rc<Self>) -> EventListener {
        let view = Rc::clone(self);
        EventListener::new_with_options(
            &self.document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = Key::from_key_name(&event.key());
                if key != Key::Other {
                    event.prevent_default();
                    view.dispatch(Input::Key(key));
                }
            },
        )
    }

    fn preload(self: &Rc<Self>, index: usize) {
        let Some(url) = self.slide(index).map(|s| s.url.clone()) else {
            return;
        };
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                log::warn!("cannot create preload image: {e:?}");
                return;
            }
        };

        let view = Rc::clone(self);
        let on_load = EventListener::new(&image, "load", move |_| {
            view.dispatch(Input::ImageLoaded(index));
        });
        let view = Rc::clone(self);
        let on_error = EventListener::new(&image, "error", move |_| {
            view.dispatch(Input::ImageFailed(index));
        });
        image.set_src(&url);

        self.preloads.borrow_mut().insert(
            index,
            Preload {
                _image: image,
                _listeners: [on_load, on_error],
            },
        );
    }

    fn render(&self) {
        let (state, index, counter) = {
            let viewer = self.viewer.borrow();
            match viewer.current() {
                Some(show) => (show.slide_state(), show.index(), show.counter()),
                None => {
                    dom::show(&self.root, false);
                    if let Some(body) = self.document.body() {
                        dom::set_class(&body, "slideshow-open", false);
                    }
                    self.image.remove_attribute("src").ok();
                    return;
                }
            }
        };

        dom::show(&self.root, true);
        if let Some(body) = self.document.body() {
            dom::set_class(&body, "slideshow-open", true);
        }
        let title = self.current_gallery().map(|g| g.title.clone());
        self.title.set_text_content(title.as_deref());
        self.counter.set_text_content(Some(&counter));

        match self.slide(index) {
            Some(slide) if state.requests_image() => {
                if self.image.get_attribute("src").as_deref() != Some(slide.url.as_str()) {
                    self.image.set_src(&slide.url);
                }
                self.image.set_alt(&slide.alt);
            }
            // A hidden <img> still fetches its src.
            _ => {
                self.image.remove_attribute("src").ok();
            }
        }

        dom::show(&self.spinner, state == SlideState::Loading);
        dom::show(&self.error, state == SlideState::Failed);
        dom::show(&self.image, state != SlideState::Failed);
    }

    fn install_listeners(self: &Rc<Self>, document: &Document) -> Result<(), RuntimeError> {
        let controls: [(&'static str, Input); 4] = [
            (".slideshow-close", Input::Close),
            (".slideshow-prev", Input::Previous),
            (".slideshow-next", Input::Next),
            ("[data-slideshow-backdrop]", Input::BackdropClick),
        ];
        let mut listeners = Vec::new();
        for (selector, input) in controls {
            let element: Element = dom::query(document, selector)?;
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&element, "click", move |_| {
                view.dispatch(input);
            }));
        }
        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }
}
