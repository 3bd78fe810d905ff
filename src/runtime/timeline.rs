//! Timeline binding: feeds `IntersectionObserver` samples to the tracker and
//! mirrors its transitions as the `is-visible` class.

use super::{RuntimeError, dom};
use crate::widgets::{IntersectionSample, Transition, VisibilitySettings, VisibilityTracker};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

const VISIBLE_CLASS: &str = "is-visible";

pub struct TimelineView {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
    _start: Timeout,
}

impl TimelineView {
    pub fn mount(document: &Document, settings: &VisibilitySettings) -> Result<Self, RuntimeError> {
        let entries = dom::query_all(document, ".timeline-entry")?;
        if entries.is_empty() {
            return Err(RuntimeError::MissingElement(".timeline-entry"));
        }
        let tracker = Rc::new(RefCell::new(VisibilityTracker::new(entries.len(), settings)));
        for (i, entry) in entries.iter().enumerate() {
            dom::set_class(entry, VISIBLE_CLASS, tracker.borrow().is_visible(i));
        }

        let targets = entries.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |records: js_sys::Array| {
            for record in records.iter() {
                let Ok(record) = record.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let Some(index) = dom::data_index(&record.target(), "data-index") else {
                    continue;
                };
                let sample = IntersectionSample {
                    index,
                    is_intersecting: record.is_intersecting(),
                    ratio: record.intersection_ratio(),
                };
                let transition = tracker.borrow_mut().observe(sample);
                match transition {
                    Some(Transition::Entered(i)) => toggle(&targets, i, true),
                    Some(Transition::Exited(i)) => toggle(&targets, i, false),
                    None => {}
                }
            }
        });

        let thresholds: js_sys::Array = settings.thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&thresholds);
        init.set_root_margin(&settings.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        // Observation starts once layout has settled.
        let start_observer = observer.clone();
        let start = Timeout::new(settings.observe_delay_ms, move || {
            for entry in &entries {
                start_observer.observe(entry);
            }
        });

        Ok(Self {
            observer,
            _callback: callback,
            _start: start,
        })
    }
}

impl Drop for TimelineView {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn toggle(entries: &[Element], index: usize, visible: bool) {
    if let Some(entry) = entries.get(index) {
        dom::set_class(entry, VISIBLE_CLASS, visible);
    }
}
