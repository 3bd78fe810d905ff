//! Small DOM lookups shared by the bindings.

use super::RuntimeError;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window, RuntimeError> {
    web_sys::window().ok_or(RuntimeError::NoDocument)
}

pub fn document() -> Result<Document, RuntimeError> {
    window()?.document().ok_or(RuntimeError::NoDocument)
}

/// First element matching `selector`, as the requested element type.
pub fn query<T: JsCast>(root: &Document, selector: &'static str) -> Result<T, RuntimeError> {
    root.query_selector(selector)?
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(RuntimeError::MissingElement(selector))
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>, RuntimeError> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(e) = el.class_list().toggle_with_force(class, on) {
        log::debug!("class toggle failed: {e:?}");
    }
}

/// Parse a numeric `data-*` attribute.
pub fn data_index(el: &Element, attribute: &str) -> Option<usize> {
    el.get_attribute(attribute)?.parse().ok()
}

pub fn show(el: &HtmlElement, visible: bool) {
    el.set_hidden(!visible);
}
