use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, ScrollBehavior, ScrollToOptions, Window};

use crate::error::EffectError;

pub fn window() -> Result<Window, EffectError> {
    web_sys::window().ok_or(EffectError::NoWindow)
}

pub fn document() -> Result<Document, EffectError> {
    window()?.document().ok_or(EffectError::NoDocument)
}

/// Every element matching `selector`, in document order. An invalid selector yields none.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn as_html(element: &Element) -> Option<HtmlElement> {
    element.clone().dyn_into::<HtmlElement>().ok()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = as_html(element) {
        let _ = html.style().set_property(property, value);
    }
}

pub fn clear_style(element: &Element, property: &str) {
    if let Some(html) = as_html(element) {
        let _ = html.style().remove_property(property);
    }
}

pub fn data_attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", name))
}

/// Whether the primary pointer can hover, i.e. a mouse rather than a touch screen.
pub fn supports_hover(window: &Window) -> bool {
    window
        .match_media("(hover: hover)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

pub fn is_attached(document: &Document, element: &Element) -> bool {
    let node: &Node = element;
    document.contains(Some(node))
}

pub fn set_scroll_lock(document: &Document, locked: bool) {
    if let Some(body) = document.body() {
        let value = if locked { "hidden" } else { "" };
        let _ = body.style().set_property("overflow", value);
    }
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

#[cfg(all(test, target_arch = "wasm32"))]
pub mod testing {
    use web_sys::Element;

    /// Appends `markup` to the body inside a fresh container. Call `remove()` on the
    /// container when the test is done.
    pub fn mount(markup: &str) -> Element {
        let document = super::document().unwrap();
        let container = document.create_element("div").unwrap();
        container.set_inner_html(markup);
        document.body().unwrap().append_child(&container).unwrap();
        container
    }

    pub fn click(selector: &str) {
        let document = super::document().unwrap();
        let element = document.query_selector(selector).unwrap().unwrap();
        super::as_html(&element).unwrap().click();
    }

    pub fn has_class(selector: &str, class: &str) -> bool {
        let document = super::document().unwrap();
        let element = document.query_selector(selector).unwrap().unwrap();
        element.class_list().contains(class)
    }
}
