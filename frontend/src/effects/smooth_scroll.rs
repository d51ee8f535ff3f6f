use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use web_sys::{Document, Window};

use crate::dom;

const FRAGMENT_LINKS: &str = "a[href^=\"#\"]";

/// The selector an in-page link points at, or `None` for a bare `#`.
pub fn fragment_selector(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}

/// Document offset to scroll to so the target sits just below the fixed header.
pub fn scroll_target(viewport_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    viewport_top + page_offset - header_offset
}

pub struct SmoothScroll {
    _listeners: Vec<EventListener>,
}

impl SmoothScroll {
    pub fn install(window: &Window, document: &Document, header_offset: f64) -> Option<Self> {
        let anchors = dom::query_all(document, FRAGMENT_LINKS);
        if anchors.is_empty() {
            debug!("Smooth scroll skipped: no fragment links");
            return None;
        }

        let listeners: Vec<EventListener> = anchors
            .iter()
            .map(|anchor| {
                let window = window.clone();
                let document = document.clone();
                let link = anchor.clone();
                EventListener::new_with_options(
                    anchor,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        let href = link.get_attribute("href").unwrap_or_default();
                        let Some(selector) = fragment_selector(&href) else {
                            return;
                        };
                        // Fragments that are not valid selectors resolve to nothing.
                        let Ok(Some(target)) = document.query_selector(selector) else {
                            return;
                        };
                        let top = target.get_bounding_client_rect().top();
                        let page_offset = window.page_y_offset().unwrap_or(0.0);
                        dom::smooth_scroll_to(&window, scroll_target(top, page_offset, header_offset));
                    },
                )
            })
            .collect();

        debug!("Smooth scroll installed on {} links", listeners.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(fragment_selector("#"), None);
        assert_eq!(fragment_selector(""), None);
    }

    #[test]
    fn named_fragment_is_its_own_selector() {
        assert_eq!(fragment_selector("#pricing"), Some("#pricing"));
    }

    #[test]
    fn non_fragment_links_are_ignored() {
        assert_eq!(fragment_selector("/pricing#plans"), None);
    }

    #[test]
    fn subtracts_the_header_offset() {
        assert_eq!(scroll_target(250.0, 1200.0, 100.0), 1350.0);
        assert_eq!(scroll_target(-300.0, 1200.0, 100.0), 800.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::dom::testing;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn missing_target_neither_scrolls_nor_navigates() {
        let container = testing::mount(
            r##"
            <a href="#missing" id="to-missing">Missing</a>
            <a href="#" id="to-top">Top</a>
            <a href="#1abc" id="to-invalid">Invalid</a>
            "##,
        );
        let window = dom::window().unwrap();
        let document = dom::document().unwrap();
        let hash_before = window.location().hash().unwrap();
        let scroll_before = window.scroll_y().unwrap();

        let scroll = SmoothScroll::install(&window, &document, 100.0).unwrap();
        testing::click("#to-missing");
        testing::click("#to-top");
        testing::click("#to-invalid");

        assert_eq!(window.scroll_y().unwrap(), scroll_before);
        assert_eq!(window.location().hash().unwrap(), hash_before);

        drop(scroll);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn page_without_fragment_links_installs_nothing() {
        let container = testing::mount(r#"<a href="/pricing">Pricing</a>"#);
        let window = dom::window().unwrap();
        let document = dom::document().unwrap();

        assert!(SmoothScroll::install(&window, &document, 100.0).is_none());
        container.remove();
    }
}
