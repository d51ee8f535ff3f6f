use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Window};

use crate::dom;
use crate::error::EffectError;
use crate::observer::{ObserverOptions, VisibilityObserver};

const REVEALED: &str =
    ".feature-card, .pricing-card, .section-header, .stats-dashboard, .accuracy-showcase";
const STAT_CARDS: &str = ".hero-visual .stat-card";

const FADE_IN: &str = "fade-in";
const VISIBLE: &str = "visible";

const OBSERVER_OPTIONS: ObserverOptions = ObserverOptions {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
};

/// Displacement of the `index`th card for a pointer at `pointer` in a `viewport`-sized
/// window. Deeper cards move further.
pub fn parallax_offset(
    pointer: (f64, f64),
    viewport: (f64, f64),
    index: usize,
    divisor: f64,
    depth_step: f64,
) -> (f64, f64) {
    let move_x = (pointer.0 - viewport.0 / 2.0) / divisor;
    let move_y = (pointer.1 - viewport.1 / 2.0) / divisor;
    let depth = (index + 1) as f64 * depth_step;
    (move_x * depth, move_y * depth)
}

pub fn translate(offset: (f64, f64)) -> String {
    format!("translate({}px, {}px)", offset.0, offset.1)
}

pub struct ScrollReveal {
    _observer: Option<VisibilityObserver>,
    _parallax: Option<EventListener>,
}

impl ScrollReveal {
    pub fn install(
        window: &Window,
        document: &Document,
        divisor: f64,
        depth_step: f64,
    ) -> Result<Self, EffectError> {
        let observer = Self::install_reveal(document)?;
        let parallax = Self::install_parallax(window, document, divisor, depth_step);
        Ok(Self {
            _observer: observer,
            _parallax: parallax,
        })
    }

    fn install_reveal(document: &Document) -> Result<Option<VisibilityObserver>, EffectError> {
        let elements = dom::query_all(document, REVEALED);
        if elements.is_empty() {
            debug!("Scroll reveal skipped: nothing to reveal");
            return Ok(None);
        }
        for element in &elements {
            let _ = element.class_list().add_1(FADE_IN);
        }

        let observer = VisibilityObserver::once(OBSERVER_OPTIONS, |element: Element| {
            // One-way: nothing ever removes the marker.
            let _ = element.class_list().add_1(VISIBLE);
        })?;
        for element in &elements {
            observer.observe(element);
        }

        debug!("Scroll reveal installed on {} elements", elements.len());
        Ok(Some(observer))
    }

    fn install_parallax(
        window: &Window,
        document: &Document,
        divisor: f64,
        depth_step: f64,
    ) -> Option<EventListener> {
        let cards = dom::query_all(document, STAT_CARDS);
        if cards.is_empty() || !dom::supports_hover(window) {
            debug!("Parallax skipped");
            return None;
        }

        let window = window.clone();
        debug!("Parallax installed on {} cards", cards.len());
        Some(EventListener::new(document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = (f64::from(event.client_x()), f64::from(event.client_y()));
            let viewport = dom::viewport_size(&window);
            for (index, card) in cards.iter().enumerate() {
                let offset = parallax_offset(pointer, viewport, index, divisor, depth_step);
                dom::set_style(card, "transform", &translate(offset));
            }
        }))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::dom::testing;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn revealed_cards_stay_revealed() {
        let container = testing::mount(
            r#"
            <div class="feature-card" id="card"></div>
            <div class="pricing-card" id="plan"></div>
            <p id="plain"></p>
            "#,
        );
        let window = dom::window().unwrap();
        let document = dom::document().unwrap();
        let reveal = ScrollReveal::install(&window, &document, 50.0, 0.5).unwrap();
        let observer = reveal._observer.as_ref().unwrap();
        let card = document.get_element_by_id("card").unwrap();

        assert!(testing::has_class("#card", FADE_IN));
        assert!(testing::has_class("#plan", FADE_IN));
        assert!(!testing::has_class("#plain", FADE_IN));
        assert!(!testing::has_class("#card", VISIBLE));

        observer.notify(&card, true);
        assert!(testing::has_class("#card", VISIBLE));

        observer.notify(&card, false);
        observer.notify(&card, true);
        assert!(testing::has_class("#card", VISIBLE));
        assert!(testing::has_class("#card", FADE_IN));
        assert!(!testing::has_class("#plan", VISIBLE));

        drop(reveal);
        assert!(testing::has_class("#card", VISIBLE));
        container.remove();
    }
}
