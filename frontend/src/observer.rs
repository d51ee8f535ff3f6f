use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::EffectError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be inside the viewport.
    pub threshold: f64,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: &'static str,
}

/// Runs the handler at most once per element, however many intersecting entries arrive.
struct FireOnce {
    fired: Vec<Element>,
    on_visible: Box<dyn FnMut(Element)>,
}

impl FireOnce {
    fn notify(&mut self, target: Element, intersecting: bool) -> bool {
        if !intersecting || self.fired.contains(&target) {
            return false;
        }
        self.fired.push(target.clone());
        (self.on_visible)(target);
        true
    }
}

/// Fires a handler the first time each observed element becomes visible, then stops
/// watching that element. Disconnects on drop.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    #[cfg(test)]
    gate: Rc<RefCell<FireOnce>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    pub fn once<F>(options: ObserverOptions, on_visible: F) -> Result<Self, EffectError>
    where
        F: FnMut(Element) + 'static,
    {
        let gate = Rc::new(RefCell::new(FireOnce {
            fired: Vec::new(),
            on_visible: Box::new(on_visible),
        }));

        let callback = {
            let gate = Rc::clone(&gate);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let target = entry.target();
                        if gate.borrow_mut().notify(target.clone(), entry.is_intersecting()) {
                            observer.unobserve(&target);
                        }
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            #[cfg(test)]
            gate,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    /// Feeds one entry through the same path the browser callback takes.
    #[cfg(test)]
    pub fn notify(&self, target: &Element, intersecting: bool) -> bool {
        let fired = self.gate.borrow_mut().notify(target.clone(), intersecting);
        if fired {
            self.observer.unobserve(target);
        }
        fired
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
