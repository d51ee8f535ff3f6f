use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Window};

use crate::dom;

const GLOW_ID: &str = "cursorGlow";

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Exponential easing toward the latest pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follower {
    current: Point,
    target: Point,
    easing: f64,
}

impl Follower {
    pub fn new(easing: f64) -> Self {
        Self {
            current: Point::default(),
            target: Point::default(),
            easing,
        }
    }

    pub fn aim(&mut self, target: Point) {
        self.target = target;
    }

    #[cfg(test)]
    pub fn position(&self) -> Point {
        self.current
    }

    pub fn step(&mut self) -> Point {
        self.current.x += (self.target.x - self.current.x) * self.easing;
        self.current.y += (self.target.y - self.current.y) * self.easing;
        self.current
    }
}

struct GlowLoop {
    document: Document,
    glow: Element,
    follower: RefCell<Follower>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl GlowLoop {
    fn schedule(self: &Rc<Self>) {
        let state = Rc::clone(self);
        let handle = request_animation_frame(move |_| state.tick());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn tick(self: Rc<Self>) {
        self.frame.borrow_mut().take();
        if !dom::is_attached(&self.document, &self.glow) {
            debug!("Cursor glow detached, stopping");
            return;
        }
        let position = self.follower.borrow_mut().step();
        dom::set_style(&self.glow, "left", &format!("{}px", position.x));
        dom::set_style(&self.glow, "top", &format!("{}px", position.y));
        self.schedule();
    }
}

pub struct CursorGlow {
    state: Rc<GlowLoop>,
    _listener: EventListener,
}

impl CursorGlow {
    pub fn install(window: &Window, document: &Document, easing: f64) -> Option<Self> {
        let Some(glow) = document.get_element_by_id(GLOW_ID) else {
            debug!("Cursor glow skipped: no #{}", GLOW_ID);
            return None;
        };
        if !dom::supports_hover(window) {
            debug!("Cursor glow skipped: pointer cannot hover");
            return None;
        }

        let state = Rc::new(GlowLoop {
            document: document.clone(),
            glow,
            follower: RefCell::new(Follower::new(easing)),
            frame: RefCell::new(None),
        });

        let listener = {
            let state = Rc::clone(&state);
            EventListener::new(document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    state.follower.borrow_mut().aim(Point {
                        x: f64::from(event.client_x()),
                        y: f64::from(event.client_y()),
                    });
                }
            })
        };

        Rc::clone(&state).tick();
        debug!("Cursor glow installed");
        Some(Self {
            state,
            _listener: listener,
        })
    }
}

impl Drop for CursorGlow {
    fn drop(&mut self) {
        // The pending frame holds an `Rc` back to the loop.
        self.state.frame.borrow_mut().take();
    }
}
