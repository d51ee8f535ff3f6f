use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{debug, warn};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::EffectError;
use crate::observer::{ObserverOptions, VisibilityObserver};

const COUNTERS: &str = "[data-count]";

const OBSERVER_OPTIONS: ObserverOptions = ObserverOptions {
    threshold: 0.5,
    root_margin: "0px",
};

/// Reads the leading run of digits, so `"250+"` counts to 250 and `"1,200"` to 1.
pub fn parse_target(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    raw[..end].parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    Running(u64),
    Done(u64),
}

impl CounterFrame {
    pub fn value(self) -> u64 {
        match self {
            CounterFrame::Running(value) | CounterFrame::Done(value) => value,
        }
    }
}

/// Counts from zero to `target` in equal increments, one per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    step: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, frames: f64) -> Self {
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
        }
    }

    pub fn advance(&mut self) -> CounterFrame {
        self.current += self.step;
        if self.current < self.target as f64 {
            CounterFrame::Running(self.current.floor() as u64)
        } else {
            CounterFrame::Done(self.target)
        }
    }
}

struct CounterRun {
    document: Document,
    element: Element,
    animation: RefCell<CounterAnimation>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl CounterRun {
    fn tick(self: Rc<Self>) {
        self.frame.borrow_mut().take();
        if !dom::is_attached(&self.document, &self.element) {
            return;
        }
        let frame = self.animation.borrow_mut().advance();
        self.element.set_text_content(Some(&frame.value().to_string()));
        if let CounterFrame::Running(_) = frame {
            let run = Rc::clone(&self);
            let handle = request_animation_frame(move |_| run.tick());
            *self.frame.borrow_mut() = Some(handle);
        }
    }
}

pub struct Counters {
    _observer: VisibilityObserver,
    runs: Rc<RefCell<Vec<Rc<CounterRun>>>>,
}

impl Counters {
    pub fn install(document: &Document, frames: f64) -> Result<Option<Self>, EffectError> {
        let counters = dom::query_all(document, COUNTERS);
        if counters.is_empty() {
            debug!("Counters skipped: no [data-count] elements");
            return Ok(None);
        }

        let runs: Rc<RefCell<Vec<Rc<CounterRun>>>> = Rc::default();
        let observer = {
            let runs = Rc::clone(&runs);
            let document = document.clone();
            VisibilityObserver::once(OBSERVER_OPTIONS, move |element| {
                let raw = dom::data_attr(&element, "count").unwrap_or_default();
                let Some(target) = parse_target(&raw) else {
                    return;
                };
                let run = Rc::new(CounterRun {
                    document: document.clone(),
                    element,
                    animation: RefCell::new(CounterAnimation::new(target, frames)),
                    frame: RefCell::new(None),
                });
                runs.borrow_mut().push(Rc::clone(&run));
                run.tick();
            })?
        };

        let mut observed = 0;
        for counter in &counters {
            let raw = dom::data_attr(counter, "count").unwrap_or_default();
            if parse_target(&raw).is_none() {
                warn!("Ignoring counter with malformed data-count {:?}", raw);
                continue;
            }
            observer.observe(counter);
            observed += 1;
        }

        debug!("Counters installed: {} observed", observed);
        Ok(Some(Self {
            _observer: observer,
            runs,
        }))
    }
}

impl Drop for Counters {
    fn drop(&mut self) {
        for run in self.runs.borrow().iter() {
            run.frame.borrow_mut().take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(animation: &mut CounterAnimation) -> Vec<CounterFrame> {
        let mut frames = Vec::new();
        loop {
            let frame = animation.advance();
            frames.push(frame);
            if let CounterFrame::Done(_) = frame {
                return frames;
            }
            assert!(frames.len() < 10_000, "counter never finished");
        }
    }

    #[test]
    fn target_250_ends_exactly_at_250() {
        let mut animation = CounterAnimation::new(250, 125.0);
        let frames = run_to_end(&mut animation);

        assert_eq!(frames.last(), Some(&CounterFrame::Done(250)));
        assert_eq!(frames.last().unwrap().value().to_string(), "250");
    }

    #[test]
    fn never_exceeds_target_and_never_decreases() {
        for target in [1, 7, 99, 250, 1_000, 123_457] {
            let mut animation = CounterAnimation::new(target, 125.0);
            let frames = run_to_end(&mut animation);
            let values: Vec<u64> = frames.iter().map(|frame| frame.value()).collect();

            assert!(values.iter().all(|value| *value <= target));
            assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_eq!(*values.last().unwrap(), target);
        }
    }

    #[test]
    fn takes_about_the_configured_number_of_frames() {
        let mut animation = CounterAnimation::new(250, 125.0);
        let frames = run_to_end(&mut animation);
        assert!((124..=126).contains(&frames.len()));
    }

    #[test]
    fn first_frame_shows_one_step() {
        let mut animation = CounterAnimation::new(250, 125.0);
        assert_eq!(animation.advance(), CounterFrame::Running(2));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut animation = CounterAnimation::new(0, 125.0);
        assert_eq!(animation.advance(), CounterFrame::Done(0));
    }

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_target("250"), Some(250));
        assert_eq!(parse_target(" 42 "), Some(42));
        assert_eq!(parse_target("+7"), Some(7));
    }

    #[test]
    fn parses_the_leading_integer_of_decorated_values() {
        assert_eq!(parse_target("250+"), Some(250));
        assert_eq!(parse_target("1,200"), Some(1));
        assert_eq!(parse_target("12.5"), Some(12));
        assert_eq!(parse_target("98%"), Some(98));
    }

    #[test]
    fn rejects_values_without_a_leading_integer() {
        assert_eq!(parse_target("-3"), None);
        assert_eq!(parse_target("lots"), None);
        assert_eq!(parse_target("$5"), None);
        assert_eq!(parse_target(""), None);
    }
}
