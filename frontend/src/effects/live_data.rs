use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use web_sys::js_sys::Math;
use web_sys::{Document, Element};

use crate::config::LiveDataConfig;
use crate::dom;

const UPDATE_TIME: &str = ".update-time";
const PROJECTIONS: &str = ".player-row:not(.header) .proj";

/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&mut self) -> f64 {
        Math::random()
    }
}

pub fn elapsed_label(rng: &mut impl RandomSource, max_seconds: u32) -> String {
    let max_seconds = max_seconds.max(1);
    let seconds = (rng.next_f64() * f64::from(max_seconds)).floor() as u32 + 1;
    format!("Updated {}s ago", seconds.min(max_seconds))
}

pub fn pick_index(rng: &mut impl RandomSource, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = (rng.next_f64() * len as f64).floor() as usize;
    Some(index.min(len - 1))
}

/// Reads the leading decimal number, so `"24.6 pts"` reads as 24.6.
pub fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let mut fraction_end = end + 1;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        let fraction = fraction_end - (end + 1);
        if digits > 0 || fraction > 0 {
            digits += fraction;
            end = fraction_end;
        }
    }

    if digits == 0 {
        return None;
    }
    text[..end].parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nudge {
    pub value: f64,
    pub change: f64,
}

impl Nudge {
    pub fn text(&self) -> String {
        format!("{:.1}", self.value)
    }

    pub fn is_rising(&self) -> bool {
        self.change > 0.0
    }
}

pub fn nudge(current: f64, rng: &mut impl RandomSource, max_delta: f64) -> Nudge {
    let change = (rng.next_f64() - 0.5) * 2.0 * max_delta;
    Nudge {
        value: current + change,
        change,
    }
}

struct Ticker {
    document: Document,
    config: LiveDataConfig,
    flash: RefCell<Option<(Element, Timeout)>>,
}

impl Ticker {
    fn tick(&self, rng: &mut impl RandomSource) {
        if let Ok(Some(update_time)) = self.document.query_selector(UPDATE_TIME) {
            update_time.set_text_content(Some(&elapsed_label(rng, self.config.max_seconds)));
        }

        let projections = dom::query_all(&self.document, PROJECTIONS);
        let Some(index) = pick_index(rng, projections.len()) else {
            return;
        };
        let projection = &projections[index];
        let text = projection.text_content().unwrap_or_default();
        let Some(current) = leading_number(&text) else {
            warn!("Skipping projection with non-numeric text {:?}", text);
            return;
        };

        let nudge = nudge(current, rng, self.config.max_delta);
        projection.set_text_content(Some(&nudge.text()));
        let color = if nudge.is_rising() {
            &self.config.rising_color
        } else {
            &self.config.falling_color
        };
        dom::set_style(projection, "color", color);
        self.flash(projection.clone());
    }

    fn flash(&self, element: Element) {
        // A newer flash replaces the pending revert, so settle the old element first.
        if let Some((previous, _)) = self.flash.borrow_mut().take() {
            dom::clear_style(&previous, "color");
        }
        let target = element.clone();
        let revert = Timeout::new(self.config.flash_ms, move || {
            dom::clear_style(&target, "color");
        });
        *self.flash.borrow_mut() = Some((element, revert));
    }
}

pub struct LiveData {
    _interval: Interval,
    ticker: Rc<Ticker>,
}

impl LiveData {
    pub fn install(document: &Document, config: &LiveDataConfig) -> Option<Self> {
        if !config.enabled {
            debug!("Live data simulation disabled");
            return None;
        }

        let ticker = Rc::new(Ticker {
            document: document.clone(),
            config: config.clone(),
            flash: RefCell::new(None),
        });
        let interval = {
            let ticker = Rc::clone(&ticker);
            Interval::new(config.interval_ms, move || ticker.tick(&mut MathRandom))
        };

        debug!("Live data simulation every {}ms", config.interval_ms);
        Some(Self {
            _interval: interval,
            ticker,
        })
    }
}

impl Drop for LiveData {
    fn drop(&mut self) {
        if let Some((element, _)) = self.ticker.flash.borrow_mut().take() {
            dom::clear_style(&element, "color");
        }
    }
}
