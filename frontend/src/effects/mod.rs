pub mod counter;
pub mod cursor_glow;
pub mod live_data;
pub mod menu;
pub mod reveal;
pub mod smooth_scroll;
pub mod tabs;

use log::{error, info};
use web_sys::{Document, Window};

use crate::config::EffectsConfig;
use crate::dom;
use crate::error::EffectError;

use counter::Counters;
use cursor_glow::CursorGlow;
use live_data::LiveData;
use menu::MobileMenu;
use reveal::ScrollReveal;
use smooth_scroll::SmoothScroll;
use tabs::TabNavigation;

/// Every page behavior that found its markup. Dropping this removes all listeners,
/// observers, timers and animation loops.
pub struct Effects {
    _tabs: Option<TabNavigation>,
    _menu: Option<MobileMenu>,
    _cursor_glow: Option<CursorGlow>,
    _counters: Option<Counters>,
    _reveal: Option<ScrollReveal>,
    _smooth_scroll: Option<SmoothScroll>,
    _live_data: Option<LiveData>,
}

/// Keeps a behavior that failed to install from taking the others down with it.
fn isolate<T>(name: &str, result: Result<Option<T>, EffectError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        error!("Failed to install {}: {}", name, e);
        None
    })
}

impl Effects {
    /// Installs against the global document, reading overrides from `#phantom-config`.
    pub fn mount() -> Result<Self, EffectError> {
        let window = dom::window()?;
        let document = dom::document()?;
        let config = EffectsConfig::load(&document);
        Ok(Self::install(&window, &document, &config))
    }

    pub fn install(window: &Window, document: &Document, config: &EffectsConfig) -> Self {
        let effects = Self {
            _tabs: TabNavigation::install(window, document, &config.default_tab),
            _menu: MobileMenu::install(document),
            _cursor_glow: CursorGlow::install(window, document, config.glow_easing),
            _counters: isolate(
                "counters",
                Counters::install(document, config.counter_frames()),
            ),
            _reveal: isolate(
                "scroll reveal",
                ScrollReveal::install(
                    window,
                    document,
                    config.parallax_divisor,
                    config.parallax_depth,
                )
                .map(Some),
            ),
            _smooth_scroll: SmoothScroll::install(window, document, config.header_offset),
            _live_data: LiveData::install(document, &config.live_data),
        };
        info!("Page effects installed");
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_behavior_is_dropped_alone() {
        let failed: Option<u8> = isolate("counters", Err(EffectError::Js("boom".to_string())));
        assert_eq!(failed, None);
    }

    #[test]
    fn installed_and_skipped_behaviors_pass_through() {
        assert_eq!(isolate("tabs", Ok(Some(3))), Some(3));
        assert_eq!(isolate::<u8>("tabs", Ok(None)), None);
    }
}
