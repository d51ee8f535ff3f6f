use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` element carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "phantom-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Tab shown when the page loads.
    pub default_tab: String,
    /// Space left above a smooth-scroll target for the fixed header.
    pub header_offset: f64,
    pub counter_duration_ms: f64,
    pub frame_interval_ms: f64,
    /// Fraction of the remaining distance the cursor glow covers each frame.
    pub glow_easing: f64,
    pub parallax_divisor: f64,
    pub parallax_depth: f64,
    pub live_data: LiveDataConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            default_tab: "home".to_string(),
            header_offset: 100.0,
            counter_duration_ms: 2000.0,
            frame_interval_ms: 16.0,
            glow_easing: 0.1,
            parallax_divisor: 50.0,
            parallax_depth: 0.5,
            live_data: LiveDataConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LiveDataConfig {
    pub enabled: bool,
    pub interval_ms: u32,
    pub flash_ms: u32,
    /// Largest absolute change applied to a projection per tick.
    pub max_delta: f64,
    pub max_seconds: u32,
    pub rising_color: String,
    pub falling_color: String,
}

impl Default for LiveDataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 3000,
            flash_ms: 500,
            max_delta: 0.2,
            max_seconds: 10,
            rising_color: "#4ade80".to_string(),
            falling_color: "#f87171".to_string(),
        }
    }
}

impl EffectsConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads overrides from the page, falling back to defaults when the element is
    /// absent or its JSON is malformed.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Number of frames a counter animation is spread over.
    pub fn counter_frames(&self) -> f64 {
        (self.counter_duration_ms / self.frame_interval_ms).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = EffectsConfig::default();
        assert_eq!(config.default_tab, "home");
        assert_eq!(config.header_offset, 100.0);
        assert_eq!(config.counter_frames(), 125.0);
        assert_eq!(config.live_data.interval_ms, 3000);
        assert_eq!(config.live_data.flash_ms, 500);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = EffectsConfig::from_json(
            r#"{ "default_tab": "stats", "live_data": { "enabled": false } }"#,
        )
        .unwrap();

        assert_eq!(config.default_tab, "stats");
        assert!(!config.live_data.enabled);
        assert_eq!(config.live_data.interval_ms, 3000);
        assert_eq!(config.glow_easing, 0.1);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EffectsConfig::from_json("{}").unwrap(), EffectsConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EffectsConfig::from_json("{ default_tab: ").is_err());
    }

    #[test]
    fn zero_duration_still_takes_one_frame() {
        let config = EffectsConfig {
            counter_duration_ms: 0.0,
            ..EffectsConfig::default()
        };
        assert_eq!(config.counter_frames(), 1.0);
    }
}
