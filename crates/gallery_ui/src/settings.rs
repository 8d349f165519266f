use std::time::Duration;

use serde::Deserialize;

/// Tunables for the page components. Defaults match the stylesheet the
/// gallery ships with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub compact_threshold_px: f64,
    pub compact_debounce_ms: u64,
    pub masonry_debounce_ms: u64,
    pub masonry_settle_delays_ms: Vec<u64>,
    pub masonry_default_gap_px: i64,
    pub masonry_default_row_height_px: i64,
    pub layout_verbose: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            compact_threshold_px: 280.0,
            compact_debounce_ms: 250,
            masonry_debounce_ms: 200,
            masonry_settle_delays_ms: vec![100, 300, 600, 1000],
            masonry_default_gap_px: 40,
            masonry_default_row_height_px: 10,
            layout_verbose: false,
        }
    }
}

impl UiSettings {
    pub fn compact_debounce(&self) -> Duration {
        Duration::from_millis(self.compact_debounce_ms)
    }

    pub fn masonry_debounce(&self) -> Duration {
        Duration::from_millis(self.masonry_debounce_ms)
    }

    pub fn masonry_settle_delays(&self) -> impl Iterator<Item = Duration> + '_ {
        self.masonry_settle_delays_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
    }
}
