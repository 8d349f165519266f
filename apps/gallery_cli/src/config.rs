use std::{fs, path::Path};

use gallery_ui::UiSettings;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    ui: Option<UiSettings>,
}

/// Defaults, then `path` if it exists, then `GALLERY__*` environment
/// variables.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw, path);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str, path: &Path) {
    let file_cfg = match toml::from_str::<FileConfig>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable config file");
            return;
        }
    };
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(ui) = file_cfg.ui {
        settings.ui = ui;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("GALLERY__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("GALLERY__LAYOUT_VERBOSE") {
        settings.ui.layout_verbose = matches!(v.trim(), "1" | "true" | "yes" | "on");
    }
    if let Some(v) = lookup("GALLERY__COMPACT_THRESHOLD_PX") {
        match v.parse::<f64>() {
            Ok(parsed) => settings.ui.compact_threshold_px = parsed,
            Err(error) => warn!(value = %v, %error, "invalid GALLERY__COMPACT_THRESHOLD_PX"),
        }
    }
    if let Some(v) = lookup("GALLERY__MASONRY_DEBOUNCE_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.ui.masonry_debounce_ms = parsed;
        }
    }
    if let Some(v) = lookup("GALLERY__COMPACT_DEBOUNCE_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.ui.compact_debounce_ms = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
