use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_keeps_defaults() {
    let settings = load_settings(Path::new("definitely-not-here/gallery.toml"));
    assert_eq!(settings.ui, UiSettings::default());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    let raw = r#"
server_url = "https://gallery.example"

[ui]
compact_threshold_px = 200.0
layout_verbose = true
"#;
    apply_file(&mut settings, raw, Path::new("gallery.toml"));
    assert_eq!(settings.server_url, "https://gallery.example");
    assert_eq!(settings.ui.compact_threshold_px, 200.0);
    assert!(settings.ui.layout_verbose);
    // Unlisted keys keep their defaults.
    assert_eq!(settings.ui.masonry_settle_delays_ms, vec![100, 300, 600, 1000]);
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "server_url = [", Path::new("gallery.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn environment_wins_over_file() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "server_url = \"https://from-file\"",
        Path::new("gallery.toml"),
    );
    apply_env(
        &mut settings,
        env_from(&[
            ("GALLERY__SERVER_URL", "https://from-env"),
            ("GALLERY__LAYOUT_VERBOSE", "true"),
            ("GALLERY__COMPACT_THRESHOLD_PX", "not-a-number"),
            ("GALLERY__MASONRY_DEBOUNCE_MS", "50"),
        ]),
    );
    assert_eq!(settings.server_url, "https://from-env");
    assert!(settings.ui.layout_verbose);
    assert_eq!(settings.ui.compact_threshold_px, 280.0);
    assert_eq!(settings.ui.masonry_debounce_ms, 50);
}

#[test]
fn loads_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("gallery_cli_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("gallery.toml");
    fs::write(&path, "[ui]\nmasonry_default_gap_px = 24\n").expect("write config");

    let settings = load_settings(&path);
    assert_eq!(settings.ui.masonry_default_gap_px, 24);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
