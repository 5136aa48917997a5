use link_panel::settings::{Settings, ThemeMode};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.links_path, "links.json");
    assert_eq!(settings.refresh_timeout(), Duration::from_secs(5));
}

#[test]
fn partial_file_fills_in_defaults() {
    let settings: Settings = serde_json::from_str(
        r#"{
            "theme": "dark",
            "refresh_timeout_secs": 2.5,
            "enable_toasts": false
        }"#,
    )
    .unwrap();
    assert_eq!(settings.theme, ThemeMode::Dark);
    assert_eq!(settings.refresh_timeout(), Duration::from_millis(2500));
    assert!(!settings.enable_toasts);
    assert_eq!(settings.toast_duration, 3.0);
    assert_eq!(settings.failure_log.as_deref(), Some("toast.log"));
}

#[test]
fn save_then_load_keeps_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();
    let settings = Settings {
        debug_logging: true,
        links_path: "shortcuts.json".into(),
        theme: ThemeMode::Light,
        translucent_controls: Some(false),
        ..Settings::default()
    };
    settings.save(path).unwrap();
    assert_eq!(Settings::load(path).unwrap(), settings);
}

#[test]
fn invalid_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ nope").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}
