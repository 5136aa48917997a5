use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

/// Where the dark/light state comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving log output in addition to the console default.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Shortcut list read by the bundled host.
    #[serde(default = "default_links_path")]
    pub links_path: String,
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
    #[serde(default)]
    pub theme: ThemeMode,
    /// Force the translucent control style on or off. `None` asks the platform.
    #[serde(default)]
    pub translucent_controls: Option<bool>,
    /// Show a toast when the host reports a failed launch.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Seconds to wait for the host's shortcut list before giving up.
    #[serde(default = "default_refresh_timeout")]
    pub refresh_timeout_secs: f32,
    /// Seconds between checks of the shortcut file for changes.
    #[serde(default = "default_reload_poll")]
    pub reload_poll_secs: f32,
    /// File that launch failures are appended to. `None` disables it.
    #[serde(default = "default_failure_log")]
    pub failure_log: Option<String>,
}

fn default_links_path() -> String {
    "links.json".into()
}

fn default_window_size() -> (f32, f32) {
    (520.0, 240.0)
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

fn default_refresh_timeout() -> f32 {
    5.0
}

fn default_reload_poll() -> f32 {
    1.0
}

fn default_failure_log() -> Option<String> {
    Some(crate::toast_log::TOAST_LOG_FILE.into())
}

fn secs_or(value: f32, fallback: f32) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f32(value)
    } else {
        tracing::warn!("invalid duration {value}; using {fallback}s");
        Duration::from_secs_f32(fallback)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            links_path: default_links_path(),
            window_size: default_window_size(),
            theme: ThemeMode::System,
            translucent_controls: None,
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
            refresh_timeout_secs: default_refresh_timeout(),
            reload_poll_secs: default_reload_poll(),
            failure_log: default_failure_log(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn refresh_timeout(&self) -> Duration {
        secs_or(self.refresh_timeout_secs, default_refresh_timeout())
    }

    pub fn reload_poll(&self) -> Duration {
        secs_or(self.reload_poll_secs, default_reload_poll())
    }

    /// Whether the host should report a translucent compositor.
    pub fn translucent(&self) -> bool {
        self.translucent_controls
            .unwrap_or(cfg!(target_os = "windows"))
    }
}
