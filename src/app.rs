use crate::host::HostEndpoint;
use crate::local_host::SystemThemeWatcher;
use crate::panel::Panel;
use crate::settings::{Settings, ThemeMode};
use crate::toast_log::append_toast_log;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

/// How often the window wakes up to drain host messages while idle.
const HOST_POLL: Duration = Duration::from_millis(100);

/// Window options for the panel. eframe only reports the system theme while
/// it follows it, so that is enabled exactly when the theme is `system`.
pub fn native_options(settings: &Settings) -> eframe::NativeOptions {
    let (width, height) = settings.window_size;
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([320.0, 160.0])
            .with_transparent(settings.translucent()),
        follow_system_theme: settings.theme == ThemeMode::System,
        ..Default::default()
    }
}

pub struct PanelApp {
    panel: Panel,
    theme_watcher: Option<SystemThemeWatcher>,
    toasts: Toasts,
    enable_toasts: bool,
    toast_duration: f32,
    failure_log: Option<PathBuf>,
    applied_dark: Option<bool>,
}

impl PanelApp {
    pub fn new(
        ctx: &egui::Context,
        settings: &Settings,
        host: Rc<dyn HostEndpoint>,
        theme_watcher: Option<SystemThemeWatcher>,
    ) -> Self {
        let mut app = Self {
            panel: Panel::new(host, settings.refresh_timeout()),
            theme_watcher,
            toasts: Toasts::new()
                .anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0])
                .direction(egui::Direction::TopDown),
            enable_toasts: settings.enable_toasts,
            toast_duration: settings.toast_duration,
            failure_log: settings.failure_log.as_ref().map(PathBuf::from),
            applied_dark: None,
        };
        app.apply_theme(ctx);
        app
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.panel.theme();
        if self.applied_dark == Some(theme.is_dark()) {
            return;
        }
        ctx.set_visuals(theme.theme().visuals());
        self.applied_dark = Some(theme.is_dark());
    }

    fn report_launch_failures(&mut self) {
        for failure in self.panel.take_launch_failures() {
            let msg = format!("Failed to launch {}: {}", failure.link_path, failure.reason);
            if let Some(path) = &self.failure_log {
                append_toast_log(path, &msg);
            }
            if self.enable_toasts {
                self.toasts.add(Toast {
                    text: msg.into(),
                    kind: ToastKind::Error,
                    options: ToastOptions::default()
                        .duration_in_seconds(self.toast_duration as f64),
                });
            }
        }
    }

    /// Run one frame of the panel against `ctx`.
    pub fn ui(&mut self, ctx: &egui::Context) {
        let minimized = ctx.input(|i| i.viewport().minimized).unwrap_or(false);
        self.panel.set_visible(!minimized);
        self.panel.pump();
        self.apply_theme(ctx);
        self.report_launch_failures();

        let events = ctx.input(|i| i.events.clone());
        self.panel.handle_input(&events);

        egui::CentralPanel::default().show(ctx, |ui| self.panel.ui(ui));
        self.toasts.show(ctx);
        ctx.request_repaint_after(HOST_POLL);
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if let Some(watcher) = self.theme_watcher.as_mut() {
            let system_dark = frame
                .info()
                .system_theme
                .map(|theme| matches!(theme, eframe::Theme::Dark));
            watcher.observe(system_dark);
        }
        self.ui(ctx);
    }
}
