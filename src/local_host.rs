//! Host side for the bundled binary: serves the shortcut list from a JSON
//! file, performs launches, and reports theme changes.

use crate::host::{HostMessage, HostNotifier, HostPort, UiMessage};
use crate::links::HostLink;
use crate::settings::ThemeMode;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

type Launcher = Box<dyn Fn(&str) -> std::io::Result<()> + Send>;

/// Read the shortcut file. A missing or blank file is an empty list.
pub fn load_links(path: &Path) -> anyhow::Result<Vec<HostLink>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

pub fn save_links(path: &Path, links: &[HostLink]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(links)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub struct LocalHost {
    links_path: PathBuf,
    port: HostPort,
    poll: Duration,
    translucent: bool,
    launcher: Launcher,
    last_seen: Option<String>,
}

impl LocalHost {
    pub fn new(links_path: impl Into<PathBuf>, port: HostPort) -> Self {
        Self {
            links_path: links_path.into(),
            port,
            poll: Duration::from_secs(1),
            translucent: false,
            launcher: Box::new(|path: &str| open::that(path)),
            last_seen: None,
        }
    }

    pub fn with_poll_interval(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_translucency(mut self, translucent: bool) -> Self {
        self.translucent = translucent;
        self
    }

    /// Replace how launch targets are opened.
    pub fn with_launcher(mut self, launcher: impl Fn(&str) -> std::io::Result<()> + Send + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("link-host".into())
            .spawn(move || self.run())
    }

    /// Serve the panel until it disconnects.
    pub fn run(mut self) {
        tracing::debug!(path = %self.links_path.display(), "host started");
        self.check_reload();
        let mut last_check = Instant::now();
        loop {
            match self.port.recv_timeout(self.poll) {
                Ok(msg) => self.handle(msg),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            if last_check.elapsed() >= self.poll {
                self.check_reload();
                last_check = Instant::now();
            }
        }
        tracing::debug!("panel disconnected; host stopped");
    }

    pub fn handle(&mut self, msg: UiMessage) {
        match msg {
            UiMessage::ListRequest { request_id } => {
                let reply = match load_links(&self.links_path) {
                    Ok(links) => HostMessage::ListResponse { request_id, links },
                    Err(e) => {
                        tracing::warn!(path = %self.links_path.display(), "cannot read shortcuts: {e:#}");
                        HostMessage::ListFailed {
                            request_id,
                            reason: format!("{e:#}"),
                        }
                    }
                };
                self.port.send(reply);
            }
            UiMessage::Launch { link_path } => {
                if let Err(e) = (self.launcher)(&link_path) {
                    tracing::warn!(link_path = %link_path, "launch failed: {e}");
                    self.port.send(HostMessage::LaunchFailed {
                        link_path,
                        reason: e.to_string(),
                    });
                }
            }
            UiMessage::VisualStyleQuery => {
                self.port.send(HostMessage::VisualStyle {
                    translucent: self.translucent,
                });
            }
        }
    }

    /// Announce `load_complete` when the shortcut file differs from what was
    /// last seen, including the first check.
    pub fn check_reload(&mut self) -> bool {
        let content = match std::fs::read_to_string(&self.links_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                tracing::debug!("cannot check shortcut file: {e}");
                return false;
            }
        };
        if self.last_seen.as_deref() == Some(content.as_str()) {
            return false;
        }
        self.last_seen = Some(content);
        tracing::info!(path = %self.links_path.display(), "shortcut configuration loaded");
        self.port.send(HostMessage::LoadComplete);
        true
    }
}

/// Reports the dark/light state to the panel, either as configured or
/// following the operating system.
pub struct SystemThemeWatcher {
    mode: ThemeMode,
    notifier: HostNotifier,
    last: Option<bool>,
}

impl SystemThemeWatcher {
    pub fn new(mode: ThemeMode, notifier: HostNotifier) -> Self {
        Self {
            mode,
            notifier,
            last: None,
        }
    }

    /// Feed the current system theme, `None` when unknown. A notification is
    /// sent only when the effective value changes.
    pub fn observe(&mut self, system_dark: Option<bool>) {
        let is_dark = match self.mode {
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
            ThemeMode::System => match system_dark {
                Some(dark) => dark,
                None => return,
            },
        };
        if self.last == Some(is_dark) {
            return;
        }
        self.last = Some(is_dark);
        if !self.notifier.notify(HostMessage::ThemeChanged { is_dark }) {
            tracing::debug!("panel gone; theme change dropped");
        }
    }
}
