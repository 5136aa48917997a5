//! The shortcut panel: owns the refresh service, the key listener and the
//! theme adapter, and ties them to the panel's visibility.

use crate::dispatch::{KeyboardHub, MountedDispatcher, ShortcutDispatcher};
use crate::host::{HostEndpoint, HostMessage, UiMessage};
use crate::launch::LaunchInvoker;
use crate::listeners::Subscription;
use crate::refresh::{RefreshError, RefreshService};
use crate::render::{self, PanelView};
use crate::store::StoreReader;
use crate::theme::ThemeAdapter;
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchFailure {
    pub link_path: String,
    pub reason: String,
}

pub struct Panel {
    host: Rc<dyn HostEndpoint>,
    refresh: RefreshService,
    links: StoreReader,
    launcher: LaunchInvoker,
    keyboard: KeyboardHub,
    dispatcher: Option<MountedDispatcher>,
    theme: ThemeAdapter,
    view: Rc<RefCell<PanelView>>,
    _view_sync: Subscription,
    visible: bool,
    control_rects: Vec<egui::Rect>,
    launch_failures: Vec<LaunchFailure>,
}

impl Panel {
    pub fn new(host: Rc<dyn HostEndpoint>, refresh_timeout: Duration) -> Self {
        let refresh = RefreshService::new(refresh_timeout);
        let links = refresh.reader();
        let view = Rc::new(RefCell::new(PanelView::from_entries(&links.snapshot())));
        let sync = Rc::clone(&view);
        let view_sync = links.subscribe(move |entries| {
            *sync.borrow_mut() = PanelView::from_entries(entries);
        });

        if let Err(e) = host.send(UiMessage::VisualStyleQuery) {
            tracing::warn!("could not query host visual style: {e}");
        }

        Self {
            launcher: LaunchInvoker::new(Rc::clone(&host)),
            host,
            refresh,
            links,
            keyboard: KeyboardHub::new(),
            dispatcher: None,
            theme: ThemeAdapter::new(),
            view,
            _view_sync: view_sync,
            visible: false,
            control_rects: Vec::new(),
            launch_failures: Vec::new(),
        }
    }

    /// Track the panel's visibility. Becoming visible mounts the key listener
    /// and refreshes the list once; becoming hidden releases the listener.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        tracing::debug!(visible, "panel visibility changed");
        if visible {
            self.mount();
            self.request_refresh();
        } else {
            self.unmount();
        }
    }

    fn mount(&mut self) {
        if self.dispatcher.is_some() {
            return;
        }
        let dispatcher = ShortcutDispatcher::new(self.links.clone(), self.launcher.clone());
        self.dispatcher = Some(dispatcher.mount(&self.keyboard));
    }

    fn unmount(&mut self) {
        if self.dispatcher.take().is_some() {
            tracing::debug!("shortcut listener released");
        }
    }

    pub fn request_refresh(&mut self) {
        if let Err(e) = self.refresh.refresh(self.host.as_ref()) {
            tracing::warn!("refresh not sent: {e}");
        }
    }

    /// Handle everything the host has sent since the last call.
    pub fn pump(&mut self) -> usize {
        self.pump_at(Instant::now())
    }

    pub fn pump_at(&mut self, now: Instant) -> usize {
        let mut handled = 0;
        while let Some(msg) = self.host.try_recv() {
            self.handle(msg);
            handled += 1;
        }
        if let Some(e) = self.refresh.poll_timeout(now) {
            tracing::warn!("{e}; keeping the current list");
        }
        handled
    }

    pub fn handle(&mut self, msg: HostMessage) {
        match msg {
            HostMessage::ListResponse { request_id, links } => {
                match self.refresh.on_response(request_id, links) {
                    Ok(_) => {}
                    Err(e @ RefreshError::Stale { .. }) => tracing::debug!("{e}"),
                    Err(e) => tracing::warn!("{e}; keeping the current list"),
                }
            }
            HostMessage::ListFailed { request_id, reason } => {
                let e = self.refresh.on_failure(request_id, reason);
                tracing::warn!("{e}; keeping the current list");
            }
            HostMessage::LoadComplete => self.request_refresh(),
            HostMessage::ThemeChanged { is_dark } => self.theme.on_theme_changed(is_dark),
            HostMessage::VisualStyle { translucent } => self.theme.on_visual_style(translucent),
            HostMessage::LaunchFailed { link_path, reason } => {
                tracing::warn!(link_path = %link_path, "launch failed: {reason}");
                self.launch_failures.push(LaunchFailure { link_path, reason });
            }
        }
    }

    /// Deliver a key release as if it came from the window.
    pub fn key_up(&self, key: &str) {
        self.keyboard.key_up(key);
    }

    pub fn handle_input(&self, events: &[egui::Event]) {
        self.keyboard.feed(events);
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let rects = {
            let view = self.view.borrow();
            render::show(ui, &view, &self.theme, &self.launcher)
        };
        self.control_rects = rects;
    }

    pub fn take_launch_failures(&mut self) -> Vec<LaunchFailure> {
        std::mem::take(&mut self.launch_failures)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mounted(&self) -> bool {
        self.dispatcher.is_some()
    }

    pub fn keyboard(&self) -> &KeyboardHub {
        &self.keyboard
    }

    pub fn links(&self) -> &StoreReader {
        &self.links
    }

    pub fn view(&self) -> PanelView {
        self.view.borrow().clone()
    }

    pub fn theme(&self) -> &ThemeAdapter {
        &self.theme
    }

    /// Screen rectangles of the controls drawn in the last frame.
    pub fn control_rects(&self) -> &[egui::Rect] {
        &self.control_rects
    }

    pub fn pending_refresh(&self) -> Option<u64> {
        self.refresh.in_flight()
    }
}
