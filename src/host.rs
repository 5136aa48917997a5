//! Message boundary between the panel and the host process.
//!
//! The panel only ever talks to the host through [`HostEndpoint`]. The
//! in-process transport from [`channel`] is what the binary uses; anything
//! else that delivers these messages in order works as well.

use crate::links::HostLink;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Messages sent from the panel to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiMessage {
    /// Open or execute a launch target. No reply is expected.
    Launch { link_path: String },
    ListRequest { request_id: u64 },
    VisualStyleQuery,
}

/// Messages sent from the host to the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    ListResponse {
        request_id: u64,
        links: Vec<HostLink>,
    },
    ListFailed {
        request_id: u64,
        reason: String,
    },
    LoadComplete,
    ThemeChanged {
        is_dark: bool,
    },
    VisualStyle {
        translucent: bool,
    },
    /// Only sent when a launch went wrong.
    LaunchFailed {
        link_path: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostDisconnected;

impl std::fmt::Display for HostDisconnected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "host is no longer connected")
    }
}

impl std::error::Error for HostDisconnected {}

/// Panel side of the host connection. Neither method may block.
pub trait HostEndpoint {
    fn send(&self, msg: UiMessage) -> Result<(), HostDisconnected>;
    fn try_recv(&self) -> Option<HostMessage>;
}

pub struct UiPort {
    tx: Sender<UiMessage>,
    rx: Receiver<HostMessage>,
}

pub struct HostPort {
    tx: Sender<HostMessage>,
    rx: Receiver<UiMessage>,
}

/// Cloneable handle for pushing notifications to the panel from any thread.
#[derive(Clone)]
pub struct HostNotifier {
    tx: Sender<HostMessage>,
}

/// Create a connected in-process transport.
pub fn channel() -> (UiPort, HostPort) {
    let (ui_tx, host_rx) = mpsc::channel();
    let (host_tx, ui_rx) = mpsc::channel();
    (
        UiPort {
            tx: ui_tx,
            rx: ui_rx,
        },
        HostPort {
            tx: host_tx,
            rx: host_rx,
        },
    )
}

impl HostEndpoint for UiPort {
    fn send(&self, msg: UiMessage) -> Result<(), HostDisconnected> {
        self.tx.send(msg).map_err(|_| HostDisconnected)
    }

    fn try_recv(&self) -> Option<HostMessage> {
        self.rx.try_recv().ok()
    }
}

impl HostPort {
    /// Returns `false` once the panel side is gone.
    pub fn send(&self, msg: HostMessage) -> bool {
        self.tx.send(msg).is_ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<UiMessage, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Everything the panel has sent so far.
    pub fn drain(&self) -> Vec<UiMessage> {
        self.rx.try_iter().collect()
    }

    pub fn notifier(&self) -> HostNotifier {
        HostNotifier {
            tx: self.tx.clone(),
        }
    }
}

impl HostNotifier {
    pub fn notify(&self, msg: HostMessage) -> bool {
        self.tx.send(msg).is_ok()
    }
}
