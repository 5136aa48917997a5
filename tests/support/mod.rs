#![allow(dead_code)]

use eframe::egui;
use link_panel::host::{HostMessage, HostPort, UiMessage};
use link_panel::links::HostLink;

pub fn link(app: &str, path: &str, key: &str) -> HostLink {
    HostLink {
        app_name: app.into(),
        link_path: path.into(),
        shortcut_text: key.into(),
    }
}

/// Reply to the most recent list request the panel sent.
pub fn answer_list(host: &HostPort, links: Vec<HostLink>) -> u64 {
    let request_id = host
        .drain()
        .into_iter()
        .filter_map(|m| match m {
            UiMessage::ListRequest { request_id } => Some(request_id),
            _ => None,
        })
        .last()
        .expect("panel should have requested the list");
    assert!(host.send(HostMessage::ListResponse { request_id, links }));
    request_id
}

pub fn launches(host: &HostPort) -> Vec<String> {
    host.drain()
        .into_iter()
        .filter_map(|m| match m {
            UiMessage::Launch { link_path } => Some(link_path),
            _ => None,
        })
        .collect()
}

pub fn key(key: egui::Key, pressed: bool) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed,
        repeat: false,
        modifiers: egui::Modifiers::default(),
    }
}

pub fn input(events: Vec<egui::Event>) -> egui::RawInput {
    egui::RawInput {
        screen_rect: Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(520.0, 240.0),
        )),
        events,
        ..Default::default()
    }
}
