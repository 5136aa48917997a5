use eframe::egui;
use link_panel::app::PanelApp;
use link_panel::host::{channel, HostMessage, HostPort};
use link_panel::local_host::SystemThemeWatcher;
use link_panel::settings::{Settings, ThemeMode};
use link_panel::theme::ControlShape;
use std::rc::Rc;

mod support;
use support::{answer_list, input, key, launches, link};

fn new_app(ctx: &egui::Context) -> (PanelApp, HostPort) {
    let (ui, host) = channel();
    let settings = Settings {
        failure_log: None,
        ..Settings::default()
    };
    let app = PanelApp::new(ctx, &settings, Rc::new(ui), None);
    (app, host)
}

fn frame(ctx: &egui::Context, app: &mut PanelApp, events: Vec<egui::Event>) {
    let _ = ctx.run(input(events), |ctx| app.ui(ctx));
}

fn loaded_app(ctx: &egui::Context, links: Vec<link_panel::links::HostLink>) -> (PanelApp, HostPort) {
    let (mut app, host) = new_app(ctx);
    frame(ctx, &mut app, Vec::new());
    answer_list(&host, links);
    frame(ctx, &mut app, Vec::new());
    (app, host)
}

#[test]
fn first_frame_requests_list_and_mounts_listener() {
    let ctx = egui::Context::default();
    let (mut app, host) = new_app(&ctx);
    frame(&ctx, &mut app, Vec::new());
    frame(&ctx, &mut app, Vec::new());

    assert!(app.panel().is_visible());
    assert_eq!(app.panel().keyboard().listener_count(), 1);
    assert_eq!(app.panel().pending_refresh(), Some(1));
    answer_list(&host, Vec::new());
}

#[test]
fn renders_one_control_per_entry() {
    let ctx = egui::Context::default();
    let (app, _host) = loaded_app(
        &ctx,
        vec![
            link("Notes", "/Apps/Notes.app", "N"),
            link("Mail", "/Apps/Mail.app", "M"),
        ],
    );
    let rects = app.panel().control_rects();
    assert_eq!(rects.len(), 2);
    assert!(rects[0].center().x < rects[1].center().x);
}

#[test]
fn empty_list_renders_no_controls() {
    let ctx = egui::Context::default();
    let (app, _host) = loaded_app(&ctx, Vec::new());
    assert!(app.panel().view().shows_prompt());
    assert!(app.panel().control_rects().is_empty());
}

#[test]
fn key_release_in_window_launches() {
    let ctx = egui::Context::default();
    let (mut app, host) = loaded_app(&ctx, vec![link("Notes", "/Apps/Notes.app", "N")]);
    launches(&host);

    frame(&ctx, &mut app, vec![key(egui::Key::N, true)]);
    assert!(launches(&host).is_empty(), "key press alone must not launch");

    frame(&ctx, &mut app, vec![key(egui::Key::N, false)]);
    assert_eq!(launches(&host), vec!["/Apps/Notes.app"]);
}

fn pointer(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::default(),
    }
}

/// Click the control at `index`, checking nothing launches before release.
fn click_control(ctx: &egui::Context, app: &mut PanelApp, host: &HostPort, index: usize) {
    let pos = app.panel().control_rects()[index].center();
    frame(ctx, app, vec![egui::Event::PointerMoved(pos)]);
    frame(ctx, app, vec![pointer(pos, true)]);
    assert!(launches(host).is_empty(), "press alone must not launch");
    frame(ctx, app, vec![pointer(pos, false)]);
}

fn two_links() -> Vec<link_panel::links::HostLink> {
    vec![
        link("Notes", "/Apps/Notes.app", "N"),
        link("Mail", "/Apps/Mail.app", "M"),
    ]
}

#[test]
fn clicking_a_control_launches_once_on_release() {
    let ctx = egui::Context::default();
    let (mut app, host) = loaded_app(&ctx, two_links());
    launches(&host);

    click_control(&ctx, &mut app, &host, 1);
    assert_eq!(launches(&host), vec!["/Apps/Mail.app"]);
}

#[test]
fn clicking_launches_in_dark_translucent_style() {
    let ctx = egui::Context::default();
    let (mut app, host) = loaded_app(&ctx, two_links());
    host.send(HostMessage::ThemeChanged { is_dark: true });
    host.send(HostMessage::VisualStyle { translucent: true });
    frame(&ctx, &mut app, Vec::new());
    frame(&ctx, &mut app, Vec::new());
    assert!(ctx.style().visuals.dark_mode);
    assert_eq!(app.panel().theme().control_style().shape, ControlShape::Circular);
    launches(&host);

    click_control(&ctx, &mut app, &host, 0);
    assert_eq!(launches(&host), vec!["/Apps/Notes.app"]);
}

#[test]
fn keyboard_cannot_reactivate_clicked_control() {
    let ctx = egui::Context::default();
    let (mut app, host) = loaded_app(&ctx, two_links());
    launches(&host);

    click_control(&ctx, &mut app, &host, 1);
    assert_eq!(launches(&host).len(), 1);

    for activation in [egui::Key::Enter, egui::Key::Space] {
        frame(&ctx, &mut app, vec![key(activation, true)]);
        frame(&ctx, &mut app, vec![key(activation, false)]);
    }
    assert!(launches(&host).is_empty(), "only clicks and accelerators launch");
}

#[test]
fn dark_notification_switches_visuals_without_refresh() {
    let ctx = egui::Context::default();
    let (ui, host) = channel();
    let mut watcher = SystemThemeWatcher::new(ThemeMode::System, host.notifier());
    let mut app = PanelApp::new(&ctx, &Settings::default(), Rc::new(ui), None);

    watcher.observe(Some(false));
    frame(&ctx, &mut app, Vec::new());
    answer_list(&host, vec![link("Notes", "/Apps/Notes.app", "N")]);
    frame(&ctx, &mut app, Vec::new());
    assert!(!ctx.style().visuals.dark_mode);

    watcher.observe(Some(true));
    frame(&ctx, &mut app, Vec::new());
    assert!(ctx.style().visuals.dark_mode);
    assert!(host.drain().is_empty(), "theme change must not refresh");
    assert_eq!(app.panel().links().len(), 1);
}

#[test]
fn launch_failure_is_written_to_failure_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("toast.log");
    let ctx = egui::Context::default();
    let (ui, host) = channel();
    let settings = Settings {
        failure_log: Some(log.to_string_lossy().to_string()),
        ..Settings::default()
    };
    let mut app = PanelApp::new(&ctx, &settings, Rc::new(ui), None);

    host.send(HostMessage::LaunchFailed {
        link_path: "/Apps/Gone.app".into(),
        reason: "No such file or directory".into(),
    });
    frame(&ctx, &mut app, Vec::new());

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Failed to launch /Apps/Gone.app"));
}
