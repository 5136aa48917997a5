use link_panel::app::{native_options, PanelApp};
use link_panel::host;
use link_panel::local_host::{LocalHost, SystemThemeWatcher};
use link_panel::logging;
use link_panel::settings::{Settings, SETTINGS_FILE};

use std::path::PathBuf;
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let (ui_port, host_port) = host::channel();
    let theme_watcher = SystemThemeWatcher::new(settings.theme, host_port.notifier());
    let _host = LocalHost::new(&settings.links_path, host_port)
        .with_poll_interval(settings.reload_poll())
        .with_translucency(settings.translucent())
        .spawn()?;

    let native_options = native_options(&settings);

    eframe::run_native(
        "Link Panel",
        native_options,
        Box::new(move |cc| {
            Box::new(PanelApp::new(
                &cc.egui_ctx,
                &settings,
                Rc::new(ui_port),
                Some(theme_watcher),
            ))
        }),
    )
    .map_err(|e| anyhow::anyhow!("panel window failed: {e}"))
}
