pub mod app;
pub mod dispatch;
pub mod host;
pub mod launch;
pub mod links;
pub mod listeners;
pub mod local_host;
pub mod logging;
pub mod panel;
pub mod refresh;
pub mod render;
pub mod settings;
pub mod store;
pub mod theme;
pub mod toast_log;
