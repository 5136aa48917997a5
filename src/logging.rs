use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn filter(debug: bool) -> EnvFilter {
    // Without debug logging we force `info` so a stray `RUST_LOG` in the
    // user's environment cannot turn on verbose output.
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    }
}

/// Initialise logging. The level is `info`, or `debug` when enabled via the
/// settings file, in which case `RUST_LOG` may override it.
///
/// With `log_file` set, output goes to that file instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(debug));

    let result = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("link_panel.log"));
            let appender = tracing_appender::rolling::never(dir, name);
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        None => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("logger already initialised");
    }
}
