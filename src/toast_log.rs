use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const TOAST_LOG_FILE: &str = "toast.log";

pub fn append_toast_log(path: &Path, msg: &str) {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(mut file) => {
            let _ = writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg);
        }
        Err(e) => tracing::debug!(path = %path.display(), "cannot open toast log: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toast.log");
        append_toast_log(&path, "Failed to launch /a");
        append_toast_log(&path, "Failed to launch /b");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - Failed to launch /a"));
        assert!(lines[1].ends_with(" - Failed to launch /b"));
    }
}
