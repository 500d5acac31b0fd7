use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use ship_classes::{LogLevel, LogSink};

/// Appends timestamped, level-tagged lines to a dated log file:
/// `{dir}/sync-YYYY-MM-DD.log`, one file per day.
///
/// Logging must never take the application down, so write failures are
/// swallowed.
pub struct FileLogSink {
    dir: PathBuf,
    writer: Mutex<()>,
}

impl FileLogSink {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            writer: Mutex::new(()),
        }
    }

    /// Today's log file under `dir`.
    pub fn current_file(dir: &Path) -> PathBuf {
        dir.join(format!("sync-{}.log", Local::now().format("%Y-%m-%d")))
    }
}

impl LogSink for FileLogSink {
    fn log(&self, message: &str, level: LogLevel) {
        let line = format!(
            "[{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        );

        let _guard = self.writer.lock().unwrap();
        if std::fs::create_dir_all(&self.dir).is_ok()
            && let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Self::current_file(&self.dir))
        {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Read the newest `limit` non-empty lines of today's log, newest first.
pub fn tail_log(dir: &Path, limit: usize) -> std::io::Result<Vec<String>> {
    let path = FileLogSink::current_file(dir);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut lines: Vec<String> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect();

    let keep_from = lines.len().saturating_sub(limit);
    let mut tail = lines.split_off(keep_from);
    tail.reverse();
    Ok(tail)
}
