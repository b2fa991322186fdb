//! Rolling file logger.
//!
//! `init_logger` installs a `tracing` subscriber that also receives `log`
//! records. Every formatted line goes to `<dir>/<app>.log`, rotated by size.
//! [`tail_log_file`] reads the newest lines back.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Rotation limits and default filter
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate once the active file would exceed this many bytes
    pub max_file_bytes: u64,
    /// Rotated files kept next to the active one (`.1` is the newest)
    pub max_files: usize,
    /// Filter directive used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            default_filter: "info".to_string(),
        }
    }
}

static LOGGER: OnceLock<SharedLog> = OnceLock::new();

/// Initialize with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_with_config(log_dir, app_name, LoggerConfig::default())
}

pub fn init_with_config(
    log_dir: PathBuf,
    app_name: &str,
    config: LoggerConfig,
) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("logger already initialized".to_string());
    }

    let file = RollingFile::open(&log_dir, app_name, config.max_file_bytes, config.max_files)
        .map_err(|e| format!("failed to open log file in {}: {}", log_dir.display(), e))?;
    let shared = SharedLog::new(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true)
        .with_writer(shared.clone())
        .finish()
        .try_init()
        .map_err(|e| format!("failed to install subscriber: {}", e))?;

    LOGGER
        .set(shared)
        .map_err(|_| "logger already initialized".to_string())?;

    tracing::info!(target: "rolling_logger", "Logging to {}", log_dir.display());
    Ok(())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Last `lines` lines of the active log file for `app_name` in `log_dir`
pub fn tail_log_file(log_dir: &Path, app_name: &str, lines: usize) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(active_path(log_dir, app_name))?;
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    Ok(all[start..].iter().map(|l| l.to_string()).collect())
}

fn ensure_init() -> Result<(), String> {
    if LOGGER.get().is_none() {
        return Err("logger not initialized".to_string());
    }
    Ok(())
}

fn active_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Size-rotated log file
struct RollingFile {
    dir: PathBuf,
    app_name: String,
    file: File,
    size: u64,
    max_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = active_path(dir, app_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            file,
            size,
            max_bytes,
            max_files,
        })
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.app_name, index))
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.size > 0 && self.size + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.size += buf.len() as u64;
        Ok(())
    }

    /// app.log -> app.log.1 -> app.log.2 ...; the oldest beyond `max_files` is dropped
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let active = active_path(&self.dir, &self.app_name);

        if self.max_files == 0 {
            fs::remove_file(&active)?;
        } else {
            let oldest = self.rotated_path(self.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.max_files).rev() {
                let from = self.rotated_path(index);
                if from.exists() {
                    fs::rename(&from, self.rotated_path(index + 1))?;
                }
            }
            fs::rename(&active, self.rotated_path(1))?;
        }

        self.file = OpenOptions::new().create(true).append(true).open(&active)?;
        self.size = 0;
        Ok(())
    }
}

/// Writer handed to the fmt layer; one `write` call per formatted event
#[derive(Clone)]
struct SharedLog {
    file: Arc<Mutex<RollingFile>>,
}

impl SharedLog {
    fn new(file: RollingFile) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, RollingFile>> {
        self.file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file poisoned"))
    }
}

impl Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.file.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedLog {
    type Writer = SharedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "App", 16, 2).unwrap();

        for i in 0..5 {
            file.write(format!("line number {}\n", i).as_bytes()).unwrap();
        }

        assert!(dir.path().join("App.log").exists());
        assert!(dir.path().join("App.log.1").exists());
        assert!(dir.path().join("App.log.2").exists());
        assert!(!dir.path().join("App.log.3").exists());

        let active = fs::read_to_string(dir.path().join("App.log")).unwrap();
        assert_eq!(active, "line number 4\n");
        let newest_rotated = fs::read_to_string(dir.path().join("App.log.1")).unwrap();
        assert_eq!(newest_rotated, "line number 3\n");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "App", 1024, 1).unwrap();
            file.write(b"first\n").unwrap();
        }
        let mut file = RollingFile::open(dir.path(), "App", 1024, 1).unwrap();
        assert_eq!(file.size, 6);
        file.write(b"second\n").unwrap();

        let tail = tail_log_file(dir.path(), "App", 1).unwrap();
        assert_eq!(tail, vec!["second".to_string()]);
        assert_eq!(tail_log_file(dir.path(), "App", 10).unwrap().len(), 2);
    }

    #[test]
    fn test_shared_writer_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::open(dir.path(), "App", 4, 1).unwrap();
        let mut log = SharedLog::new(file);
        let mut clone = log.make_writer();

        log.write_all(b"a\nb\n").unwrap();
        clone.write_all(b"c\n").unwrap();
        log.flush().unwrap();

        let rotated = fs::read_to_string(dir.path().join("App.log.1")).unwrap();
        assert_eq!(rotated, "a\nb\n");
        assert_eq!(tail_log_file(dir.path(), "App", 10).unwrap(), vec!["c".to_string()]);
    }

    #[test]
    fn test_init_captures_log_records() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            max_file_bytes: 64 * 1024,
            ..LoggerConfig::default()
        };
        init_with_config(dir.path().to_path_buf(), "Test", config).unwrap();

        info("hello from tracing").unwrap();
        error("something failed").unwrap();
        log::warn!("hello from log");

        let written = tail_log_file(dir.path(), "Test", 100).unwrap().join("\n");
        assert!(written.contains("hello from tracing"));
        assert!(written.contains("ERROR"));
        assert!(written.contains("something failed"));
        assert!(written.contains("hello from log"));
        assert!(init_logger(dir.path().to_path_buf(), "Test").is_err());
    }
}
