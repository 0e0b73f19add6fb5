//! Logging Module
//!
//! `log` macros are used throughout the crate; installing the subscriber
//! also installs the `log` bridge (tracing-subscriber's `tracing-log`
//! feature).
//! Output goes to a daily-rolling JSON file under the data directory;
//! rotated files from earlier days are gzip-compressed in the background.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Rolling log file prefix.
pub const LOG_FILE_PREFIX: &str = "listing-search.log";

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

// ============================================================================
// Logging Initialization
// ============================================================================

/// Initialize file-only logging for the terminal UI.
///
/// No stdout layer; the TUI owns the terminal. Returns a `WorkerGuard` that
/// must live for the whole program so buffered lines are flushed on exit.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    ensure_dir(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(file_layer).init();
    spawn_compression(log_dir.to_path_buf());

    guard
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn ensure_dir(log_dir: &Path) {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory {}: {e}", log_dir.display());
        }
    }
}

fn spawn_compression(log_dir: PathBuf) {
    std::thread::spawn(move || {
        // Rolling file names carry the UTC date
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        compress_old_logs(&log_dir, &today);
    });
}

// ============================================================================
// Retention
// ============================================================================

/// Whether `name` is a rotated log from a day other than `today`.
fn is_rotated_log(name: &str, today: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|suffix| suffix != today && !suffix.ends_with(".gz"))
}

/// Compress rotated logs older than today. Returns how many were compressed.
fn compress_old_logs(log_dir: &Path, today: &str) -> usize {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return 0;
    };

    let mut compressed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_rotated_log(name, today) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => {
                log::info!("Compressed old log: {}", path.display());
                compressed += 1;
            }
            Err(e) => log::warn!("Failed to compress old log {}: {e}", path.display()),
        }
    }
    compressed
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}
