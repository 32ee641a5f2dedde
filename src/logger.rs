//! Logging: an in-memory buffer for the TUI overlay plus optional file output.
//!
//! The overlay buffer always receives records through the `log` facade; the
//! file sink is added when `[logging] enabled` is set. Components therefore
//! log with the usual `log` macros and never talk to the buffer directly.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// The overlay keeps this many lines; older ones are dropped.
const MAX_BUFFERED_LINES: usize = 500;

/// Shared log buffer backing the logs overlay.
#[derive(Clone)]
pub struct Logger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a log line with a timestamp prefix.
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted = format!("[{}] {}", timestamp, message);

        if let Ok(mut lines) = self.lines.lock() {
            lines.push(formatted);
            if lines.len() > MAX_BUFFERED_LINES {
                let excess = lines.len() - MAX_BUFFERED_LINES;
                lines.drain(..excess);
            }
        }
    }

    /// All buffered lines, newest first.
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(lines) = self.lines.lock() {
            let mut snapshot = lines.clone();
            snapshot.reverse();
            snapshot
        } else {
            Vec::new()
        }
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// `log::Log` adapter feeding the overlay buffer.
struct OverlaySink {
    logger: Logger,
}

impl log::Log for OverlaySink {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        // Trace spam would push everything useful out of the overlay.
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.logger.log(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

/// Install the global log dispatcher: always the overlay buffer, plus a
/// file when enabled. Must be called once, before the first log record.
pub fn init(config: &LoggingConfig, logger: Logger) -> anyhow::Result<()> {
    let level = config.level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(Box::new(OverlaySink { logger }) as Box<dyn log::Log>);

    if config.enabled {
        dispatch = dispatch.chain(fern::log_file(&config.file)?);
    }

    dispatch.apply()?;
    Ok(())
}
