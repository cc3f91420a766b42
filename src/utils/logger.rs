// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Writes records to stderr so stdout carries only banners and reports.
struct ConsoleLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// `-v` count to a level filter, starting from Warn.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
  match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

fn icon(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴", // Red Circle
    Level::Warn => "🟠",  // Orange Circle
    Level::Info => "🔵",  // Blue Circle
    Level::Debug => "⚪", // White/Gray Circle
    Level::Trace => "▫️", // Small dot
  }
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "🔴  File not found"
      let mut err = std::io::stderr().lock();
      let _ = writeln!(err, "{}  {}", icon(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
