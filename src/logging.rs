use std::{
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
};

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

pub fn get_logger() -> &'static StderrLogger {
    LOGGER.get_or_init(|| StderrLogger::new(LevelFilter::Warn))
}

/// Installs [`StderrLogger`] as the global logger. Calling it more than once is harmless.
pub fn init(level: LevelFilter) {
    let logger = get_logger();
    logger.set_min_level(level);

    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Writes every record to stderr as `[LEVEL source] message`.
pub struct StderrLogger {
    min_level: RwLock<LevelFilter>,
}

impl StderrLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self
            .min_level
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self
            .min_level
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                io::stderr().lock(),
                "{}",
                format_record(
                    record.level(),
                    record.module_path().unwrap_or("unknown"),
                    &record.args().to_string()
                )
            );
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn format_record(level: Level, source: &str, message: &str) -> String {
    format!("[{:<5} {}] {}", level, source, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filtering() {
        let logger = StderrLogger::new(LevelFilter::Info);
        let meta = |level| Metadata::builder().level(level).build();

        assert!(logger.enabled(&meta(Level::Warn)));
        assert!(logger.enabled(&meta(Level::Info)));
        assert!(!logger.enabled(&meta(Level::Debug)));

        logger.set_min_level(LevelFilter::Off);
        assert!(!logger.enabled(&meta(Level::Error)));
    }

    #[test]
    fn record_format() {
        assert_eq!(
            format_record(Level::Warn, "setmaze::settings", "oops"),
            "[WARN  setmaze::settings] oops"
        );
    }
}
